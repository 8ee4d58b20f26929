//! MFI (Money Flow Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 14;

/// Calculate MFI
///
/// Raw money flow is typical price times volume, signed by the direction of
/// the typical price change. MFI = 100 - 100 / (1 + positive / negative).
/// A window without negative flow saturates at 100; one without any flow
/// reads 50. Missing volume counts as zero.
pub fn calculate_money_flow_index(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let mut positive = vec![0.0; candles.len()];
    let mut negative = vec![0.0; candles.len()];

    for i in 1..candles.len() {
        let flow = typical[i] * candles[i].volume_or_zero();
        if typical[i] > typical[i - 1] {
            positive[i] = flow;
        } else if typical[i] < typical[i - 1] {
            negative[i] = flow;
        }
    }

    let positive_sum = math::rolling_sum(&positive, period);
    let negative_sum = math::rolling_sum(&negative, period);
    let name = format!("MFI({})", period);

    candles
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(i, candle)| {
            let (pos, neg) = (positive_sum[i]?, negative_sum[i]?);
            let mfi = if neg == 0.0 {
                if pos > 0.0 {
                    100.0
                } else {
                    50.0
                }
            } else {
                100.0 - 100.0 / (1.0 + pos / neg)
            };
            Some(
                IndicatorValue::new(IndicatorType::MoneyFlowIndex, name.clone(), candle.timestamp, math::round_to(mfi, 2))
                    .with_param("period", period),
            )
        })
        .collect()
}

pub struct MoneyFlowIndexIndicator;

impl Indicator for MoneyFlowIndexIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::MoneyFlowIndex
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(params.period("period", DEFAULT_PERIOD, 1)?.saturating_add(1))
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 1)?;
        Ok(calculate_money_flow_index(candles, period))
    }
}
