//! VWAP (Volume Weighted Average Price) indicator, rolling window

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;

/// Calculate VWAP = sum(typical price * volume) / sum(volume) over `period`
///
/// A window with no volume falls back to the plain mean typical price.
pub fn calculate_vwap(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let volumes: Vec<f64> = candles.iter().map(Candle::volume_or_zero).collect();
    let weighted: Vec<f64> = typical.iter().zip(&volumes).map(|(p, v)| p * v).collect();

    let weighted_sum = math::rolling_sum(&weighted, period);
    let volume_sum = math::rolling_sum(&volumes, period);
    let typical_mean = math::rolling_mean(&typical, period);
    let name = format!("VWAP({})", period);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let volume = volume_sum[i]?;
            let vwap = if volume > 0.0 {
                weighted_sum[i]? / volume
            } else {
                typical_mean[i]?
            };
            Some(
                IndicatorValue::new(IndicatorType::Vwap, name.clone(), candle.timestamp, math::round_to(vwap, 2))
                    .with_param("period", period),
            )
        })
        .collect()
}

pub struct VwapIndicator;

impl Indicator for VwapIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Vwap
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        params.period("period", DEFAULT_PERIOD, 1)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 1)?;
        Ok(calculate_vwap(candles, period))
    }
}
