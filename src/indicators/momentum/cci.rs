//! CCI (Commodity Channel Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;
const LAMBERT: f64 = 0.015;

/// Calculate CCI
///
/// CCI = (typical price - SMA(typical price)) / (0.015 * mean absolute deviation)
pub fn calculate_cci(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let sma = math::rolling_mean(&typical, period);
    let deviation = math::rolling_apply(&typical, period, math::mean_abs_deviation);
    let name = format!("CCI({})", period);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let (mean, mad) = (sma[i]?, deviation[i]?);
            let value = if mad == 0.0 {
                0.0
            } else {
                (typical[i] - mean) / (LAMBERT * mad)
            };
            Some(
                IndicatorValue::new(IndicatorType::Cci, name.clone(), candle.timestamp, math::round_to(value, 2))
                    .with_param("period", period),
            )
        })
        .collect()
}

pub struct CciIndicator;

impl Indicator for CciIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Cci
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
        Ok(calculate_cci(candles, period))
    }
}
