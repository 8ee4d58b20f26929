//! Williams %R indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 14;

/// Calculate Williams %R
///
/// %R = -100 * (highest high - close) / (highest high - lowest low), in
/// [-100, 0]. A flat range reads -50.
pub fn calculate_williams_r(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let highest = math::rolling_max(&highs, period);
    let lowest = math::rolling_min(&lows, period);
    let name = format!("Williams %R({})", period);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let (high, low) = (highest[i]?, lowest[i]?);
            let range = high - low;
            let value = if range == 0.0 {
                -50.0
            } else {
                -100.0 * (high - candle.close) / range
            };
            Some(
                IndicatorValue::new(IndicatorType::WilliamsR, name.clone(), candle.timestamp, math::round_to(value, 2))
                    .with_param("period", period),
            )
        })
        .collect()
}

pub struct WilliamsRIndicator;

impl Indicator for WilliamsRIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::WilliamsR
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
        Ok(calculate_williams_r(candles, period))
    }
}
