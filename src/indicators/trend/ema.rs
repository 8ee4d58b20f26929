//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;

/// Calculate EMA with `span = period`
///
/// The adjusted EMA is defined from the first sample, so once the series
/// holds `period` candles every index gets a value.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let name = format!("EMA({})", period);

    candles
        .iter()
        .zip(math::ewm_mean(&closes, period))
        .map(|(candle, v)| {
            IndicatorValue::new(IndicatorType::Ema, name.clone(), candle.timestamp, math::round_to(v, 6))
                .with_param("period", period)
        })
        .collect()
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(candles: &[Candle], periods: &[usize]) -> Vec<Vec<IndicatorValue>> {
    periods
        .iter()
        .map(|&period| calculate_ema(candles, period))
        .filter(|values| !values.is_empty())
        .collect()
}

pub struct EmaIndicator;

impl Indicator for EmaIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Ema
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
        Ok(calculate_ema(candles, period))
    }
}
