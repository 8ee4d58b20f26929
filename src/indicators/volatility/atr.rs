//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 14;

/// True range per candle; the first candle has no previous close and uses high - low.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| match i {
            0 => candle.high - candle.low,
            _ => math::true_range(candle.high, candle.low, candles[i - 1].close),
        })
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// Exponentially weighted mean of the true range with `span = period`.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let atr = math::ewm_mean(&true_ranges(candles), period);
    let name = format!("ATR({})", period);

    candles
        .iter()
        .zip(atr)
        .map(|(candle, v)| {
            IndicatorValue::new(IndicatorType::Atr, name.clone(), candle.timestamp, math::round_to(v, 6))
                .with_param("period", period)
        })
        .collect()
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Vec<IndicatorValue> {
    calculate_atr(candles, DEFAULT_PERIOD)
}

pub struct AtrIndicator;

impl Indicator for AtrIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Atr
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
        Ok(calculate_atr(candles, period))
    }
}
