//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;

/// Calculate SMA of the close for every index with a full window
pub fn calculate_sma(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let name = format!("SMA({})", period);

    candles
        .iter()
        .zip(math::rolling_mean(&closes, period))
        .filter_map(|(candle, value)| {
            value.map(|v| {
                IndicatorValue::new(IndicatorType::Sma, name.clone(), candle.timestamp, math::round_to(v, 6))
                    .with_param("period", period)
            })
        })
        .collect()
}

pub struct SmaIndicator;

impl Indicator for SmaIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Sma
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
        Ok(calculate_sma(candles, period))
    }
}
