//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 14;

/// RSI from average gain and loss over one window.
///
/// A window without losses saturates at 100; a window without any movement
/// reads 50.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss (simple rolling means of the close diff)
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);

    for pair in candles.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gains = math::rolling_mean(&gains, period);
    let avg_losses = math::rolling_mean(&losses, period);
    let name = format!("RSI({})", period);

    // diff i belongs to candle i + 1
    candles[1..]
        .iter()
        .zip(avg_gains.into_iter().zip(avg_losses))
        .filter_map(|(candle, averages)| match averages {
            (Some(gain), Some(loss)) => Some(
                IndicatorValue::new(
                    IndicatorType::Rsi,
                    name.clone(),
                    candle.timestamp,
                    math::round_to(rsi_from_averages(gain, loss), 2),
                )
                .with_param("period", period),
            ),
            _ => None,
        })
        .collect()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Vec<IndicatorValue> {
    calculate_rsi(candles, DEFAULT_PERIOD)
}

pub struct RsiIndicator;

impl Indicator for RsiIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Rsi
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
        Ok(calculate_rsi(candles, period))
    }
}
