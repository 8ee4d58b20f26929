//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::indicators::validation::validate_macd_periods;
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// The MACD line is the value; signal and histogram ride in the parameters.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Vec<IndicatorValue> {
    if slow_period == 0 || candles.len() < slow_period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast_ema = math::ewm_mean(&closes, fast_period);
    let slow_ema = math::ewm_mean(&closes, slow_period);

    let macd_line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = math::ewm_mean(&macd_line, signal_period);

    candles
        .iter()
        .zip(macd_line.iter().zip(&signal_line))
        .map(|(candle, (&macd, &signal))| {
            IndicatorValue::new(IndicatorType::Macd, "MACD", candle.timestamp, math::round_to(macd, 6))
                .with_param("fast", fast_period)
                .with_param("slow", slow_period)
                .with_param("signal", signal_period)
                .with_param("signal_value", math::round_to(signal, 6))
                .with_param("histogram", math::round_to(macd - signal, 6))
        })
        .collect()
}

/// Calculate MACD with default parameters (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Vec<IndicatorValue> {
    calculate_macd(candles, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

pub struct MacdIndicator;

impl MacdIndicator {
    fn periods(params: &IndicatorParams) -> Result<(usize, usize, usize), IndicatorError> {
        let fast = params.period("fast", DEFAULT_FAST, 1)?;
        let slow = params.period("slow", DEFAULT_SLOW, 1)?;
        let signal = params.period("signal", DEFAULT_SIGNAL, 1)?;
        validate_macd_periods(fast, slow)?;
        Ok((fast, slow, signal))
    }
}

impl Indicator for MacdIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Macd
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(Self::periods(params)?.1)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let (fast, slow, signal) = Self::periods(params)?;
        Ok(calculate_macd(candles, fast, slow, signal))
    }
}
