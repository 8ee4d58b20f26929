//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STD_DEV: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
///
/// The middle band is the value; `upper`, `lower` and `bandwidth` are
/// attached as parameters.
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::rolling_mean(&closes, period);
    let std = math::rolling_std(&closes, period);
    let name = format!("Bollinger Bands({}, {})", period, std_dev);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let (mid, sd) = (middle[i]?, std[i]?);
            let upper = mid + std_dev * sd;
            let lower = mid - std_dev * sd;
            let bandwidth = if mid != 0.0 {
                (upper - lower) / mid * 100.0
            } else {
                0.0
            };
            Some(
                IndicatorValue::new(IndicatorType::BollingerBands, name.clone(), candle.timestamp, math::round_to(mid, 6))
                    .with_param("period", period)
                    .with_param("std_dev", std_dev)
                    .with_param("upper", math::round_to(upper, 6))
                    .with_param("lower", math::round_to(lower, 6))
                    .with_param("bandwidth", math::round_to(bandwidth, 2)),
            )
        })
        .collect()
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Vec<IndicatorValue> {
    calculate_bollinger_bands(candles, DEFAULT_PERIOD, DEFAULT_STD_DEV)
}

pub struct BollingerBandsIndicator;

impl Indicator for BollingerBandsIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::BollingerBands
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        params.period("period", DEFAULT_PERIOD, 2)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 2)?;
        let std_dev = params.positive_f64("std_dev", DEFAULT_STD_DEV)?;
        Ok(calculate_bollinger_bands(candles, period, std_dev))
    }
}
