//! Parabolic SAR (Stop And Reverse) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::indicators::validation::validate_acceleration;
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_ACCELERATION: f64 = 0.02;
pub const DEFAULT_MAXIMUM: f64 = 0.2;

/// Calculate Parabolic SAR
///
/// Starts in an uptrend with SAR at the first low and the extreme point at
/// the first high. Every bar moves SAR toward the extreme point by the
/// acceleration factor; a new extreme bumps the factor by `acceleration`
/// up to `maximum`, and a cross of the previous SAR flips the trend.
pub fn calculate_parabolic_sar(
    candles: &[Candle],
    acceleration: f64,
    maximum: f64,
) -> Vec<IndicatorValue> {
    if candles.len() < 2 {
        return Vec::new();
    }

    let len = candles.len();
    let mut sar = vec![0.0; len];
    let mut ep = vec![0.0; len];
    let mut af = vec![0.0; len];

    sar[0] = candles[0].low;
    ep[0] = candles[0].high;
    af[0] = acceleration;

    let mut trend_up = true;

    for i in 1..len {
        sar[i] = sar[i - 1] + af[i - 1] * (ep[i - 1] - sar[i - 1]);

        if trend_up {
            let low_prev = candles[i - 1].low;
            if sar[i] > low_prev {
                sar[i] = low_prev;
            }

            if candles[i].high > ep[i - 1] {
                ep[i] = candles[i].high;
                af[i] = (af[i - 1] + acceleration).min(maximum);
            } else {
                ep[i] = ep[i - 1];
                af[i] = af[i - 1];
            }

            if candles[i].low < sar[i - 1] {
                trend_up = false;
                sar[i] = ep[i - 1];
                ep[i] = candles[i].low;
                af[i] = acceleration;
            }
        } else {
            let high_prev = candles[i - 1].high;
            if sar[i] < high_prev {
                sar[i] = high_prev;
            }

            if candles[i].low < ep[i - 1] {
                ep[i] = candles[i].low;
                af[i] = (af[i - 1] + acceleration).min(maximum);
            } else {
                ep[i] = ep[i - 1];
                af[i] = af[i - 1];
            }

            if candles[i].high > sar[i - 1] {
                trend_up = true;
                sar[i] = ep[i - 1];
                ep[i] = candles[i].high;
                af[i] = acceleration;
            }
        }
    }

    candles
        .iter()
        .zip(sar)
        .map(|(candle, v)| {
            IndicatorValue::new(
                IndicatorType::ParabolicSar,
                "Parabolic SAR",
                candle.timestamp,
                math::round_to(v, 2),
            )
            .with_param("acceleration", acceleration)
            .with_param("maximum", maximum)
        })
        .collect()
}

pub struct ParabolicSarIndicator;

impl Indicator for ParabolicSarIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::ParabolicSar
    }

    fn min_samples(&self, _params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(2)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let acceleration = params.f64_or("acceleration", DEFAULT_ACCELERATION)?;
        let maximum = params.f64_or("maximum", DEFAULT_MAXIMUM)?;
        validate_acceleration(acceleration, maximum)?;
        Ok(calculate_parabolic_sar(candles, acceleration, maximum))
    }
}
