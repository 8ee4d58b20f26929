//! Keltner Channel indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::indicators::volatility::atr::true_ranges;
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Calculate Keltner Channel
///
/// Middle = rolling mean of the typical price; bands sit `multiplier`
/// rolling-mean true ranges away from it.
pub fn calculate_keltner_channel(
    candles: &[Candle],
    period: usize,
    multiplier: f64,
) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let middle = math::rolling_mean(&typical, period);
    let atr = math::rolling_mean(&true_ranges(candles), period);
    let name = format!("Keltner Middle({})", period);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let (mid, range) = (middle[i]?, atr[i]?);
            Some(
                IndicatorValue::new(IndicatorType::KeltnerChannel, name.clone(), candle.timestamp, math::round_to(mid, 2))
                    .with_param("period", period)
                    .with_param("multiplier", multiplier)
                    .with_param("upper", math::round_to(mid + multiplier * range, 2))
                    .with_param("lower", math::round_to(mid - multiplier * range, 2)),
            )
        })
        .collect()
}

pub struct KeltnerChannelIndicator;

impl Indicator for KeltnerChannelIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::KeltnerChannel
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
        let multiplier = params.positive_f64("multiplier", DEFAULT_MULTIPLIER)?;
        Ok(calculate_keltner_channel(candles, period, multiplier))
    }
}
