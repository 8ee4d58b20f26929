//! Donchian Channel indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;

/// Calculate Donchian Channel: highest high, lowest low and their midpoint
pub fn calculate_donchian_channel(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let upper = math::rolling_max(&highs, period);
    let lower = math::rolling_min(&lows, period);
    let name = format!("Donchian Middle({})", period);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let (up, low) = (upper[i]?, lower[i]?);
            Some(
                IndicatorValue::new(
                    IndicatorType::DonchianChannel,
                    name.clone(),
                    candle.timestamp,
                    math::round_to((up + low) / 2.0, 2),
                )
                .with_param("period", period)
                .with_param("upper", math::round_to(up, 2))
                .with_param("lower", math::round_to(low, 2)),
            )
        })
        .collect()
}

pub struct DonchianChannelIndicator;

impl Indicator for DonchianChannelIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::DonchianChannel
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
        Ok(calculate_donchian_channel(candles, period))
    }
}
