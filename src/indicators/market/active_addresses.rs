//! Active on-chain addresses indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 7;
const ESTIMATE_BASELINE: f64 = 1_000_000.0;
const ESTIMATE_SCALE: f64 = 100_000.0;

pub fn active_addresses_from_metric(series: &[MetricPoint], period: usize) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(
                IndicatorType::ActiveAddresses,
                "Active Addresses",
                point.timestamp,
                math::round_to(point.value, 0),
            )
            .with_param("period", period)
            .with_param("source", "provider")
        })
        .collect()
}

/// Estimate active addresses from volume changes
///
/// Samples where the estimate is not a positive count are dropped.
pub fn estimate_active_addresses(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let volumes: Vec<f64> = candles.iter().map(Candle::volume_or_zero).collect();

    candles
        .iter()
        .zip(math::pct_change(&volumes))
        .filter_map(|(candle, change)| {
            let value = ESTIMATE_BASELINE + change? * ESTIMATE_SCALE;
            (value.is_finite() && value > 0.0).then(|| {
                IndicatorValue::new(
                    IndicatorType::ActiveAddresses,
                    "Estimated Active Addresses",
                    candle.timestamp,
                    value.trunc(),
                )
                .with_param("period", period)
                .with_param("method", "volume_based")
                .with_param("estimated", true)
            })
        })
        .collect()
}

pub struct ActiveAddressesIndicator;

impl Indicator for ActiveAddressesIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::ActiveAddresses
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
        if candles.len() < period {
            return Ok(Vec::new());
        }
        if let Some(series) = params.metric_series() {
            return Ok(active_addresses_from_metric(series, period));
        }
        Ok(estimate_active_addresses(candles, period))
    }
}
