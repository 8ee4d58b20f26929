//! Network hash rate indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 14;
/// Hashes per second in one TH/s.
const TERA: f64 = 1e12;
/// Baseline of the price-based estimate, in TH/s.
const ESTIMATE_BASELINE: f64 = 100.0;

/// Convert a provider hash rate series (H/s) to TH/s
pub fn hash_rate_from_metric(series: &[MetricPoint], period: usize) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(
                IndicatorType::HashRate,
                "Hash Rate (TH/s)",
                point.timestamp,
                math::round_to(point.value / TERA, 2),
            )
            .with_param("period", period)
            .with_param("source", "provider")
        })
        .collect()
}

/// Estimate hash rate from price changes, assuming it tracks price
pub fn estimate_hash_rate(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    candles
        .iter()
        .zip(math::pct_change(&closes))
        .filter_map(|(candle, change)| {
            let value = ESTIMATE_BASELINE + change? * 50.0;
            Some(
                IndicatorValue::new(
                    IndicatorType::HashRate,
                    "Estimated Hash Rate (TH/s)",
                    candle.timestamp,
                    math::round_to(value, 2),
                )
                .with_param("period", period)
                .with_param("method", "price_based")
                .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct HashRateIndicator;

impl Indicator for HashRateIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::HashRate
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
            return Ok(hash_rate_from_metric(series, period));
        }
        Ok(estimate_hash_rate(candles, period))
    }
}
