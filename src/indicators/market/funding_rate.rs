//! Perpetual funding rate indicator (percent)

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 8;

/// Convert a provider funding rate series (fraction per interval) to percent
pub fn funding_rate_from_metric(series: &[MetricPoint], period: usize) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(
                IndicatorType::FundingRate,
                "Funding Rate (%)",
                point.timestamp,
                math::round_to(point.value * 100.0, 4),
            )
            .with_param("period", period)
            .with_param("source", "provider")
        })
        .collect()
}

/// Estimate funding rate from return volatility; busier markets pay more
pub fn estimate_funding_rate(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volatility = math::rolling_apply_opt(&math::pct_change(&closes), period, math::sample_std);

    candles
        .iter()
        .zip(volatility)
        .filter_map(|(candle, vol)| {
            Some(
                IndicatorValue::new(
                    IndicatorType::FundingRate,
                    "Estimated Funding Rate (%)",
                    candle.timestamp,
                    math::round_to(vol? * 100.0, 4),
                )
                .with_param("period", period)
                .with_param("method", "volatility_based")
                .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct FundingRateIndicator;

impl Indicator for FundingRateIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::FundingRate
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
        if candles.len() < period {
            return Ok(Vec::new());
        }
        if let Some(series) = params.metric_series() {
            return Ok(funding_rate_from_metric(series, period));
        }
        Ok(estimate_funding_rate(candles, period))
    }
}
