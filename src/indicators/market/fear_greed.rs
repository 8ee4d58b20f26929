//! Fear & Greed index indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 7;

/// Label for an index reading in [0, 100]
pub fn classify_fear_greed(value: f64) -> &'static str {
    if value >= 80.0 {
        "Extreme Greed"
    } else if value >= 60.0 {
        "Greed"
    } else if value >= 40.0 {
        "Neutral"
    } else if value >= 20.0 {
        "Fear"
    } else {
        "Extreme Fear"
    }
}

pub fn fear_greed_from_metric(series: &[MetricPoint], period: usize) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            let value = point.value.clamp(0.0, 100.0).trunc();
            let classification = classify_fear_greed(value);
            IndicatorValue::new(
                IndicatorType::FearGreedIndex,
                format!("Fear & Greed ({})", classification),
                point.timestamp,
                value,
            )
            .with_param("period", period)
            .with_param("classification", classification)
            .with_param("source", "provider")
        })
        .collect()
}

/// Estimate the index from return momentum and volatility
///
/// index = 50 + 1000 * mean(return) - 500 * std(return), clipped to [0, 100]
pub fn estimate_fear_greed(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let returns = math::pct_change(&closes);
    let momentum = math::rolling_apply_opt(&returns, period, math::mean);
    let volatility = math::rolling_apply_opt(&returns, period, math::sample_std);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let raw = 50.0 + momentum[i]? * 1000.0 - volatility[i]? * 500.0;
            let value = raw.clamp(0.0, 100.0).trunc();
            let classification = classify_fear_greed(value);
            Some(
                IndicatorValue::new(
                    IndicatorType::FearGreedIndex,
                    format!("Estimated Fear & Greed ({})", classification),
                    candle.timestamp,
                    value,
                )
                .with_param("period", period)
                .with_param("method", "momentum_based")
                .with_param("classification", classification)
                .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct FearGreedIndicator;

impl Indicator for FearGreedIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::FearGreedIndex
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
            return Ok(fear_greed_from_metric(series, period));
        }
        Ok(estimate_fear_greed(candles, period))
    }
}
