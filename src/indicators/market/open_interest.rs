//! Open interest indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::market::activity_index;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 20;

fn open_interest_from_metric(series: &[MetricPoint], period: usize) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(IndicatorType::OpenInterest, "Open Interest", point.timestamp, math::round_to(point.value, 2))
                .with_param("period", period)
                .with_param("source", "provider")
        })
        .collect()
}

/// Estimate open interest activity on a 0-100 scale from price volatility
pub fn estimate_open_interest(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    candles
        .iter()
        .zip(activity_index(candles, period))
        .filter_map(|(candle, value)| {
            Some(
                IndicatorValue::new(IndicatorType::OpenInterest, "Open Interest", candle.timestamp, math::round_to(value?, 2))
                    .with_param("period", period)
                    .with_param("method", "price_volatility_based")
                    .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct OpenInterestIndicator;

impl Indicator for OpenInterestIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::OpenInterest
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
            return Ok(open_interest_from_metric(series, period));
        }
        Ok(estimate_open_interest(candles, period))
    }
}
