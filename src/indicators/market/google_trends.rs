//! Search interest (Google Trends) indicator

use serde_json::Value;

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::market::activity_index;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_SEARCH_TERMS: [&str; 2] = ["BTC", "Bitcoin"];

fn terms_value(terms: &[String]) -> Value {
    Value::Array(terms.iter().cloned().map(Value::String).collect())
}

fn search_interest_from_metric(
    series: &[MetricPoint],
    period: usize,
    terms: &[String],
) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(IndicatorType::GoogleTrends, "Google Trends", point.timestamp, math::round_to(point.value, 2))
                .with_param("period", period)
                .with_param("search_terms", terms_value(terms))
                .with_param("source", "provider")
        })
        .collect()
}

/// Estimate search interest on a 0-100 scale; big moves draw searches
pub fn estimate_search_interest(
    candles: &[Candle],
    period: usize,
    terms: &[String],
) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    candles
        .iter()
        .zip(activity_index(candles, period))
        .filter_map(|(candle, value)| {
            Some(
                IndicatorValue::new(IndicatorType::GoogleTrends, "Google Trends", candle.timestamp, math::round_to(value?, 2))
                    .with_param("period", period)
                    .with_param("search_terms", terms_value(terms))
                    .with_param("method", "price_volatility_based")
                    .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct GoogleTrendsIndicator;

impl Indicator for GoogleTrendsIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::GoogleTrends
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
        let terms = params.strings_or("search_terms", &DEFAULT_SEARCH_TERMS)?;
        if let Some(series) = params.metric_series() {
            return Ok(search_interest_from_metric(series, period, &terms));
        }
        Ok(estimate_search_interest(candles, period, &terms))
    }
}
