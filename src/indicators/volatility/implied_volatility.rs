//! Implied volatility indicator
//!
//! Uses the provider's implied volatility series when one is supplied,
//! otherwise estimates it from the annualized deviation of price changes.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::indicators::volatility::realized_volatility::TRADING_DAYS;
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 20;
const NAME: &str = "Implied Volatility (%)";

/// Estimate implied volatility from the rolling std of percent changes
pub fn calculate_implied_volatility(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let std = math::rolling_apply_opt(&math::pct_change(&closes), period, math::sample_std);
    let annualize = TRADING_DAYS.sqrt() * 100.0;

    candles
        .iter()
        .zip(std)
        .filter_map(|(candle, sd)| {
            let value = sd? * annualize;
            Some(
                IndicatorValue::new(IndicatorType::ImpliedVolatility, NAME, candle.timestamp, math::round_to(value, 2))
                    .with_param("period", period)
                    .with_param("method", "price_changes")
                    .with_param("annualized", true)
                    .with_param("estimated", true),
            )
        })
        .collect()
}

/// Map a provider implied volatility series (already in percent)
pub fn implied_volatility_from_metric(series: &[MetricPoint]) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(IndicatorType::ImpliedVolatility, NAME, point.timestamp, math::round_to(point.value, 2))
                .with_param("source", "provider")
                .with_param("annualized", true)
        })
        .collect()
}

pub struct ImpliedVolatilityIndicator;

impl Indicator for ImpliedVolatilityIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::ImpliedVolatility
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
            return Ok(implied_volatility_from_metric(series));
        }
        Ok(calculate_implied_volatility(candles, period))
    }
}
