//! ETF flow indicator
//!
//! Provider flow series are passed through. Without one, flow is proxied by
//! price momentum: the value is the percent change of the close, with the
//! price strength against its moving average, the price volatility and the
//! moving average of the change attached once the window is full.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue, MetricPoint};

pub const DEFAULT_PERIOD: usize = 20;

pub fn calculate_etf_flow(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let change: Vec<Option<f64>> = math::pct_change(&closes)
        .into_iter()
        .map(|c| c.map(|c| c * 100.0))
        .collect();
    let price_ma = math::rolling_mean(&closes, period);
    let volatility = math::rolling_std(&closes, period);
    let change_ma = math::rolling_apply_opt(&change, period, math::mean);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let mut value = IndicatorValue::new(
                IndicatorType::EtfFlow,
                "ETF Flow Change(%)",
                candle.timestamp,
                math::round_to(change[i]?, 2),
            )
            .with_param("period", period)
            .with_param("method", "price_based")
            .with_param("estimated", true);

            if let Some(ma) = price_ma[i].filter(|ma| *ma != 0.0) {
                value = value.with_param("strength", math::round_to(candle.close / ma, 2));
            }
            if let Some(vol) = volatility[i] {
                value = value.with_param("volatility", math::round_to(vol, 2));
            }
            if let Some(ma) = change_ma[i] {
                value = value.with_param("change_ma", math::round_to(ma, 2));
            }
            Some(value)
        })
        .collect()
}

/// Map a provider net flow series
pub fn etf_flow_from_metric(series: &[MetricPoint]) -> Vec<IndicatorValue> {
    series
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| {
            IndicatorValue::new(IndicatorType::EtfFlow, "ETF Flow", point.timestamp, math::round_to(point.value, 2))
                .with_param("source", "provider")
        })
        .collect()
}

pub struct EtfFlowIndicator;

impl Indicator for EtfFlowIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::EtfFlow
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
            return Ok(etf_flow_from_metric(series));
        }
        Ok(calculate_etf_flow(candles, period))
    }
}
