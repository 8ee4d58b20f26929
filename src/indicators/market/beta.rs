//! Rolling beta against a benchmark

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::indicators::volatility::realized_volatility::TRADING_DAYS;
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;

fn returns(candles: &[Candle]) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::pct_change(&closes)
}

fn beta_of(asset: &[f64], market: &[f64]) -> Option<f64> {
    let covariance = math::sample_covariance(asset, market)?;
    let variance = math::sample_variance(market)?;
    // flat market carries no information; treat as moving with it
    Some(if variance > 0.0 { covariance / variance } else { 1.0 })
}

/// Calculate beta over rolling windows of `period` returns
///
/// With a benchmark: cov(asset, market) / var(market) on tail-aligned
/// returns. Without one: annualized return volatility as a proxy.
pub fn calculate_beta(
    candles: &[Candle],
    benchmark: Option<&[Candle]>,
    period: usize,
) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() <= period {
        return Vec::new();
    }

    match benchmark {
        Some(market) => {
            let len = candles.len().min(market.len());
            if len <= period {
                return Vec::new();
            }
            let own = &candles[candles.len() - len..];
            let asset_returns = returns(own);
            let market_returns = returns(&market[market.len() - len..]);

            (period + 1..=len)
                .filter_map(|end| {
                    let start = end - period;
                    let asset_window: Option<Vec<f64>> =
                        asset_returns[start..end].iter().copied().collect();
                    let market_window: Option<Vec<f64>> =
                        market_returns[start..end].iter().copied().collect();
                    let beta = beta_of(&asset_window?, &market_window?)?;
                    Some(
                        IndicatorValue::new(IndicatorType::Beta, "Beta", own[end - 1].timestamp, math::round_to(beta, 4))
                            .with_param("period", period)
                            .with_param("method", "market_correlation"),
                    )
                })
                .collect()
        }
        None => {
            let volatility = math::rolling_apply_opt(&returns(candles), period, math::sample_std);
            candles
                .iter()
                .zip(volatility)
                .filter_map(|(candle, vol)| {
                    Some(
                        IndicatorValue::new(
                            IndicatorType::Beta,
                            "Beta",
                            candle.timestamp,
                            math::round_to(vol? * TRADING_DAYS.sqrt(), 4),
                        )
                        .with_param("period", period)
                        .with_param("method", "volatility_based")
                        .with_param("estimated", true),
                    )
                })
                .collect()
        }
    }
}

pub struct BetaIndicator;

impl Indicator for BetaIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Beta
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(params.period("period", DEFAULT_PERIOD, 2)?.saturating_add(1))
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 2)?;
        Ok(calculate_beta(candles, params.benchmark(), period))
    }
}
