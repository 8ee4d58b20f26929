//! Stochastic oscillator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_K: usize = 14;
pub const DEFAULT_D: usize = 3;
pub const DEFAULT_SLOWING: usize = 3;

/// Calculate the stochastic oscillator
///
/// Raw %K = 100 * (close - lowest low) / (highest high - lowest low), 50 on a
/// flat range. The value is %K smoothed over `slowing`; %D is the rolling
/// mean of the slowed %K over `d_period` and is attached once available.
pub fn calculate_stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
    slowing: usize,
) -> Vec<IndicatorValue> {
    if k_period == 0 || slowing == 0 || d_period == 0 || candles.len() < k_period.saturating_add(slowing) - 1 {
        return Vec::new();
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let highest = math::rolling_max(&highs, k_period);
    let lowest = math::rolling_min(&lows, k_period);

    let raw_k: Vec<Option<f64>> = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let (high, low) = (highest[i]?, lowest[i]?);
            let range = high - low;
            Some(if range == 0.0 {
                50.0
            } else {
                100.0 * (candle.close - low) / range
            })
        })
        .collect();

    let k_slowed = math::rolling_apply_opt(&raw_k, slowing, math::mean);
    let d_line = math::rolling_apply_opt(&k_slowed, d_period, math::mean);
    let name = format!("Stochastic({}, {}, {})", k_period, d_period, slowing);

    candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| {
            let k = math::round_to(k_slowed[i]?, 2);
            let mut value = IndicatorValue::new(IndicatorType::Stochastic, name.clone(), candle.timestamp, k)
                .with_param("k_period", k_period)
                .with_param("d_period", d_period)
                .with_param("slowing", slowing)
                .with_param("k_value", k);
            if let Some(d) = d_line[i] {
                value = value.with_param("d_value", math::round_to(d, 2));
            }
            Some(value)
        })
        .collect()
}

pub struct StochasticIndicator;

impl Indicator for StochasticIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Stochastic
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        let k = params.period("k_period", DEFAULT_K, 1)?;
        let slowing = params.period("slowing", DEFAULT_SLOWING, 1)?;
        Ok(k.saturating_add(slowing) - 1)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let k = params.period("k_period", DEFAULT_K, 1)?;
        let d = params.period("d_period", DEFAULT_D, 1)?;
        let slowing = params.period("slowing", DEFAULT_SLOWING, 1)?;
        Ok(calculate_stochastic(candles, k, d, slowing))
    }
}
