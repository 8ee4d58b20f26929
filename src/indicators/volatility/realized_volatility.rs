//! Realized volatility indicator (annualized, percent)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;
pub const TRADING_DAYS: f64 = 252.0;

/// Estimator used for realized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityMethod {
    /// Standard deviation of log close-to-close returns.
    #[default]
    CloseToClose,
    /// High/low range estimator.
    Parkinson,
    /// OHLC estimator.
    GarmanKlass,
}

impl VolatilityMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            VolatilityMethod::CloseToClose => "close_to_close",
            VolatilityMethod::Parkinson => "parkinson",
            VolatilityMethod::GarmanKlass => "garman_klass",
        }
    }

    fn label(self) -> &'static str {
        match self {
            VolatilityMethod::CloseToClose => "Realized Volatility (%)",
            VolatilityMethod::Parkinson => "Parkinson Volatility (%)",
            VolatilityMethod::GarmanKlass => "Garman-Klass Volatility (%)",
        }
    }
}

impl FromStr for VolatilityMethod {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "close_to_close" => Ok(VolatilityMethod::CloseToClose),
            "parkinson" | "high_low" => Ok(VolatilityMethod::Parkinson),
            "garman_klass" | "ohlc" => Ok(VolatilityMethod::GarmanKlass),
            other => Err(IndicatorError::invalid(
                "method",
                format!("unknown volatility method '{}'", other),
            )),
        }
    }
}

fn log_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (numerator > 0.0 && denominator > 0.0).then(|| (numerator / denominator).ln())
}

/// Per-window volatility before annualization, one slot per candle.
fn raw_volatility(candles: &[Candle], period: usize, method: VolatilityMethod) -> Vec<Option<f64>> {
    match method {
        VolatilityMethod::CloseToClose => {
            let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
            math::rolling_apply_opt(&math::log_returns(&closes), period, math::sample_std)
        }
        VolatilityMethod::Parkinson => {
            let squared: Vec<Option<f64>> = candles
                .iter()
                .map(|c| log_ratio(c.high, c.low).map(|hl| hl * hl))
                .collect();
            let scale = 1.0 / (4.0 * std::f64::consts::LN_2);
            math::rolling_apply_opt(&squared, period, math::mean)
                .into_iter()
                .map(|m| m.map(|m| (scale * m).sqrt()))
                .collect()
        }
        VolatilityMethod::GarmanKlass => {
            let terms: Vec<Option<f64>> = candles
                .iter()
                .map(|c| {
                    let hl = log_ratio(c.high, c.low)?;
                    let co = log_ratio(c.close, c.open)?;
                    Some(0.5 * hl * hl - (2.0 * std::f64::consts::LN_2 - 1.0) * co * co)
                })
                .collect();
            math::rolling_apply_opt(&terms, period, math::mean)
                .into_iter()
                .map(|m| m.filter(|m| *m >= 0.0).map(f64::sqrt))
                .collect()
        }
    }
}

/// Calculate annualized realized volatility in percent
pub fn calculate_realized_volatility(
    candles: &[Candle],
    period: usize,
    method: VolatilityMethod,
) -> Vec<IndicatorValue> {
    if period < 2 || candles.len() < period {
        return Vec::new();
    }

    let annualize = TRADING_DAYS.sqrt() * 100.0;

    candles
        .iter()
        .zip(raw_volatility(candles, period, method))
        .filter_map(|(candle, vol)| {
            let value = vol? * annualize;
            value.is_finite().then(|| {
                IndicatorValue::new(
                    IndicatorType::RealizedVolatility,
                    method.label(),
                    candle.timestamp,
                    math::round_to(value, 2),
                )
                .with_param("period", period)
                .with_param("method", method.as_str())
                .with_param("annualized", true)
            })
        })
        .collect()
}

pub struct RealizedVolatilityIndicator;

impl Indicator for RealizedVolatilityIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::RealizedVolatility
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
        let method: VolatilityMethod = params
            .str_or("method", VolatilityMethod::default().as_str())?
            .parse()?;
        Ok(calculate_realized_volatility(candles, period, method))
    }
}
