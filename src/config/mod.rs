//! Runtime configuration loaded from the environment (and `.env` when present).

use std::env;
use std::str::FromStr;

use crate::indicators::registry::{IndicatorCategory, IndicatorType};
use crate::models::indicators::IndicatorConfig;

pub const DEFAULT_ENVIRONMENT: &str = "sandbox";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BENCHMARK_SYMBOL: &str = "SPY";

/// Current deployment environment (`SIGNALSCOPE_ENV`, default `sandbox`)
pub fn get_environment() -> String {
    dotenvy::dotenv().ok();
    env::var("SIGNALSCOPE_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Weight applied to each indicator category when scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub trend: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
    pub custom: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            trend: 0.30,
            momentum: 0.25,
            volatility: 0.20,
            volume: 0.15,
            custom: 0.10,
        }
    }
}

impl CategoryWeights {
    /// Defaults overridden by `SIGNALSCOPE_WEIGHT_<CATEGORY>`; values are clamped to [0, 1].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: f64| {
            env_parse::<f64>(key)
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(default)
        };
        Self {
            trend: read("SIGNALSCOPE_WEIGHT_TREND", defaults.trend),
            momentum: read("SIGNALSCOPE_WEIGHT_MOMENTUM", defaults.momentum),
            volatility: read("SIGNALSCOPE_WEIGHT_VOLATILITY", defaults.volatility),
            volume: read("SIGNALSCOPE_WEIGHT_VOLUME", defaults.volume),
            custom: read("SIGNALSCOPE_WEIGHT_CUSTOM", defaults.custom),
        }
    }

    /// Get weight for a category; context categories share the custom weight
    pub fn get(&self, category: IndicatorCategory) -> f64 {
        match category {
            IndicatorCategory::Trend => self.trend,
            IndicatorCategory::Momentum => self.momentum,
            IndicatorCategory::Volatility => self.volatility,
            IndicatorCategory::Volume => self.volume,
            IndicatorCategory::Custom
            | IndicatorCategory::OnChain
            | IndicatorCategory::Sentiment
            | IndicatorCategory::Correlation => self.custom,
        }
    }

    /// Verify weights sum to 1.0
    pub fn verify(&self) -> bool {
        (self.trend + self.momentum + self.volatility + self.volume + self.custom - 1.0).abs() < 0.001
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub category_weights: CategoryWeights,
    /// Upper bound on a single provider call.
    pub provider_timeout_secs: u64,
    pub benchmark_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            category_weights: CategoryWeights::default(),
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            benchmark_symbol: DEFAULT_BENCHMARK_SYMBOL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let environment = get_environment();
        Self {
            environment,
            category_weights: CategoryWeights::from_env(),
            provider_timeout_secs: env_parse("SIGNALSCOPE_PROVIDER_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            benchmark_symbol: env::var("SIGNALSCOPE_BENCHMARK_SYMBOL")
                .unwrap_or_else(|_| DEFAULT_BENCHMARK_SYMBOL.to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

/// Standard run list: one config per indicator, keyed by display name
pub fn default_indicator_configs() -> Vec<IndicatorConfig> {
    IndicatorType::ALL
        .iter()
        .map(|&indicator_type| {
            let config = IndicatorConfig::new(indicator_type.display_name(), indicator_type)
                .with_description(indicator_type.description());
            match indicator_type {
                IndicatorType::Sma | IndicatorType::Ema => config.with_param("period", 20),
                IndicatorType::Rsi => config.with_param("period", 14),
                IndicatorType::Macd => config
                    .with_param("fast", 12)
                    .with_param("slow", 26)
                    .with_param("signal", 9),
                IndicatorType::BollingerBands => {
                    config.with_param("period", 20).with_param("std_dev", 2.0)
                }
                IndicatorType::Stochastic => config
                    .with_param("k_period", 14)
                    .with_param("d_period", 3)
                    .with_param("slowing", 3),
                IndicatorType::Correlation => {
                    config.with_param("period", 30).with_param("benchmark", DEFAULT_BENCHMARK_SYMBOL)
                }
                _ => config,
            }
        })
        .collect()
}
