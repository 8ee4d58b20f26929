//! Process-wide entry point: registry, providers and analysis engine.

use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{IndicatorDescriptor, IndicatorRegistry, IndicatorType};
use crate::models::indicators::{Candle, IndicatorConfig, IndicatorValue, MultiIndicatorSnapshot};
use crate::models::signal::AnalysisReport;
use crate::services::market_data::{MarketDataProvider, MetricProvider, ProviderError};
use crate::signals::aggregation::build_snapshots;
use crate::signals::engine::AnalysisEngine;

pub const DEFAULT_HISTORY_PERIOD: &str = "1y";
pub const DEFAULT_INTERVAL: &str = "1d";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Owns the registry and engine; constructed once and passed around.
pub struct IndicatorService {
    registry: IndicatorRegistry,
    engine: AnalysisEngine,
    config: Config,
    market_data: Option<Arc<dyn MarketDataProvider>>,
    metrics: Option<Arc<dyn MetricProvider>>,
}

impl IndicatorService {
    pub fn new(config: Config) -> Self {
        let registry = IndicatorRegistry::new();
        let engine = AnalysisEngine::from_registry(&registry, &config.category_weights);
        Self {
            registry,
            engine,
            config,
            market_data: None,
            metrics: None,
        }
    }

    pub fn with_market_data(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        self.market_data = Some(provider);
        self
    }

    pub fn with_metric_provider(mut self, provider: Arc<dyn MetricProvider>) -> Self {
        self.metrics = Some(provider);
        self
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list_supported_indicators(&self) -> Vec<IndicatorDescriptor> {
        self.registry.descriptors()
    }

    /// Run one indicator over candles with estimated fallbacks only.
    pub fn compute(
        &self,
        indicator_type: IndicatorType,
        candles: &[Candle],
        parameters: &Map<String, Value>,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let params = IndicatorParams::from_map(parameters.clone());
        self.calculate(indicator_type, candles, &params)
    }

    /// Run one indicator, first asking the providers for its metric or benchmark series.
    ///
    /// Provider failures never fail the call; the indicator computes its
    /// estimate instead.
    pub async fn compute_with_providers(
        &self,
        indicator_type: IndicatorType,
        candles: &[Candle],
        parameters: &Map<String, Value>,
    ) -> Result<Vec<IndicatorValue>, ServiceError> {
        let params = self
            .resolve_params(
                indicator_type,
                candles,
                parameters,
                DEFAULT_HISTORY_PERIOD,
                DEFAULT_INTERVAL,
            )
            .await?;
        Ok(self.calculate(indicator_type, candles, &params)?)
    }

    /// Run every active config and group the results into snapshots.
    ///
    /// A config that fails is logged and skipped.
    pub fn compute_snapshots(
        &self,
        candles: &[Candle],
        configs: &[IndicatorConfig],
    ) -> Vec<MultiIndicatorSnapshot> {
        let outputs: Vec<(String, Vec<IndicatorValue>)> = configs
            .iter()
            .filter(|config| config.is_active)
            .filter_map(|config| {
                let params = IndicatorParams::from_map(config.parameters.clone());
                self.run_config(config, candles, &params)
            })
            .collect();
        build_snapshots(&outputs)
    }

    /// Full pipeline over caller-supplied candles; `current_price` is the last close.
    pub fn analyze_candles(
        &self,
        candles: &[Candle],
        configs: &[IndicatorConfig],
    ) -> Option<AnalysisReport> {
        let current_price = candles.last()?.close;
        let snapshots = self.compute_snapshots(candles, configs);
        self.engine.analyze(&snapshots, current_price)
    }

    /// Fetch candles for `symbol` and run the full pipeline with provider data.
    pub async fn analyze_symbol(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
        configs: &[IndicatorConfig],
    ) -> Result<Option<AnalysisReport>, ServiceError> {
        let provider = self
            .market_data
            .as_ref()
            .ok_or_else(|| ProviderError::Unavailable("no market data provider".to_string()))?;
        let candles = self
            .with_timeout(provider.get_price_history(symbol, period, interval))
            .await?;
        info!(symbol = %symbol, candles = candles.len(), "Fetched price history");

        let Some(current_price) = candles.last().map(|c| c.close) else {
            warn!(symbol = %symbol, "Empty price history");
            return Ok(None);
        };

        let mut outputs = Vec::new();
        for config in configs.iter().filter(|config| config.is_active) {
            let params = match self
                .resolve_params(config.indicator_type, &candles, &config.parameters, period, interval)
                .await
            {
                Ok(params) => params,
                Err(e) => {
                    warn!(indicator = %config.name, error = %e, "Skipping indicator");
                    continue;
                }
            };
            if let Some(output) = self.run_config(config, &candles, &params) {
                outputs.push(output);
            }
        }

        let snapshots = build_snapshots(&outputs);
        Ok(self.engine.analyze(&snapshots, current_price))
    }

    fn calculate(
        &self,
        indicator_type: IndicatorType,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let indicator = self.registry.get(indicator_type)?;
        let values = indicator.calculate(candles, params)?;
        if values.is_empty() {
            debug!(
                indicator = %indicator_type,
                candles = candles.len(),
                "Insufficient data for indicator"
            );
        }
        Ok(values)
    }

    fn run_config(
        &self,
        config: &IndicatorConfig,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Option<(String, Vec<IndicatorValue>)> {
        match self.calculate(config.indicator_type, candles, params) {
            Ok(values) => Some((config.name.clone(), values)),
            Err(e) => {
                warn!(indicator = %config.name, error = %e, "Skipping indicator");
                None
            }
        }
    }

    /// Attach provider series to the parameters where the indicator can use them.
    async fn resolve_params(
        &self,
        indicator_type: IndicatorType,
        candles: &[Candle],
        parameters: &Map<String, Value>,
        period: &str,
        interval: &str,
    ) -> Result<IndicatorParams, IndicatorError> {
        let mut params = IndicatorParams::from_map(parameters.clone());

        if let (Some(kind), Some(provider)) = (indicator_type.metric_kind(), self.metrics.as_ref()) {
            let window = candles.len().max(1);
            match self.with_timeout(provider.fetch_metric(kind, window)).await {
                Ok(series) if !series.is_empty() => {
                    debug!(indicator = %indicator_type, points = series.len(), "Using provider metric");
                    params = params.with_metric_series(series);
                }
                Ok(_) => {
                    warn!(indicator = %indicator_type, "Provider returned no data, using estimate");
                }
                Err(e) => {
                    warn!(indicator = %indicator_type, error = %e, "Provider failed, using estimate");
                }
            }
        }

        if indicator_type.needs_benchmark() {
            if let Some(provider) = self.market_data.as_ref() {
                let symbol = params.str_or("benchmark", &self.config.benchmark_symbol)?;
                let fetched = self
                    .with_timeout(provider.get_price_history(&symbol, period, interval))
                    .await;
                match fetched {
                    Ok(benchmark) if !benchmark.is_empty() => {
                        params = params.with("benchmark", symbol).with_benchmark(benchmark);
                    }
                    Ok(_) => {
                        warn!(indicator = %indicator_type, benchmark = %symbol, "Empty benchmark history, using estimate");
                    }
                    Err(e) => {
                        warn!(indicator = %indicator_type, benchmark = %symbol, error = %e, "Benchmark fetch failed, using estimate");
                    }
                }
            }
        }

        Ok(params)
    }

    async fn with_timeout<T, F>(&self, future: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let secs = self.config.provider_timeout_secs;
        match tokio::time::timeout(Duration::from_secs(secs), future).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(secs)),
        }
    }
}

impl Default for IndicatorService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
