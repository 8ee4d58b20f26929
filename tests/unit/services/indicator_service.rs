//! Unit tests for the indicator service and its provider fallbacks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Map, Value};
use signalscope::config::{default_indicator_configs, Config};
use signalscope::indicators::{IndicatorError, IndicatorType};
use signalscope::models::indicators::{Candle, IndicatorConfig, MetricKind, MetricPoint};
use signalscope::services::{
    IndicatorService, MarketDataProvider, MetricProvider, ProviderError, ServiceError,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn create_test_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3;
            Candle::new(close - 0.2, close + 1.0, close - 1.0, close, 1000.0 + i as f64 * 5.0, start() + Duration::days(i as i64))
        })
        .collect()
}

struct StaticMarketData {
    candles: Vec<Candle>,
    calls: AtomicUsize,
}

impl StaticMarketData {
    fn new(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn get_price_history(
        &self,
        _symbol: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<Candle>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candles.clone())
    }
}

struct StaticMetrics;

#[async_trait]
impl MetricProvider for StaticMetrics {
    async fn fetch_metric(&self, kind: MetricKind, _window: usize) -> Result<Vec<MetricPoint>, ProviderError> {
        match kind {
            MetricKind::HashRate => Ok(vec![
                MetricPoint::new(start(), 4.0e14),
                MetricPoint::new(start() + Duration::days(1), 5.0e14),
            ]),
            MetricKind::FearGreed => Ok(vec![MetricPoint::new(start(), 15.0)]),
            _ => Ok(Vec::new()),
        }
    }
}

struct FailingMetrics;

#[async_trait]
impl MetricProvider for FailingMetrics {
    async fn fetch_metric(&self, _kind: MetricKind, _window: usize) -> Result<Vec<MetricPoint>, ProviderError> {
        Err(ProviderError::Unavailable("metrics backend down".to_string()))
    }
}

struct SlowMetrics;

#[async_trait]
impl MetricProvider for SlowMetrics {
    async fn fetch_metric(&self, _kind: MetricKind, _window: usize) -> Result<Vec<MetricPoint>, ProviderError> {
        tokio::time::sleep(StdDuration::from_millis(200)).await;
        Ok(vec![MetricPoint::new(start(), 1.0e15)])
    }
}

fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn test_lists_every_indicator() {
    let service = IndicatorService::default();
    let supported = service.list_supported_indicators();
    assert_eq!(supported.len(), 29);
    assert!(supported.iter().any(|d| d.name == "Fear & Greed Index"));
}

#[test]
fn test_compute_with_parameters() {
    let service = IndicatorService::default();
    let candles = create_test_candles(40);
    let values = service
        .compute(IndicatorType::Sma, &candles, &params(&[("period", json!(10))]))
        .unwrap();
    assert_eq!(values.len(), 31);
    assert_eq!(values[0].name, "SMA(10)");
}

#[test]
fn test_compute_insufficient_data_is_empty() {
    let service = IndicatorService::default();
    let candles = create_test_candles(5);
    let values = service.compute(IndicatorType::Rsi, &candles, &Map::new()).unwrap();
    assert!(values.is_empty());
}

#[test]
fn test_unknown_type_name_is_rejected() {
    let service = IndicatorService::default();
    assert!(matches!(
        service.registry().get_by_name("heikin_ashi"),
        Err(IndicatorError::UnsupportedIndicator(_))
    ));
}

#[test]
fn test_compute_reports_bad_parameters() {
    let service = IndicatorService::default();
    let candles = create_test_candles(40);
    let result = service.compute(IndicatorType::Rsi, &candles, &params(&[("period", json!("fourteen"))]));
    assert!(matches!(result, Err(IndicatorError::InvalidNumericFormat(_))));
}

#[tokio::test]
async fn test_provider_metric_is_used() {
    let service = IndicatorService::default().with_metric_provider(Arc::new(StaticMetrics));
    let candles = create_test_candles(30);
    let values = service
        .compute_with_providers(IndicatorType::HashRate, &candles, &Map::new())
        .await
        .unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[1].value, 500.0);
    assert_eq!(values[1].parameters["source"], "provider");
}

#[test]
fn test_provider_fear_greed_blocking() {
    let service = IndicatorService::default().with_metric_provider(Arc::new(StaticMetrics));
    let candles = create_test_candles(30);
    let values = tokio_test::block_on(service.compute_with_providers(
        IndicatorType::FearGreedIndex,
        &candles,
        &Map::new(),
    ))
    .unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, 15.0);
    assert_eq!(values[0].parameters["classification"], "Extreme Fear");
}

#[tokio::test]
async fn test_empty_provider_series_falls_back_to_estimate() {
    let service = IndicatorService::default().with_metric_provider(Arc::new(StaticMetrics));
    let candles = create_test_candles(30);
    let values = service
        .compute_with_providers(IndicatorType::FundingRate, &candles, &Map::new())
        .await
        .unwrap();
    assert!(!values.is_empty());
    assert!(values.iter().all(|v| v.parameters["estimated"] == true));
}

#[tokio::test]
async fn test_failing_provider_falls_back_to_estimate() {
    let service = IndicatorService::default().with_metric_provider(Arc::new(FailingMetrics));
    let candles = create_test_candles(30);
    let values = service
        .compute_with_providers(IndicatorType::HashRate, &candles, &Map::new())
        .await
        .unwrap();
    let last = values.last().unwrap();
    assert_eq!(last.name, "Estimated Hash Rate (TH/s)");
    assert_eq!(last.parameters["method"], "price_based");
    assert_eq!(last.parameters["estimated"], true);
}

#[tokio::test]
async fn test_slow_provider_times_out_to_estimate() {
    let config = Config {
        provider_timeout_secs: 0,
        ..Config::default()
    };
    let service = IndicatorService::new(config).with_metric_provider(Arc::new(SlowMetrics));
    let candles = create_test_candles(30);
    let values = service
        .compute_with_providers(IndicatorType::HashRate, &candles, &Map::new())
        .await
        .unwrap();
    assert_eq!(values.last().unwrap().parameters["estimated"], true);
}

#[tokio::test]
async fn test_correlation_uses_benchmark_history() {
    let candles = create_test_candles(40);
    let market = Arc::new(StaticMarketData::new(candles.clone()));
    let service = IndicatorService::default().with_market_data(market.clone());

    let values = service
        .compute_with_providers(IndicatorType::Correlation, &candles, &params(&[("benchmark", json!("QQQ"))]))
        .await
        .unwrap();
    assert_eq!(market.calls.load(Ordering::SeqCst), 1);
    assert_eq!(values.last().unwrap().name, "Correlation vs QQQ");
    assert_eq!(values.last().unwrap().value, 1.0);
}

#[tokio::test]
async fn test_correlation_without_market_data_is_estimated() {
    let service = IndicatorService::default();
    let candles = create_test_candles(40);
    let values = service
        .compute_with_providers(IndicatorType::Correlation, &candles, &Map::new())
        .await
        .unwrap();
    assert_eq!(values.last().unwrap().name, "Estimated Correlation");
}

#[test]
fn test_compute_snapshots_skips_broken_configs() {
    let service = IndicatorService::default();
    let candles = create_test_candles(40);
    let configs = vec![
        IndicatorConfig::new("RSI", IndicatorType::Rsi),
        IndicatorConfig::new("SMA", IndicatorType::Sma).with_param("period", 0),
        IndicatorConfig::new("EMA", IndicatorType::Ema).inactive(),
    ];
    let snapshots = service.compute_snapshots(&candles, &configs);
    assert!(!snapshots.is_empty());
    assert!(snapshots.iter().all(|s| s.get("SMA").is_none() && s.get("EMA").is_none()));
    assert_eq!(snapshots.last().unwrap().timestamp, candles.last().unwrap().timestamp);
}

#[test]
fn test_analyze_candles_full_pipeline() {
    let service = IndicatorService::default();
    let candles = create_test_candles(120);
    let report = service.analyze_candles(&candles, &default_indicator_configs()).unwrap();

    assert_eq!(report.current_price, candles.last().unwrap().close);
    assert_eq!(report.timestamp, candles.last().unwrap().timestamp);
    assert!(report.indicator_states.contains_key("RSI"));
    assert!(report.indicator_states.contains_key("Fear & Greed Index"));
    assert!((0.0..=100.0).contains(&report.trading_scores.buy_score));
    assert!((0.0..=100.0).contains(&report.trading_scores.sell_score));
}

#[test]
fn test_oversized_period_does_not_abort_analysis() {
    let service = IndicatorService::default();
    let candles = create_test_candles(100);
    let mut configs = default_indicator_configs();
    configs.push(IndicatorConfig::new("RSI big", IndicatorType::Rsi).with_param("period", u64::MAX));

    let report = service.analyze_candles(&candles, &configs).unwrap();
    assert!(report.indicator_states.contains_key("RSI"));
    assert!(!report.indicator_states.contains_key("RSI big"));
}

#[tokio::test]
async fn test_provider_series_needs_enough_candles() {
    let service = IndicatorService::default().with_metric_provider(Arc::new(StaticMetrics));
    let candles = create_test_candles(3);
    let values = service
        .compute_with_providers(IndicatorType::FearGreedIndex, &candles, &Map::new())
        .await
        .unwrap();
    assert!(values.is_empty());
}

#[test]
fn test_analyze_candles_without_data() {
    let service = IndicatorService::default();
    assert!(service.analyze_candles(&[], &default_indicator_configs()).is_none());
}

#[tokio::test]
async fn test_analyze_symbol_requires_market_data() {
    let service = IndicatorService::default();
    let result = service
        .analyze_symbol("BTC-USD", "1y", "1d", &default_indicator_configs())
        .await;
    assert!(matches!(result, Err(ServiceError::Provider(ProviderError::Unavailable(_)))));
}

#[tokio::test]
async fn test_analyze_symbol_with_providers() {
    let candles = create_test_candles(120);
    let service = IndicatorService::default()
        .with_market_data(Arc::new(StaticMarketData::new(candles.clone())))
        .with_metric_provider(Arc::new(StaticMetrics));

    let report = service
        .analyze_symbol("BTC-USD", "6mo", "1d", &default_indicator_configs())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.current_price, candles.last().unwrap().close);
    assert!(report.indicator_states.contains_key("Correlation"));
}

#[tokio::test]
async fn test_analyze_symbol_empty_history() {
    let service = IndicatorService::default().with_market_data(Arc::new(StaticMarketData::new(Vec::new())));
    let report = service
        .analyze_symbol("BTC-USD", "1y", "1d", &default_indicator_configs())
        .await
        .unwrap();
    assert!(report.is_none());
}
