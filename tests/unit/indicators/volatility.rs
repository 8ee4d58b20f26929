//! Unit tests for volatility indicators

use chrono::{DateTime, Duration, TimeZone, Utc};
use signalscope::indicators::volatility::{
    calculate_atr, calculate_bollinger_bands, calculate_bollinger_bands_default,
    calculate_donchian_channel, calculate_implied_volatility, calculate_keltner_channel,
    calculate_realized_volatility, implied_volatility_from_metric, true_ranges, VolatilityMethod,
};
use signalscope::models::indicators::{Candle, MetricPoint};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn create_test_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(close, close + 1.0, close - 1.0, close, 1000.0, start() + Duration::days(i as i64))
        })
        .collect()
}

fn zigzag(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

fn param(value: &signalscope::IndicatorValue, key: &str) -> f64 {
    value.parameters[key].as_f64().unwrap()
}

#[test]
fn test_bollinger_band_ordering() {
    let candles = create_test_candles(&zigzag(60));
    let values = calculate_bollinger_bands_default(&candles);
    assert_eq!(values.len(), 41);
    for v in &values {
        assert!(param(v, "upper") >= v.value);
        assert!(v.value >= param(v, "lower"));
    }
}

#[test]
fn test_bollinger_constant_series_collapses() {
    let candles = create_test_candles(&[50.0; 20]);
    let last = calculate_bollinger_bands(&candles, 20, 2.0).pop().unwrap();
    assert_eq!(param(&last, "upper"), 50.0);
    assert_eq!(param(&last, "lower"), 50.0);
    assert_eq!(param(&last, "bandwidth"), 0.0);
}

#[test]
fn test_bollinger_insufficient_data() {
    let candles = create_test_candles(&zigzag(19));
    assert!(calculate_bollinger_bands_default(&candles).is_empty());
}

#[test]
fn test_true_ranges_use_previous_close() {
    let candles = vec![
        Candle::new(10.0, 11.0, 9.0, 10.0, 1.0, start()),
        Candle::new(14.0, 15.0, 13.0, 14.0, 1.0, start() + Duration::days(1)),
    ];
    assert_eq!(true_ranges(&candles), vec![2.0, 5.0]);
}

#[test]
fn test_atr_constant_range() {
    let candles = create_test_candles(&[100.0; 30]);
    let values = calculate_atr(&candles, 14);
    assert_eq!(values.len(), 30);
    assert!(values.iter().all(|v| (v.value - 2.0).abs() < 1e-6));
}

#[test]
fn test_atr_insufficient_data() {
    let candles = create_test_candles(&[100.0; 14]);
    assert!(calculate_atr(&candles, 14).is_empty());
}

#[test]
fn test_keltner_band_ordering() {
    let candles = create_test_candles(&zigzag(40));
    for v in calculate_keltner_channel(&candles, 20, 2.0) {
        assert!(param(&v, "upper") > v.value);
        assert!(v.value > param(&v, "lower"));
    }
}

#[test]
fn test_donchian_channel() {
    let candles = create_test_candles(&[10.0, 12.0, 11.0, 15.0, 13.0]);
    let values = calculate_donchian_channel(&candles, 3);
    assert_eq!(values.len(), 3);
    let last = values.last().unwrap();
    assert_eq!(param(last, "upper"), 16.0);
    assert_eq!(param(last, "lower"), 10.0);
    assert_eq!(last.value, 13.0);
}

#[test]
fn test_realized_volatility_geometric_series_is_zero() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let candles = create_test_candles(&closes);
    let values = calculate_realized_volatility(&candles, 20, VolatilityMethod::CloseToClose);
    assert!(!values.is_empty());
    assert!(values.iter().all(|v| v.value == 0.0));
    assert_eq!(values[0].name, "Realized Volatility (%)");
}

#[test]
fn test_realized_volatility_estimators() {
    let candles = create_test_candles(&zigzag(60));
    for method in [
        VolatilityMethod::CloseToClose,
        VolatilityMethod::Parkinson,
        VolatilityMethod::GarmanKlass,
    ] {
        let values = calculate_realized_volatility(&candles, 20, method);
        assert!(!values.is_empty(), "no output for {:?}", method);
        let last = values.last().unwrap();
        assert!(last.value > 0.0 && last.value.is_finite());
        assert_eq!(last.parameters["method"], method.as_str());
    }
}

#[test]
fn test_volatility_method_parsing() {
    assert_eq!("high_low".parse::<VolatilityMethod>().unwrap(), VolatilityMethod::Parkinson);
    assert_eq!("OHLC".parse::<VolatilityMethod>().unwrap(), VolatilityMethod::GarmanKlass);
    assert!("yang_zhang".parse::<VolatilityMethod>().is_err());
}

#[test]
fn test_implied_volatility_estimate_is_tagged() {
    let candles = create_test_candles(&zigzag(40));
    let last = calculate_implied_volatility(&candles, 20).pop().unwrap();
    assert_eq!(last.parameters["estimated"], true);
    assert_eq!(last.parameters["method"], "price_changes");
}

#[test]
fn test_implied_volatility_from_metric() {
    let series = vec![
        MetricPoint::new(start(), 55.123),
        MetricPoint::new(start() + Duration::days(1), f64::NAN),
    ];
    let values = implied_volatility_from_metric(&series);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, 55.12);
    assert_eq!(values[0].parameters["source"], "provider");
}
