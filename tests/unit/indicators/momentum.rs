//! Unit tests for momentum indicators

use chrono::{DateTime, Duration, TimeZone, Utc};
use signalscope::indicators::momentum::{
    calculate_cci, calculate_macd, calculate_macd_default, calculate_money_flow_index,
    calculate_rate_of_change, calculate_rsi, calculate_stochastic, calculate_williams_r,
    rsi_from_averages,
};
use signalscope::models::indicators::Candle;

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

fn linear(count: usize, base: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| base + i as f64 * step).collect()
}

fn zigzag(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_rsi_all_gains_saturates() {
    let candles = create_test_candles(&linear(20, 100.0, 1.0));
    let values = calculate_rsi(&candles, 14);
    assert_eq!(values.len(), 6);
    assert!(values.iter().all(|v| v.value == 100.0));
    assert_eq!(values[0].timestamp, candles[14].timestamp);
}

#[test]
fn test_rsi_all_losses() {
    let candles = create_test_candles(&linear(20, 120.0, -1.0));
    let last = calculate_rsi(&candles, 14).pop().unwrap();
    assert_eq!(last.value, 0.0);
}

#[test]
fn test_rsi_flat_window_reads_fifty() {
    let candles = create_test_candles(&[100.0; 20]);
    assert!(calculate_rsi(&candles, 14).iter().all(|v| v.value == 50.0));
}

#[test]
fn test_rsi_bounded() {
    let candles = create_test_candles(&zigzag(80));
    for v in calculate_rsi(&candles, 14) {
        assert!((0.0..=100.0).contains(&v.value), "RSI out of range: {}", v.value);
    }
}

#[test]
fn test_rsi_insufficient_data() {
    let candles = create_test_candles(&linear(14, 100.0, 1.0));
    assert!(calculate_rsi(&candles, 14).is_empty());
}

#[test]
fn test_rsi_from_averages() {
    assert_eq!(rsi_from_averages(1.0, 1.0), 50.0);
    assert_eq!(rsi_from_averages(0.0, 0.0), 50.0);
    assert_eq!(rsi_from_averages(2.0, 0.0), 100.0);
    assert!((rsi_from_averages(3.0, 1.0) - 75.0).abs() < 1e-9);
}

#[test]
fn test_macd_sign_follows_trend() {
    let up = create_test_candles(&linear(60, 100.0, 1.0));
    let down = create_test_candles(&linear(60, 200.0, -1.0));
    assert!(calculate_macd_default(&up).last().unwrap().value > 0.0);
    assert!(calculate_macd_default(&down).last().unwrap().value < 0.0);
}

#[test]
fn test_macd_histogram_param() {
    let candles = create_test_candles(&zigzag(60));
    let last = calculate_macd(&candles, 12, 26, 9).pop().unwrap();
    let signal = last.parameters["signal_value"].as_f64().unwrap();
    let histogram = last.parameters["histogram"].as_f64().unwrap();
    assert!((last.value - signal - histogram).abs() < 1e-5);
    assert_eq!(last.name, "MACD");
}

#[test]
fn test_macd_insufficient_data() {
    let candles = create_test_candles(&linear(20, 100.0, 1.0));
    assert!(calculate_macd_default(&candles).is_empty());
}

#[test]
fn test_stochastic_top_of_range() {
    let candles = create_test_candles(&linear(30, 100.0, 1.0));
    let last = calculate_stochastic(&candles, 14, 3, 3).pop().unwrap();
    // close sits one below the rolling high of a 28-point range
    assert!(last.value > 90.0 && last.value <= 100.0);
    assert!(last.parameters.contains_key("d_value"));
}

#[test]
fn test_stochastic_flat_range() {
    let candles: Vec<Candle> = (0..20)
        .map(|i| Candle::new(50.0, 50.0, 50.0, 50.0, 10.0, start() + Duration::days(i)))
        .collect();
    assert!(calculate_stochastic(&candles, 14, 3, 3).iter().all(|v| v.value == 50.0));
}

#[test]
fn test_williams_r_bounds() {
    let candles = create_test_candles(&zigzag(60));
    for v in calculate_williams_r(&candles, 14) {
        assert!((-100.0..=0.0).contains(&v.value), "Williams %R out of range: {}", v.value);
    }
}

#[test]
fn test_williams_r_flat_range() {
    let candles: Vec<Candle> = (0..15)
        .map(|i| Candle::new(50.0, 50.0, 50.0, 50.0, 10.0, start() + Duration::days(i)))
        .collect();
    assert_eq!(calculate_williams_r(&candles, 14).pop().unwrap().value, -50.0);
}

#[test]
fn test_cci_constant_series_is_zero() {
    let candles = create_test_candles(&[75.0; 25]);
    assert!(calculate_cci(&candles, 20).iter().all(|v| v.value == 0.0));
}

#[test]
fn test_cci_positive_in_uptrend() {
    let candles = create_test_candles(&linear(30, 100.0, 1.0));
    assert!(calculate_cci(&candles, 20).pop().unwrap().value > 0.0);
}

#[test]
fn test_mfi_rising_prices() {
    let candles = create_test_candles(&linear(20, 100.0, 1.0));
    let values = calculate_money_flow_index(&candles, 14);
    assert!(!values.is_empty());
    assert_eq!(values.last().unwrap().value, 100.0);
    assert_eq!(values.last().unwrap().name, "MFI(14)");
}

#[test]
fn test_mfi_without_volume_is_neutral() {
    let candles: Vec<Candle> = create_test_candles(&zigzag(20))
        .into_iter()
        .map(Candle::without_volume)
        .collect();
    assert!(calculate_money_flow_index(&candles, 14).iter().all(|v| v.value == 50.0));
}

#[test]
fn test_rate_of_change() {
    let candles = create_test_candles(&[100.0, 105.0, 110.0, 121.0]);
    let values = calculate_rate_of_change(&candles, 2);
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].value, 10.0);
    assert_eq!(values[1].value, 15.24);
}

#[test]
fn test_rate_of_change_zero_base() {
    let candles = create_test_candles(&[0.0, 5.0]);
    assert_eq!(calculate_rate_of_change(&candles, 1)[0].value, 0.0);
}

#[test]
fn test_huge_windows_yield_nothing() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let candles = create_test_candles(&closes);
    assert!(calculate_rsi(&candles, usize::MAX).is_empty());
    assert!(calculate_rate_of_change(&candles, usize::MAX).is_empty());
    assert!(calculate_money_flow_index(&candles, usize::MAX).is_empty());
    assert!(calculate_stochastic(&candles, usize::MAX, 3, 3).is_empty());
}
