//! Unit tests for volume indicators

use chrono::{DateTime, Duration, TimeZone, Utc};
use signalscope::indicators::volume::{calculate_etf_flow, calculate_obv, calculate_vwap, etf_flow_from_metric};
use signalscope::models::indicators::{Candle, MetricPoint};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn candle(i: i64, close: f64, volume: f64) -> Candle {
    Candle::new(close, close + 1.0, close - 1.0, close, volume, start() + Duration::days(i))
}

#[test]
fn test_obv_accumulates_by_direction() {
    let candles = vec![
        candle(0, 10.0, 100.0),
        candle(1, 11.0, 50.0),
        candle(2, 10.5, 30.0),
        candle(3, 10.5, 70.0),
    ];
    let values: Vec<f64> = calculate_obv(&candles).iter().map(|v| v.value).collect();
    assert_eq!(values, vec![100.0, 150.0, 120.0, 120.0]);
}

#[test]
fn test_obv_needs_two_candles() {
    assert!(calculate_obv(&[candle(0, 10.0, 100.0)]).is_empty());
}

#[test]
fn test_vwap_weights_by_volume() {
    let candles = vec![candle(0, 10.0, 100.0), candle(1, 20.0, 300.0)];
    let values = calculate_vwap(&candles, 2);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, 17.5);
}

#[test]
fn test_vwap_zero_volume_falls_back_to_typical_price() {
    let candles = vec![candle(0, 10.0, 0.0), candle(1, 20.0, 0.0)];
    assert_eq!(calculate_vwap(&candles, 2)[0].value, 15.0);
}

#[test]
fn test_etf_flow_estimate() {
    let candles: Vec<Candle> = (0..30).map(|i| candle(i, 100.0 + i as f64, 1000.0)).collect();
    let values = calculate_etf_flow(&candles, 20);
    let last = values.last().unwrap();
    // 129 over 128
    assert_eq!(last.value, 0.78);
    assert_eq!(last.parameters["estimated"], true);
    assert!(last.parameters.contains_key("strength"));
    assert!(last.parameters.contains_key("change_ma"));
}

#[test]
fn test_etf_flow_from_metric() {
    let series = vec![MetricPoint::new(start(), -1250.456)];
    let values = etf_flow_from_metric(&series);
    assert_eq!(values[0].value, -1250.46);
    assert_eq!(values[0].parameters["source"], "provider");
}
