//! Unit tests for snapshot building and aggregation

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use signalscope::indicators::IndicatorType;
use signalscope::models::indicators::{IndicatorValue, MultiIndicatorSnapshot};
use signalscope::signals::aggregation::{aggregate_latest, aggregate_previous, build_snapshots};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

#[test]
fn test_latest_takes_max_timestamp() {
    let snapshots = vec![
        MultiIndicatorSnapshot::empty(at(1)).with_value("RSI", 40.0),
        MultiIndicatorSnapshot::empty(at(3)).with_value("RSI", 55.0),
        MultiIndicatorSnapshot::empty(at(2)).with_value("MACD", 1.5),
    ];
    let latest = aggregate_latest(&snapshots);
    assert_eq!(latest.timestamp, at(3));
    assert_eq!(latest.get("RSI"), Some(55.0));
    // first sighting is kept even though it arrived out of order
    assert_eq!(latest.get("MACD"), Some(1.5));
}

#[test]
fn test_stale_snapshot_does_not_overwrite() {
    let snapshots = vec![
        MultiIndicatorSnapshot::empty(at(5)).with_value("RSI", 70.0),
        MultiIndicatorSnapshot::empty(at(4)).with_value("RSI", 20.0),
    ];
    assert_eq!(aggregate_latest(&snapshots).get("RSI"), Some(70.0));
}

#[test]
fn test_latest_empty_input() {
    let latest = aggregate_latest(&[]);
    assert!(latest.is_empty());
}

#[test]
fn test_previous_excludes_last_snapshot() {
    let snapshots = vec![
        MultiIndicatorSnapshot::empty(at(1)).with_value("RSI", 40.0),
        MultiIndicatorSnapshot::empty(at(2)).with_value("RSI", 45.0),
        MultiIndicatorSnapshot::empty(at(3)).with_value("RSI", 50.0),
    ];
    let previous = aggregate_previous(&snapshots).unwrap();
    assert_eq!(previous.timestamp, at(2));
    assert_eq!(previous.get("RSI"), Some(45.0));
}

#[test]
fn test_previous_needs_two_snapshots() {
    let snapshots = vec![MultiIndicatorSnapshot::empty(at(1)).with_value("RSI", 40.0)];
    assert!(aggregate_previous(&snapshots).is_none());
    assert!(aggregate_previous(&[]).is_none());
}

#[test]
fn test_mixed_timezones_are_normalized() {
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    // 10:00 in Tokyo is 01:00 UTC
    let aware = tokyo.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let naive = at(2).naive_utc();

    let snapshots = vec![
        MultiIndicatorSnapshot::empty(naive).with_value("SMA", 2.0),
        MultiIndicatorSnapshot::empty(aware).with_value("SMA", 1.0),
    ];
    let latest = aggregate_latest(&snapshots);
    assert_eq!(latest.timestamp, at(2));
    assert_eq!(latest.get("SMA"), Some(2.0));
}

#[test]
fn test_build_snapshots_groups_by_timestamp() {
    let rsi = vec![
        IndicatorValue::new(IndicatorType::Rsi, "RSI(14)", at(1), 45.0),
        IndicatorValue::new(IndicatorType::Rsi, "RSI(14)", at(2), 52.0),
    ];
    let sma = vec![
        IndicatorValue::new(IndicatorType::Sma, "SMA(20)", at(2), 101.0),
        IndicatorValue::new(IndicatorType::Sma, "SMA(20)", at(3), f64::NAN),
    ];
    let snapshots = build_snapshots(&[("RSI".to_string(), rsi), ("SMA".to_string(), sma)]);

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].timestamp, at(1));
    assert_eq!(snapshots[1].get("RSI"), Some(52.0));
    assert_eq!(snapshots[1].get("SMA"), Some(101.0));
}

#[test]
fn test_build_snapshots_sorted_ascending() {
    let values: Vec<IndicatorValue> = (0..5)
        .rev()
        .map(|i| IndicatorValue::new(IndicatorType::Obv, "OBV", at(0) + Duration::hours(i), i as f64))
        .collect();
    let snapshots = build_snapshots(&[("OBV".to_string(), values)]);
    assert!(snapshots.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}
