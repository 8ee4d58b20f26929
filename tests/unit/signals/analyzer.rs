//! Unit tests for indicator state classification

use chrono::{TimeZone, Utc};
use signalscope::config::CategoryWeights;
use signalscope::indicators::{IndicatorCategory, IndicatorRegistry};
use signalscope::models::indicators::MultiIndicatorSnapshot;
use signalscope::models::signal::{SignalClass, Status};
use signalscope::signals::analyzer::{StateAnalyzer, ThresholdRule};
use signalscope::signals::categories::{ContextIndicator, WeightTable};

fn analyzer() -> StateAnalyzer {
    StateAnalyzer::new(WeightTable::from_registry(&IndicatorRegistry::new(), &CategoryWeights::default()))
}

fn snapshot(hour: u32, values: &[(&str, f64)]) -> MultiIndicatorSnapshot {
    values.iter().fold(
        MultiIndicatorSnapshot::empty(Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()),
        |s, (name, value)| s.with_value(*name, *value),
    )
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_baseline_from_change() {
    let latest = snapshot(2, &[("SMA", 110.0)]);
    let previous = snapshot(1, &[("SMA", 100.0)]);
    let states = analyzer().analyze(&latest, Some(&previous), 110.0);
    let sma = &states["SMA"];
    assert_eq!(sma.status, Status::Up);
    assert_eq!(sma.signal, SignalClass::Bullish);
    assert!(approx(sma.change, 10.0));
    assert!(approx(sma.change_pct, 10.0));
    assert!(approx(sma.strength, 1.0));
    assert!(approx(sma.weight, 0.30));
    assert_eq!(sma.category, IndicatorCategory::Trend);
}

#[test]
fn test_small_decline_is_weak_bearish() {
    let latest = snapshot(2, &[("OBV", 98.0)]);
    let previous = snapshot(1, &[("OBV", 100.0)]);
    let obv = &analyzer().analyze(&latest, Some(&previous), 0.0)["OBV"];
    assert_eq!(obv.status, Status::Down);
    assert_eq!(obv.signal, SignalClass::Bearish);
    assert!(approx(obv.strength, 0.2));
}

#[test]
fn test_no_previous_is_neutral() {
    let states = analyzer().analyze(&snapshot(1, &[("EMA", 50.0)]), None, 50.0);
    let ema = &states["EMA"];
    assert_eq!(ema.status, Status::Neutral);
    assert_eq!(ema.signal, SignalClass::Neutral);
    assert_eq!(ema.change, 0.0);
    assert_eq!(ema.change_pct, 0.0);
}

#[test]
fn test_zero_previous_has_no_percent_change() {
    let latest = snapshot(2, &[("ATR", 5.0)]);
    let previous = snapshot(1, &[("ATR", 0.0)]);
    let atr = &analyzer().analyze(&latest, Some(&previous), 0.0)["ATR"];
    assert_eq!(atr.change, 5.0);
    assert_eq!(atr.change_pct, 0.0);
}

#[test]
fn test_rsi_overbought_overrides_direction() {
    let latest = snapshot(2, &[("RSI", 75.0)]);
    let previous = snapshot(1, &[("RSI", 80.0)]);
    let rsi = &analyzer().analyze(&latest, Some(&previous), 0.0)["RSI"];
    assert_eq!(rsi.status, Status::Down);
    assert_eq!(rsi.signal, SignalClass::Overbought);
    assert!(approx(rsi.strength, 5.0 / 30.0));
}

#[test]
fn test_rsi_in_range_keeps_baseline() {
    let latest = snapshot(2, &[("RSI", 55.0)]);
    let previous = snapshot(1, &[("RSI", 50.0)]);
    let rsi = &analyzer().analyze(&latest, Some(&previous), 0.0)["RSI"];
    assert_eq!(rsi.signal, SignalClass::Bullish);
    assert!(approx(rsi.strength, 1.0));
}

#[test]
fn test_threshold_rules() {
    let (signal, strength) = ThresholdRule::Rsi.apply(10.0).unwrap();
    assert_eq!(signal, SignalClass::Oversold);
    assert!(approx(strength, 20.0 / 30.0));

    let (signal, strength) = ThresholdRule::Stochastic.apply(95.0).unwrap();
    assert_eq!(signal, SignalClass::Overbought);
    assert!(approx(strength, 0.75));

    assert_eq!(ThresholdRule::WilliamsR.apply(-90.0).unwrap().0, SignalClass::Oversold);
    assert_eq!(ThresholdRule::WilliamsR.apply(-50.0), None);
    assert!(approx(ThresholdRule::Cci.apply(-400.0).unwrap().1, 1.0));
    assert_eq!(ThresholdRule::MoneyFlowIndex.apply(85.0).unwrap().0, SignalClass::Overbought);

    assert_eq!(ThresholdRule::Adx.apply(50.0), Some((SignalClass::StrongTrend, 1.0)));
    let (signal, strength) = ThresholdRule::Adx.apply(20.0).unwrap();
    assert_eq!(signal, SignalClass::WeakTrend);
    assert!(approx(strength, 0.8));

    assert_eq!(ThresholdRule::Macd.apply(500.0), Some((SignalClass::Bullish, 0.5)));
    assert_eq!(ThresholdRule::Macd.apply(-2500.0), Some((SignalClass::Bearish, 1.0)));
}

#[test]
fn test_rule_lookup_by_display_name() {
    assert_eq!(ThresholdRule::for_name("Williams %R"), Some(ThresholdRule::WilliamsR));
    assert_eq!(ThresholdRule::for_name("Money Flow Index"), Some(ThresholdRule::MoneyFlowIndex));
    assert_eq!(ThresholdRule::for_name("SMA"), None);
}

#[test]
fn test_fear_greed_is_context_only() {
    let latest = snapshot(2, &[("Fear & Greed Index", 15.0)]);
    let previous = snapshot(1, &[("Fear & Greed Index", 30.0)]);
    let states = analyzer().analyze(&latest, Some(&previous), 0.0);
    let fg = &states["Fear & Greed Index"];
    assert_eq!(fg.signal, SignalClass::Neutral);
    assert_eq!(fg.status, Status::Down);
    assert!(approx(fg.strength, 0.7));
    assert!(approx(fg.weight, 0.5));
    assert_eq!(fg.category, IndicatorCategory::Sentiment);
}

#[test]
fn test_context_names_match_case_insensitively() {
    let latest = snapshot(1, &[("realized volatility", 45.0), ("CORRELATION", -0.8)]);
    let states = analyzer().analyze(&latest, None, 0.0);
    assert!(approx(states["Realized Volatility"].strength, 0.45));
    assert!(approx(states["Correlation"].strength, 0.8));
    assert!(states.values().all(|s| s.signal == SignalClass::Neutral));
}

#[test]
fn test_context_strengths() {
    assert!(approx(ContextIndicator::HashRate.strength(500.0, 5.0), 0.5));
    assert!(approx(ContextIndicator::ActiveAddresses.strength(1e6, -30.0), 1.0));
    assert!(approx(ContextIndicator::RealizedVolatility.strength(250.0, 0.0), 1.0));
    assert_eq!(ContextIndicator::from_name("fear & greed index"), Some(ContextIndicator::FearGreed));
    assert_eq!(ContextIndicator::from_name("RSI"), None);
}

#[test]
fn test_unknown_and_non_finite_values_are_skipped() {
    let latest = snapshot(1, &[("Mystery Oscillator", 1.0), ("SMA", f64::NAN), ("EMA", 10.0)]);
    let states = analyzer().analyze(&latest, None, 0.0);
    assert_eq!(states.len(), 1);
    assert!(states.contains_key("EMA"));
}
