//! Unit tests for buy/sell scoring

use std::collections::BTreeMap;

use signalscope::indicators::{IndicatorCategory, IndicatorType};
use signalscope::models::signal::{IndicatorState, Recommendation, SignalClass, Status};
use signalscope::signals::scoring::{
    calculate_trading_scores, score, signal_from_value, strength_from_value,
};

fn state(name: &str, weight: f64, signal: SignalClass, strength: f64) -> IndicatorState {
    IndicatorState {
        name: name.to_string(),
        value: 0.0,
        weight,
        category: IndicatorCategory::Momentum,
        description: String::new(),
        status: Status::Neutral,
        signal,
        strength,
        change: 0.0,
        change_pct: 0.0,
    }
}

fn states(items: Vec<IndicatorState>) -> BTreeMap<String, IndicatorState> {
    items.into_iter().map(|s| (s.name.clone(), s)).collect()
}

#[test]
fn test_empty_states_score_zero() {
    assert_eq!(score(&BTreeMap::new()), (0.0, 0.0));
}

#[test]
fn test_zero_weight_scores_zero() {
    let states = states(vec![state("RSI", 0.0, SignalClass::Bullish, 1.0)]);
    assert_eq!(score(&states), (0.0, 0.0));
}

#[test]
fn test_single_full_strength_bullish_state() {
    for weight in [0.1, 0.25, 3.0] {
        let states = states(vec![state("MACD", weight, SignalClass::Bullish, 1.0)]);
        let scores = calculate_trading_scores(&states);
        assert_eq!(scores.buy_score, 100.0);
        assert_eq!(scores.sell_score, 0.0);
        assert_eq!(scores.recommendation, Recommendation::StrongBuy);
    }
}

#[test]
fn test_scores_are_independent() {
    let states = states(vec![
        state("RSI", 0.25, SignalClass::Oversold, 0.5),
        state("Stochastic", 0.25, SignalClass::Overbought, 0.2),
        state("SMA", 0.5, SignalClass::Neutral, 0.0),
    ]);
    let (buy, sell) = score(&states);
    assert_eq!(buy, 12.5);
    assert_eq!(sell, 5.0);
}

#[test]
fn test_context_states_dilute_scores() {
    let states = states(vec![
        state("MACD", 0.25, SignalClass::Bearish, 1.0),
        state("Fear & Greed Index", 0.5, SignalClass::Neutral, 0.7),
        state("ADX", 0.25, SignalClass::StrongTrend, 1.0),
    ]);
    let (buy, sell) = score(&states);
    assert_eq!(buy, 0.0);
    assert_eq!(sell, 25.0);
}

#[test]
fn test_scores_stay_in_range() {
    let states = states(vec![
        state("A", 0.3, SignalClass::Bullish, 1.0),
        state("B", 0.7, SignalClass::Bearish, 1.0),
    ]);
    let (buy, sell) = score(&states);
    assert!((0.0..=100.0).contains(&buy));
    assert!((0.0..=100.0).contains(&sell));
    assert_eq!(buy + sell, 100.0);
}

#[test]
fn test_signal_from_value() {
    assert_eq!(signal_from_value(IndicatorType::Rsi, 75.0), SignalClass::Bearish);
    assert_eq!(signal_from_value(IndicatorType::Rsi, 25.0), SignalClass::Bullish);
    assert_eq!(signal_from_value(IndicatorType::Rsi, 50.0), SignalClass::Neutral);
    assert_eq!(signal_from_value(IndicatorType::Macd, 0.5), SignalClass::Bullish);
    assert_eq!(signal_from_value(IndicatorType::Macd, 0.0), SignalClass::Neutral);
    assert_eq!(signal_from_value(IndicatorType::WilliamsR, -10.0), SignalClass::Bearish);
    assert_eq!(signal_from_value(IndicatorType::WilliamsR, -90.0), SignalClass::Bullish);
    assert_eq!(signal_from_value(IndicatorType::Adx, 80.0), SignalClass::Bullish);
    assert_eq!(signal_from_value(IndicatorType::Adx, 20.0), SignalClass::Bearish);
    assert_eq!(signal_from_value(IndicatorType::Vwap, -0.06), SignalClass::Bearish);
    assert_eq!(signal_from_value(IndicatorType::Beta, 5.0), SignalClass::Neutral);
}

#[test]
fn test_strength_from_value() {
    assert_eq!(strength_from_value(IndicatorType::Rsi, 25.0), 0.9);
    assert_eq!(strength_from_value(IndicatorType::Rsi, 62.0), 0.7);
    assert_eq!(strength_from_value(IndicatorType::Rsi, 50.0), 0.5);
    assert_eq!(strength_from_value(IndicatorType::Macd, -1500.0), 0.9);
    assert_eq!(strength_from_value(IndicatorType::Cci, -150.0), 0.7);
    assert_eq!(strength_from_value(IndicatorType::Obv, 10.0), 0.5);
    assert_eq!(strength_from_value(IndicatorType::HashRate, 999.0), 0.5);
}
