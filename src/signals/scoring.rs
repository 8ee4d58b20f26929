//! Weighted buy/sell scoring and single-value interpretation

use std::collections::BTreeMap;

use crate::common::math;
use crate::indicators::registry::IndicatorType;
use crate::models::signal::{IndicatorState, SignalClass, TradingScores};
use crate::signals::summary;

/// Normalized `(buy_score, sell_score)` in [0, 100].
///
/// Each state contributes `weight * strength` to the side its signal points
/// to; both sums are divided by the total weight of all states, so the two
/// scores are independent and need not add up to 100.
pub fn score(states: &BTreeMap<String, IndicatorState>) -> (f64, f64) {
    let mut buy = 0.0;
    let mut sell = 0.0;
    let mut total_weight = 0.0;

    for state in states.values() {
        total_weight += state.weight;
        if state.signal.is_buy_side() {
            buy += state.weight * state.strength;
        } else if state.signal.is_sell_side() {
            sell += state.weight * state.strength;
        }
    }

    if total_weight <= 0.0 {
        return (0.0, 0.0);
    }

    (
        math::round_to(buy / total_weight * 100.0, 2),
        math::round_to(sell / total_weight * 100.0, 2),
    )
}

/// Scores plus the recommendation they imply.
pub fn calculate_trading_scores(states: &BTreeMap<String, IndicatorState>) -> TradingScores {
    let (buy_score, sell_score) = score(states);
    TradingScores {
        buy_score,
        sell_score,
        recommendation: summary::recommendation(buy_score, sell_score),
    }
}

/// Classify one raw reading without any history.
pub fn signal_from_value(indicator_type: IndicatorType, value: f64) -> SignalClass {
    // (bullish when above, bearish when below) or the reverse for oscillators
    let (above, below, above_signal, below_signal) = match indicator_type {
        IndicatorType::Rsi => (70.0, 30.0, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::Macd => (0.0, 0.0, SignalClass::Bullish, SignalClass::Bearish),
        IndicatorType::BollingerBands => (1.5, -1.5, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::Stochastic => (80.0, 20.0, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::Atr => (0.05, 0.01, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::WilliamsR => (-20.0, -80.0, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::Cci => (100.0, -100.0, SignalClass::Bearish, SignalClass::Bullish),
        IndicatorType::Adx => (70.0, 30.0, SignalClass::Bullish, SignalClass::Bearish),
        IndicatorType::Obv => (20.0, -20.0, SignalClass::Bullish, SignalClass::Bearish),
        IndicatorType::Vwap => (0.05, -0.05, SignalClass::Bullish, SignalClass::Bearish),
        _ => return SignalClass::Neutral,
    };

    if value > above {
        above_signal
    } else if value < below {
        below_signal
    } else {
        SignalClass::Neutral
    }
}

/// Confidence ladder (0.5 / 0.7 / 0.9) for one raw reading.
pub fn strength_from_value(indicator_type: IndicatorType, value: f64) -> f64 {
    let abs = value.abs();
    let (strong, moderate) = match indicator_type {
        IndicatorType::Rsi => (value <= 30.0 || value >= 70.0, value <= 40.0 || value >= 60.0),
        IndicatorType::Macd => (abs > 1000.0, abs > 500.0),
        IndicatorType::BollingerBands => (abs > 2.0, abs > 1.5),
        IndicatorType::Stochastic => (value >= 90.0 || value <= 10.0, value >= 80.0 || value <= 20.0),
        IndicatorType::Atr => (value >= 0.05, value >= 0.03),
        IndicatorType::WilliamsR => (value >= -10.0 || value <= -90.0, value >= -20.0 || value <= -80.0),
        IndicatorType::Cci => (abs >= 200.0, abs >= 100.0),
        IndicatorType::Adx => (value >= 70.0, value >= 50.0),
        IndicatorType::Obv => (abs >= 50.0, abs >= 30.0),
        IndicatorType::Vwap => (abs >= 0.1, abs >= 0.05),
        _ => (false, false),
    };

    if strong {
        0.9
    } else if moderate {
        0.7
    } else {
        0.5
    }
}
