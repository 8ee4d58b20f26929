//! Counts, category scores, sentiment and recommendation

use std::collections::BTreeMap;

use crate::common::math;
use crate::indicators::registry::IndicatorCategory;
use crate::models::signal::{
    CategoryScores, IndicatorState, Recommendation, Sentiment, SignalClass, SignalCounts, Status,
    Summary,
};

pub fn count_signals(states: &BTreeMap<String, IndicatorState>) -> SignalCounts {
    let mut counts = SignalCounts {
        total: states.len(),
        ..SignalCounts::default()
    };

    for state in states.values() {
        match state.status {
            Status::Up => counts.up += 1,
            Status::Down => counts.down += 1,
            Status::Neutral => counts.neutral += 1,
        }
        if state.signal.is_buy_side() {
            counts.bullish += 1;
        } else if state.signal.is_sell_side() {
            counts.bearish += 1;
        } else if state.signal == SignalClass::Neutral {
            counts.neutral_signal += 1;
        }
    }

    counts
}

/// Signed weight sums for the four core categories
///
/// Trend favors bullish signals, momentum favors bullish or oversold, and
/// volatility and volume favor an upward status. Other categories are not
/// scored.
pub fn category_scores(states: &BTreeMap<String, IndicatorState>) -> CategoryScores {
    let mut scores = CategoryScores::default();

    for state in states.values() {
        let sign = |favorable: bool| if favorable { state.weight } else { -state.weight };
        match state.category {
            IndicatorCategory::Trend => scores.trend += sign(state.signal == SignalClass::Bullish),
            IndicatorCategory::Momentum => scores.momentum += sign(state.signal.is_buy_side()),
            IndicatorCategory::Volatility => scores.volatility += sign(state.status == Status::Up),
            IndicatorCategory::Volume => scores.volume += sign(state.status == Status::Up),
            _ => {}
        }
    }

    CategoryScores {
        trend: math::round_to(scores.trend, 2),
        momentum: math::round_to(scores.momentum, 2),
        volatility: math::round_to(scores.volatility, 2),
        volume: math::round_to(scores.volume, 2),
    }
}

pub fn overall_sentiment(buy_score: f64, sell_score: f64) -> Sentiment {
    let diff = buy_score - sell_score;
    if diff > 20.0 {
        Sentiment::StrongBuy
    } else if diff > 10.0 {
        Sentiment::Buy
    } else if diff > -10.0 {
        Sentiment::Neutral
    } else if diff > -20.0 {
        Sentiment::Sell
    } else {
        Sentiment::StrongSell
    }
}

pub fn recommendation(buy_score: f64, sell_score: f64) -> Recommendation {
    let diff = buy_score - sell_score;
    if diff > 30.0 {
        Recommendation::StrongBuy
    } else if diff > 15.0 {
        Recommendation::Buy
    } else if diff > 5.0 {
        Recommendation::WeakBuy
    } else if diff > -5.0 {
        Recommendation::Hold
    } else if diff > -15.0 {
        Recommendation::WeakSell
    } else if diff > -30.0 {
        Recommendation::Sell
    } else {
        Recommendation::StrongSell
    }
}

pub fn generate_summary(
    states: &BTreeMap<String, IndicatorState>,
    buy_score: f64,
    sell_score: f64,
) -> Summary {
    Summary {
        counts: count_signals(states),
        scores: category_scores(states),
        overall_sentiment: overall_sentiment(buy_score, sell_score),
    }
}
