use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::indicators::registry::IndicatorCategory;

/// Direction of the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Up,
    Down,
    Neutral,
}

impl Status {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Status::Up
        } else if change < 0.0 {
            Status::Down
        } else {
            Status::Neutral
        }
    }
}

/// Classified signal of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalClass {
    Bullish,
    Bearish,
    Neutral,
    Overbought,
    Oversold,
    StrongTrend,
    WeakTrend,
}

impl SignalClass {
    /// Bullish and oversold readings count toward buying.
    pub fn is_buy_side(self) -> bool {
        matches!(self, SignalClass::Bullish | SignalClass::Oversold)
    }

    /// Bearish and overbought readings count toward selling.
    pub fn is_sell_side(self) -> bool {
        matches!(self, SignalClass::Bearish | SignalClass::Overbought)
    }
}

/// Derived state of one indicator for a single analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorState {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub category: IndicatorCategory,
    pub description: String,
    pub status: Status,
    pub signal: SignalClass,
    /// Confidence in `[0, 1]`.
    pub strength: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Overall market mood derived from the score spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::StrongBuy => "strong buy",
            Sentiment::Buy => "buy",
            Sentiment::Neutral => "neutral",
            Sentiment::Sell => "sell",
            Sentiment::StrongSell => "strong sell",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    WeakBuy,
    Hold,
    WeakSell,
    Sell,
    StrongSell,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong buy recommendation",
            Recommendation::Buy => "buy recommendation",
            Recommendation::WeakBuy => "weak buy recommendation",
            Recommendation::Hold => "hold",
            Recommendation::WeakSell => "weak sell recommendation",
            Recommendation::Sell => "sell recommendation",
            Recommendation::StrongSell => "strong sell recommendation",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub neutral: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral_signal: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub trend: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: SignalCounts,
    pub scores: CategoryScores,
    pub overall_sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingScores {
    pub buy_score: f64,
    pub sell_score: f64,
    pub recommendation: Recommendation,
}

/// Result of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub indicator_states: BTreeMap<String, IndicatorState>,
    pub trading_scores: TradingScores,
    pub current_price: f64,
    pub timestamp: DateTime<Utc>,
}
