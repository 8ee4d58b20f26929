//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{
    Candle, IndicatorConfig, IndicatorValue, MetricKind, MetricPoint, MultiIndicatorSnapshot,
    RawTimestamp,
};
pub use signal::{
    AnalysisReport, CategoryScores, IndicatorState, Recommendation, Sentiment, SignalClass,
    SignalCounts, Status, Summary, TradingScores,
};
