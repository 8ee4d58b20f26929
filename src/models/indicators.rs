use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::indicators::registry::IndicatorType;

/// One OHLCV interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: Some(volume),
        }
    }

    pub fn without_volume(mut self) -> Self {
        self.volume = None;
        self
    }

    /// Alias for the close.
    pub fn price(&self) -> f64 {
        self.close
    }

    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }

    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// A timestamped reading from an external metric source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl MetricPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// External metric series an indicator can consume instead of its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    HashRate,
    ActiveAddresses,
    FundingRate,
    OpenInterest,
    FearGreed,
    SearchInterest,
    ImpliedVolatility,
    EtfFlow,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::HashRate => "hash_rate",
            MetricKind::ActiveAddresses => "active_addresses",
            MetricKind::FundingRate => "funding_rate",
            MetricKind::OpenInterest => "open_interest",
            MetricKind::FearGreed => "fear_greed",
            MetricKind::SearchInterest => "search_interest",
            MetricKind::ImpliedVolatility => "implied_volatility",
            MetricKind::EtfFlow => "etf_flow",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output sample of an indicator computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub name: String,
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl IndicatorValue {
    pub fn new(
        indicator_type: IndicatorType,
        name: impl Into<String>,
        timestamp: DateTime<Utc>,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            indicator_type,
            timestamp,
            value,
            parameters: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }
}

/// How to invoke one indicator; owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Display name; becomes the snapshot key.
    pub name: String,
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl IndicatorConfig {
    pub fn new(name: impl Into<String>, indicator_type: IndicatorType) -> Self {
        Self {
            name: name.into(),
            indicator_type,
            parameters: Map::new(),
            description: String::new(),
            is_active: true,
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Timestamp as handed over by a producer, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp {
    /// No zone attached; interpreted as UTC.
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl RawTimestamp {
    pub fn normalize(self) -> DateTime<Utc> {
        match self {
            RawTimestamp::Naive(naive) => naive.and_utc(),
            RawTimestamp::Aware(aware) => aware.with_timezone(&Utc),
        }
    }
}

impl From<NaiveDateTime> for RawTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        RawTimestamp::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for RawTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        RawTimestamp::Aware(value)
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        RawTimestamp::Aware(value.fixed_offset())
    }
}

/// Indicator display name -> value at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiIndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub values: BTreeMap<String, f64>,
}

impl MultiIndicatorSnapshot {
    /// Build a snapshot; the timestamp is normalized to UTC on the way in.
    pub fn new(timestamp: impl Into<RawTimestamp>, values: BTreeMap<String, f64>) -> Self {
        Self {
            timestamp: timestamp.into().normalize(),
            values,
        }
    }

    pub fn empty(timestamp: impl Into<RawTimestamp>) -> Self {
        Self::new(timestamp, BTreeMap::new())
    }

    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
