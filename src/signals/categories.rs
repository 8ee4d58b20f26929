//! Indicator weight lookup and the context indicator table

use std::collections::HashMap;

use crate::config::CategoryWeights;
use crate::indicators::registry::{IndicatorCategory, IndicatorRegistry};

/// How much one indicator counts and where it is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub weight: f64,
    pub category: IndicatorCategory,
    pub description: String,
}

/// Display name -> weight entry, for indicators analyzed by threshold rules
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    entries: HashMap<String, WeightEntry>,
}

impl WeightTable {
    /// One entry per registered indicator, weighted by its category.
    pub fn from_registry(registry: &IndicatorRegistry, weights: &CategoryWeights) -> Self {
        let entries = registry
            .descriptors()
            .into_iter()
            .map(|d| {
                let entry = WeightEntry {
                    weight: weights.get(d.category),
                    category: d.category,
                    description: d.description,
                };
                (d.name, entry)
            })
            .collect();
        Self { entries }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn get(&self, name: &str) -> Option<&WeightEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Indicators that describe market context rather than direction.
///
/// Their signal is always neutral; only their strength varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextIndicator {
    HashRate,
    ActiveAddresses,
    FearGreed,
    Correlation,
    RealizedVolatility,
}

impl ContextIndicator {
    pub const ALL: [ContextIndicator; 5] = [
        ContextIndicator::HashRate,
        ContextIndicator::ActiveAddresses,
        ContextIndicator::FearGreed,
        ContextIndicator::Correlation,
        ContextIndicator::RealizedVolatility,
    ];

    /// Case-insensitive match on the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            ContextIndicator::HashRate => "Hash Rate",
            ContextIndicator::ActiveAddresses => "Active Addresses",
            ContextIndicator::FearGreed => "Fear & Greed Index",
            ContextIndicator::Correlation => "Correlation",
            ContextIndicator::RealizedVolatility => "Realized Volatility",
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            ContextIndicator::HashRate => 0.6,
            ContextIndicator::ActiveAddresses => 0.5,
            ContextIndicator::FearGreed => 0.5,
            ContextIndicator::Correlation => 0.6,
            ContextIndicator::RealizedVolatility => 0.7,
        }
    }

    pub fn category(self) -> IndicatorCategory {
        match self {
            ContextIndicator::HashRate | ContextIndicator::ActiveAddresses => {
                IndicatorCategory::OnChain
            }
            ContextIndicator::FearGreed => IndicatorCategory::Sentiment,
            ContextIndicator::Correlation => IndicatorCategory::Correlation,
            ContextIndicator::RealizedVolatility => IndicatorCategory::Volatility,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ContextIndicator::HashRate | ContextIndicator::ActiveAddresses => "Network activity",
            ContextIndicator::FearGreed => "Market sentiment",
            ContextIndicator::Correlation => "Correlation with traditional markets",
            ContextIndicator::RealizedVolatility => "Historical price volatility",
        }
    }

    /// Strength in [0, 1] from the current value and its percent change.
    pub fn strength(self, value: f64, change_pct: f64) -> f64 {
        let raw = match self {
            ContextIndicator::HashRate | ContextIndicator::ActiveAddresses => {
                change_pct.abs() / 10.0
            }
            ContextIndicator::FearGreed => (50.0 - value).abs() / 50.0,
            ContextIndicator::Correlation => value.abs(),
            ContextIndicator::RealizedVolatility => value / 100.0,
        };
        raw.clamp(0.0, 1.0)
    }
}
