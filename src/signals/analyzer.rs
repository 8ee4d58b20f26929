//! Per-indicator state classification
//!
//! Every indicator in the latest snapshot gets a baseline reading from its
//! change against the previous snapshot. Oscillators then override the
//! baseline with fixed threshold rules, and context indicators (on-chain,
//! sentiment, correlation) are forced to a neutral signal.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::indicators::MultiIndicatorSnapshot;
use crate::models::signal::{IndicatorState, SignalClass, Status};
use crate::signals::categories::{ContextIndicator, WeightTable};

/// Baseline strength: 10% change is full strength.
const CHANGE_STRENGTH_DIVISOR: f64 = 10.0;

/// Indicator-specific threshold rule, keyed by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    Rsi,
    Stochastic,
    WilliamsR,
    Cci,
    Adx,
    Macd,
    MoneyFlowIndex,
}

impl ThresholdRule {
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            "RSI" => Some(ThresholdRule::Rsi),
            "Stochastic" => Some(ThresholdRule::Stochastic),
            "Williams %R" => Some(ThresholdRule::WilliamsR),
            "CCI" => Some(ThresholdRule::Cci),
            "ADX" => Some(ThresholdRule::Adx),
            "MACD" => Some(ThresholdRule::Macd),
            "Money Flow Index" => Some(ThresholdRule::MoneyFlowIndex),
            _ => None,
        }
    }

    /// Signal and strength overriding the baseline, if the value triggers one.
    pub fn apply(self, value: f64) -> Option<(SignalClass, f64)> {
        match self {
            ThresholdRule::Rsi => band(value, 70.0, 30.0, 30.0),
            ThresholdRule::Stochastic | ThresholdRule::MoneyFlowIndex => band(value, 80.0, 20.0, 20.0),
            ThresholdRule::WilliamsR => band(value, -20.0, -80.0, 20.0),
            ThresholdRule::Cci => band(value, 100.0, -100.0, 100.0),
            ThresholdRule::Adx => Some(if value > 25.0 {
                (SignalClass::StrongTrend, ((value - 25.0) / 25.0).min(1.0))
            } else {
                (SignalClass::WeakTrend, (1.0 - (25.0 - value) / 25.0).max(0.0))
            }),
            ThresholdRule::Macd => Some(if value > 0.0 {
                (SignalClass::Bullish, (value / 1000.0).min(1.0))
            } else {
                (SignalClass::Bearish, (value.abs() / 1000.0).min(1.0))
            }),
        }
    }
}

/// Overbought above `upper`, oversold below `lower`, strength scaled by `divisor`.
fn band(value: f64, upper: f64, lower: f64, divisor: f64) -> Option<(SignalClass, f64)> {
    if value > upper {
        Some((SignalClass::Overbought, ((value - upper) / divisor).min(1.0)))
    } else if value < lower {
        Some((SignalClass::Oversold, ((lower - value) / divisor).min(1.0)))
    } else {
        None
    }
}

/// `(change, change_pct)` against the previous value; both 0 without one.
fn change_against(value: f64, previous: Option<f64>) -> (f64, f64) {
    match previous {
        Some(prev) => {
            let change = value - prev;
            let change_pct = if prev != 0.0 { change / prev * 100.0 } else { 0.0 };
            (change, change_pct)
        }
        None => (0.0, 0.0),
    }
}

pub struct StateAnalyzer {
    weights: WeightTable,
}

impl StateAnalyzer {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Classify every known indicator in `latest`.
    ///
    /// Context indicators are keyed by their canonical name; everything else
    /// by the snapshot key. Unknown names and non-finite values are skipped.
    pub fn analyze(
        &self,
        latest: &MultiIndicatorSnapshot,
        previous: Option<&MultiIndicatorSnapshot>,
        current_price: f64,
    ) -> BTreeMap<String, IndicatorState> {
        let mut states = BTreeMap::new();
        let previous_value = |name: &str| previous.and_then(|p| p.get(name));

        for (name, &value) in &latest.values {
            if !value.is_finite() {
                warn!(indicator = %name, "Skipping non-finite indicator value");
                continue;
            }

            if let Some(context) = ContextIndicator::from_name(name) {
                if !states.contains_key(context.name()) {
                    let state = Self::context_state(context, value, previous_value(name));
                    states.insert(context.name().to_string(), state);
                }
                continue;
            }

            let Some(entry) = self.weights.get(name) else {
                warn!(indicator = %name, "No weight information for indicator");
                continue;
            };

            let (change, change_pct) = change_against(value, previous_value(name));
            let status = Status::from_change(change);
            let (mut signal, mut strength) = match status {
                Status::Up => (SignalClass::Bullish, (change_pct.abs() / CHANGE_STRENGTH_DIVISOR).min(1.0)),
                Status::Down => (SignalClass::Bearish, (change_pct.abs() / CHANGE_STRENGTH_DIVISOR).min(1.0)),
                Status::Neutral => (SignalClass::Neutral, 0.0),
            };

            if let Some((rule_signal, rule_strength)) =
                ThresholdRule::for_name(name).and_then(|rule| rule.apply(value))
            {
                signal = rule_signal;
                strength = rule_strength;
            }

            states.insert(
                name.clone(),
                IndicatorState {
                    name: name.clone(),
                    value,
                    weight: entry.weight,
                    category: entry.category,
                    description: entry.description.clone(),
                    status,
                    signal,
                    strength: strength.clamp(0.0, 1.0),
                    change,
                    change_pct,
                },
            );
        }

        debug!(
            states = states.len(),
            current_price = current_price,
            "Analyzed indicator states"
        );
        states
    }

    fn context_state(context: ContextIndicator, value: f64, previous: Option<f64>) -> IndicatorState {
        let (change, change_pct) = change_against(value, previous);
        IndicatorState {
            name: context.name().to_string(),
            value,
            weight: context.weight(),
            category: context.category(),
            description: context.description().to_string(),
            status: Status::from_change(change),
            signal: SignalClass::Neutral,
            strength: context.strength(value, change_pct),
            change,
            change_pct,
        }
    }
}
