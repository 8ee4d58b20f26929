//! Analysis pipeline: snapshots in, report out.

use tracing::{debug, info};

use crate::config::CategoryWeights;
use crate::indicators::registry::IndicatorRegistry;
use crate::models::indicators::MultiIndicatorSnapshot;
use crate::models::signal::AnalysisReport;
use crate::signals::aggregation::{aggregate_latest, aggregate_previous};
use crate::signals::analyzer::StateAnalyzer;
use crate::signals::categories::WeightTable;
use crate::signals::scoring::calculate_trading_scores;
use crate::signals::summary::generate_summary;

pub struct AnalysisEngine {
    analyzer: StateAnalyzer,
}

impl AnalysisEngine {
    pub fn new(weights: WeightTable) -> Self {
        Self {
            analyzer: StateAnalyzer::new(weights),
        }
    }

    /// Weight every registered indicator by its category weight.
    pub fn from_registry(registry: &IndicatorRegistry, weights: &CategoryWeights) -> Self {
        Self::new(WeightTable::from_registry(registry, weights))
    }

    pub fn analyzer(&self) -> &StateAnalyzer {
        &self.analyzer
    }

    /// Merge the snapshots, classify each indicator and score the result.
    ///
    /// Returns `None` when there is nothing to analyze.
    pub fn analyze(
        &self,
        snapshots: &[MultiIndicatorSnapshot],
        current_price: f64,
    ) -> Option<AnalysisReport> {
        if snapshots.is_empty() {
            debug!("No snapshots to analyze");
            return None;
        }

        let latest = aggregate_latest(snapshots);
        let previous = aggregate_previous(snapshots);
        let states = self.analyzer.analyze(&latest, previous.as_ref(), current_price);

        let trading_scores = calculate_trading_scores(&states);
        let summary = generate_summary(&states, trading_scores.buy_score, trading_scores.sell_score);

        info!(
            indicators = states.len(),
            buy_score = trading_scores.buy_score,
            sell_score = trading_scores.sell_score,
            recommendation = %trading_scores.recommendation,
            "Analysis complete"
        );

        Some(AnalysisReport {
            summary,
            indicator_states: states,
            trading_scores,
            current_price,
            timestamp: latest.timestamp,
        })
    }
}
