//! Market context indicators: on-chain, derivatives, sentiment and cross-asset
//!
//! Each one maps a provider series when [`IndicatorParams`] carries it and
//! falls back to an estimate from the candles otherwise. Estimates are
//! tagged with `method` and `estimated: true` in their parameters.
//!
//! [`IndicatorParams`]: crate::indicators::parser::IndicatorParams

pub mod active_addresses;
pub mod beta;
pub mod correlation;
pub mod fear_greed;
pub mod funding_rate;
pub mod google_trends;
pub mod hash_rate;
pub mod open_interest;

pub use active_addresses::{active_addresses_from_metric, estimate_active_addresses, ActiveAddressesIndicator};
pub use beta::{calculate_beta, BetaIndicator};
pub use correlation::{calculate_correlation, estimate_correlation, CorrelationIndicator};
pub use fear_greed::{classify_fear_greed, estimate_fear_greed, fear_greed_from_metric, FearGreedIndicator};
pub use funding_rate::{estimate_funding_rate, funding_rate_from_metric, FundingRateIndicator};
pub use google_trends::{estimate_search_interest, GoogleTrendsIndicator};
pub use hash_rate::{estimate_hash_rate, hash_rate_from_metric, HashRateIndicator};
pub use open_interest::{estimate_open_interest, OpenInterestIndicator};

use crate::common::math;
use crate::models::indicators::Candle;

/// Rolling mean of absolute close changes, scaled so the busiest window reads 100.
pub(crate) fn activity_index(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let abs_change: Vec<Option<f64>> = math::pct_change(&closes)
        .into_iter()
        .map(|c| c.map(f64::abs))
        .collect();
    let rolling = math::rolling_apply_opt(&abs_change, period, math::mean);
    let max = rolling.iter().flatten().copied().fold(0.0, f64::max);

    rolling
        .into_iter()
        .map(|v| v.map(|v| if max > 0.0 { v / max * 100.0 } else { 0.0 }))
        .collect()
}
