//! Provider seams for price history and external metrics.
//!
//! Implementations live outside this crate (exchange clients, on-chain
//! APIs). The service awaits them; indicator math never does.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::indicators::{Candle, MetricKind, MetricPoint};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Candles for `symbol`, oldest first.
    ///
    /// `period` is the lookback (e.g. `1y`), `interval` the bar size (e.g. `1d`).
    async fn get_price_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, ProviderError>;
}

#[async_trait]
pub trait MetricProvider: Send + Sync {
    /// Up to `window` most recent points of one metric, oldest first.
    async fn fetch_metric(
        &self,
        kind: MetricKind,
        window: usize,
    ) -> Result<Vec<MetricPoint>, ProviderError>;
}
