//! Technical indicator computation and weighted signal analysis.
//!
//! Candles go in, indicator streams come out of the [`indicators`] registry,
//! [`signals`] folds them into per-indicator states and a buy/sell verdict.

pub mod common;
pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use indicators::{Indicator, IndicatorCategory, IndicatorError, IndicatorRegistry, IndicatorType};
pub use models::{AnalysisReport, Candle, IndicatorValue, MultiIndicatorSnapshot};
pub use services::IndicatorService;
pub use signals::engine::AnalysisEngine;
