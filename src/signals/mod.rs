//! Snapshot aggregation, state classification and scoring.

pub mod aggregation;
pub mod analyzer;
pub mod categories;
pub mod engine;
pub mod scoring;
pub mod summary;

pub use aggregation::*;
pub use analyzer::*;
pub use categories::*;
pub use engine::*;
pub use scoring::*;
pub use summary::*;
