//! Indicator computation: the shared trait, the registry and every built-in algorithm.

pub mod error;
pub mod parser;
pub mod registry;
pub mod validation;

pub mod market;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use error::IndicatorError;
pub use parser::*;
pub use registry::*;
pub use validation::*;
