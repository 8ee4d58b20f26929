pub mod indicator_service;
pub mod market_data;

pub use indicator_service::*;
pub use market_data::*;
