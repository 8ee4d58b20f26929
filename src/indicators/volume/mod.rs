//! Volume indicators: OBV, VWAP, ETF flow

pub mod etf_flow;
pub mod obv;
pub mod vwap;

pub use etf_flow::{calculate_etf_flow, etf_flow_from_metric, EtfFlowIndicator};
pub use obv::{calculate_obv, ObvIndicator};
pub use vwap::{calculate_vwap, VwapIndicator};
