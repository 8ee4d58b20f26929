//! Momentum indicators: RSI, MACD, Stochastic, Williams %R, CCI, MFI, ROC

pub mod cci;
pub mod macd;
pub mod money_flow_index;
pub mod rate_of_change;
pub mod rsi;
pub mod stochastic;
pub mod williams_r;

pub use cci::{calculate_cci, CciIndicator};
pub use macd::{calculate_macd, calculate_macd_default, MacdIndicator};
pub use money_flow_index::{calculate_money_flow_index, MoneyFlowIndexIndicator};
pub use rate_of_change::{calculate_rate_of_change, RateOfChangeIndicator};
pub use rsi::{calculate_rsi, calculate_rsi_default, rsi_from_averages, RsiIndicator};
pub use stochastic::{calculate_stochastic, StochasticIndicator};
pub use williams_r::{calculate_williams_r, WilliamsRIndicator};
