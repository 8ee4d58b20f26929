//! Trend indicators: SMA, EMA, ADX, Parabolic SAR, Ichimoku

pub mod adx;
pub mod ema;
pub mod ichimoku;
pub mod parabolic_sar;
pub mod sma;

pub use adx::{calculate_adx, calculate_adx_default, AdxIndicator};
pub use ema::{calculate_ema, calculate_emas, EmaIndicator};
pub use ichimoku::{calculate_ichimoku, IchimokuIndicator};
pub use parabolic_sar::{calculate_parabolic_sar, ParabolicSarIndicator};
pub use sma::{calculate_sma, SmaIndicator};
