//! Volatility indicators: Bollinger Bands, ATR, Keltner, Donchian, realized and implied volatility

pub mod atr;
pub mod bollinger;
pub mod donchian;
pub mod implied_volatility;
pub mod keltner;
pub mod realized_volatility;

pub use atr::{calculate_atr, calculate_atr_default, true_ranges, AtrIndicator};
pub use bollinger::{calculate_bollinger_bands, calculate_bollinger_bands_default, BollingerBandsIndicator};
pub use donchian::{calculate_donchian_channel, DonchianChannelIndicator};
pub use implied_volatility::{
    calculate_implied_volatility, implied_volatility_from_metric, ImpliedVolatilityIndicator,
};
pub use keltner::{calculate_keltner_channel, KeltnerChannelIndicator};
pub use realized_volatility::{
    calculate_realized_volatility, RealizedVolatilityIndicator, VolatilityMethod,
};
