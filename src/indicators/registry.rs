//! Indicator registry and trait system

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::{market, momentum, trend, volatility, volume};
use crate::models::indicators::{Candle, IndicatorValue, MetricKind};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
    Custom,
    OnChain,
    Sentiment,
    Correlation,
}

impl IndicatorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorCategory::Trend => "trend",
            IndicatorCategory::Momentum => "momentum",
            IndicatorCategory::Volatility => "volatility",
            IndicatorCategory::Volume => "volume",
            IndicatorCategory::Custom => "custom",
            IndicatorCategory::OnChain => "on_chain",
            IndicatorCategory::Sentiment => "sentiment",
            IndicatorCategory::Correlation => "correlation",
        }
    }

    /// Get all categories
    pub fn all() -> [IndicatorCategory; 8] {
        [
            IndicatorCategory::Trend,
            IndicatorCategory::Momentum,
            IndicatorCategory::Volatility,
            IndicatorCategory::Volume,
            IndicatorCategory::Custom,
            IndicatorCategory::OnChain,
            IndicatorCategory::Sentiment,
            IndicatorCategory::Correlation,
        ]
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of every supported indicator algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    Sma,
    Ema,
    Rsi,
    Macd,
    BollingerBands,
    Stochastic,
    Atr,
    WilliamsR,
    Cci,
    Adx,
    Obv,
    ParabolicSar,
    Ichimoku,
    Vwap,
    MoneyFlowIndex,
    RateOfChange,
    KeltnerChannel,
    DonchianChannel,
    EtfFlow,
    HashRate,
    ActiveAddresses,
    FundingRate,
    OpenInterest,
    FearGreedIndex,
    GoogleTrends,
    Correlation,
    Beta,
    RealizedVolatility,
    ImpliedVolatility,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 29] = [
        IndicatorType::Sma,
        IndicatorType::Ema,
        IndicatorType::Rsi,
        IndicatorType::Macd,
        IndicatorType::BollingerBands,
        IndicatorType::Stochastic,
        IndicatorType::Atr,
        IndicatorType::WilliamsR,
        IndicatorType::Cci,
        IndicatorType::Adx,
        IndicatorType::Obv,
        IndicatorType::ParabolicSar,
        IndicatorType::Ichimoku,
        IndicatorType::Vwap,
        IndicatorType::MoneyFlowIndex,
        IndicatorType::RateOfChange,
        IndicatorType::KeltnerChannel,
        IndicatorType::DonchianChannel,
        IndicatorType::EtfFlow,
        IndicatorType::HashRate,
        IndicatorType::ActiveAddresses,
        IndicatorType::FundingRate,
        IndicatorType::OpenInterest,
        IndicatorType::FearGreedIndex,
        IndicatorType::GoogleTrends,
        IndicatorType::Correlation,
        IndicatorType::Beta,
        IndicatorType::RealizedVolatility,
        IndicatorType::ImpliedVolatility,
    ];

    /// Type identifier, as used in configs and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorType::Sma => "sma",
            IndicatorType::Ema => "ema",
            IndicatorType::Rsi => "rsi",
            IndicatorType::Macd => "macd",
            IndicatorType::BollingerBands => "bollinger_bands",
            IndicatorType::Stochastic => "stochastic",
            IndicatorType::Atr => "atr",
            IndicatorType::WilliamsR => "williams_r",
            IndicatorType::Cci => "cci",
            IndicatorType::Adx => "adx",
            IndicatorType::Obv => "obv",
            IndicatorType::ParabolicSar => "parabolic_sar",
            IndicatorType::Ichimoku => "ichimoku",
            IndicatorType::Vwap => "vwap",
            IndicatorType::MoneyFlowIndex => "money_flow_index",
            IndicatorType::RateOfChange => "rate_of_change",
            IndicatorType::KeltnerChannel => "keltner_channel",
            IndicatorType::DonchianChannel => "donchian_channel",
            IndicatorType::EtfFlow => "etf_flow",
            IndicatorType::HashRate => "hash_rate",
            IndicatorType::ActiveAddresses => "active_addresses",
            IndicatorType::FundingRate => "funding_rate",
            IndicatorType::OpenInterest => "open_interest",
            IndicatorType::FearGreedIndex => "fear_greed_index",
            IndicatorType::GoogleTrends => "google_trends",
            IndicatorType::Correlation => "correlation",
            IndicatorType::Beta => "beta",
            IndicatorType::RealizedVolatility => "realized_volatility",
            IndicatorType::ImpliedVolatility => "implied_volatility",
        }
    }

    /// Display name; this is the key used in snapshots and the weight table.
    pub fn display_name(self) -> &'static str {
        match self {
            IndicatorType::Sma => "SMA",
            IndicatorType::Ema => "EMA",
            IndicatorType::Rsi => "RSI",
            IndicatorType::Macd => "MACD",
            IndicatorType::BollingerBands => "Bollinger Bands",
            IndicatorType::Stochastic => "Stochastic",
            IndicatorType::Atr => "ATR",
            IndicatorType::WilliamsR => "Williams %R",
            IndicatorType::Cci => "CCI",
            IndicatorType::Adx => "ADX",
            IndicatorType::Obv => "OBV",
            IndicatorType::ParabolicSar => "Parabolic SAR",
            IndicatorType::Ichimoku => "Ichimoku Cloud",
            IndicatorType::Vwap => "VWAP",
            IndicatorType::MoneyFlowIndex => "Money Flow Index",
            IndicatorType::RateOfChange => "Rate of Change",
            IndicatorType::KeltnerChannel => "Keltner Channel",
            IndicatorType::DonchianChannel => "Donchian Channel",
            IndicatorType::EtfFlow => "ETF Flow",
            IndicatorType::HashRate => "Hash Rate",
            IndicatorType::ActiveAddresses => "Active Addresses",
            IndicatorType::FundingRate => "Funding Rate",
            IndicatorType::OpenInterest => "Open Interest",
            IndicatorType::FearGreedIndex => "Fear & Greed Index",
            IndicatorType::GoogleTrends => "Google Trends",
            IndicatorType::Correlation => "Correlation",
            IndicatorType::Beta => "Beta",
            IndicatorType::RealizedVolatility => "Realized Volatility",
            IndicatorType::ImpliedVolatility => "Implied Volatility",
        }
    }

    pub fn category(self) -> IndicatorCategory {
        use IndicatorType::*;
        match self {
            Sma | Ema | Adx | ParabolicSar | Ichimoku => IndicatorCategory::Trend,
            Rsi | Macd | Stochastic | WilliamsR | Cci | MoneyFlowIndex | RateOfChange => {
                IndicatorCategory::Momentum
            }
            BollingerBands | Atr | KeltnerChannel | DonchianChannel | RealizedVolatility
            | ImpliedVolatility => IndicatorCategory::Volatility,
            Obv | Vwap | EtfFlow | OpenInterest => IndicatorCategory::Volume,
            FundingRate | GoogleTrends | Beta => IndicatorCategory::Custom,
            HashRate | ActiveAddresses => IndicatorCategory::OnChain,
            FearGreedIndex => IndicatorCategory::Sentiment,
            Correlation => IndicatorCategory::Correlation,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            IndicatorType::Sma => "Simple moving average of the close",
            IndicatorType::Ema => "Exponential moving average of the close",
            IndicatorType::Rsi => "Relative Strength Index, momentum oscillator in [0, 100]",
            IndicatorType::Macd => "Moving average convergence divergence with signal line",
            IndicatorType::BollingerBands => "Moving average with standard deviation bands",
            IndicatorType::Stochastic => "Stochastic oscillator %K with %D smoothing",
            IndicatorType::Atr => "Average true range, a measure of volatility",
            IndicatorType::WilliamsR => "Williams %R, momentum oscillator in [-100, 0]",
            IndicatorType::Cci => "Commodity Channel Index, deviation from the typical price mean",
            IndicatorType::Adx => "Average Directional Index, trend strength",
            IndicatorType::Obv => "On-balance volume, cumulative signed volume",
            IndicatorType::ParabolicSar => "Parabolic stop and reverse trailing level",
            IndicatorType::Ichimoku => "Ichimoku cloud conversion and base lines",
            IndicatorType::Vwap => "Rolling volume weighted average price",
            IndicatorType::MoneyFlowIndex => "Volume weighted RSI of the typical price",
            IndicatorType::RateOfChange => "Percent change over a lookback window",
            IndicatorType::KeltnerChannel => "Typical price moving average with ATR bands",
            IndicatorType::DonchianChannel => "Highest high and lowest low channel",
            IndicatorType::EtfFlow => "ETF flow proxy from price momentum",
            IndicatorType::HashRate => "Network hash rate in TH/s",
            IndicatorType::ActiveAddresses => "Active on-chain addresses",
            IndicatorType::FundingRate => "Perpetual funding rate in percent",
            IndicatorType::OpenInterest => "Open interest activity index",
            IndicatorType::FearGreedIndex => "Market fear and greed sentiment in [0, 100]",
            IndicatorType::GoogleTrends => "Search interest index",
            IndicatorType::Correlation => "Rolling correlation against a benchmark",
            IndicatorType::Beta => "Rolling beta against a benchmark",
            IndicatorType::RealizedVolatility => "Annualized realized volatility in percent",
            IndicatorType::ImpliedVolatility => "Annualized implied volatility in percent",
        }
    }

    /// External metric this indicator consumes when a provider is wired in.
    pub fn metric_kind(self) -> Option<MetricKind> {
        match self {
            IndicatorType::HashRate => Some(MetricKind::HashRate),
            IndicatorType::ActiveAddresses => Some(MetricKind::ActiveAddresses),
            IndicatorType::FundingRate => Some(MetricKind::FundingRate),
            IndicatorType::OpenInterest => Some(MetricKind::OpenInterest),
            IndicatorType::FearGreedIndex => Some(MetricKind::FearGreed),
            IndicatorType::GoogleTrends => Some(MetricKind::SearchInterest),
            IndicatorType::ImpliedVolatility => Some(MetricKind::ImpliedVolatility),
            IndicatorType::EtfFlow => Some(MetricKind::EtfFlow),
            _ => None,
        }
    }

    /// Whether a benchmark candle series improves the computation.
    pub fn needs_benchmark(self) -> bool {
        matches!(self, IndicatorType::Correlation | IndicatorType::Beta)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        if key.is_empty() {
            return Err(IndicatorError::MissingField("indicator type".to_string()));
        }
        IndicatorType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| IndicatorError::UnsupportedIndicator(s.to_string()))
    }
}

/// Trait for all indicators
///
/// Implementations are stateless. `calculate` never mutates the input and
/// returns an empty vector when the series is shorter than
/// [`Indicator::min_samples`].
pub trait Indicator: Send + Sync {
    fn indicator_type(&self) -> IndicatorType;

    /// Minimum number of candles needed for at least one output.
    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError>;

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError>;

    /// Get the name of the indicator
    fn name(&self) -> &'static str {
        self.indicator_type().display_name()
    }

    /// Get the category this indicator belongs to
    fn category(&self) -> IndicatorCategory {
        self.indicator_type().category()
    }

    fn description(&self) -> &'static str {
        self.indicator_type().description()
    }
}

/// Public listing entry for one registered indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub description: String,
    pub category: IndicatorCategory,
}

/// Owns one instance per indicator type.
pub struct IndicatorRegistry {
    indicators: BTreeMap<IndicatorType, Box<dyn Indicator>>,
}

impl IndicatorRegistry {
    /// Create a registry holding every built-in indicator
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(trend::SmaIndicator));
        registry.register(Box::new(trend::EmaIndicator));
        registry.register(Box::new(trend::AdxIndicator));
        registry.register(Box::new(trend::ParabolicSarIndicator));
        registry.register(Box::new(trend::IchimokuIndicator));
        registry.register(Box::new(momentum::RsiIndicator));
        registry.register(Box::new(momentum::MacdIndicator));
        registry.register(Box::new(momentum::StochasticIndicator));
        registry.register(Box::new(momentum::WilliamsRIndicator));
        registry.register(Box::new(momentum::CciIndicator));
        registry.register(Box::new(momentum::MoneyFlowIndexIndicator));
        registry.register(Box::new(momentum::RateOfChangeIndicator));
        registry.register(Box::new(volatility::BollingerBandsIndicator));
        registry.register(Box::new(volatility::AtrIndicator));
        registry.register(Box::new(volatility::KeltnerChannelIndicator));
        registry.register(Box::new(volatility::DonchianChannelIndicator));
        registry.register(Box::new(volatility::RealizedVolatilityIndicator));
        registry.register(Box::new(volatility::ImpliedVolatilityIndicator));
        registry.register(Box::new(volume::ObvIndicator));
        registry.register(Box::new(volume::VwapIndicator));
        registry.register(Box::new(volume::EtfFlowIndicator));
        registry.register(Box::new(market::HashRateIndicator));
        registry.register(Box::new(market::ActiveAddressesIndicator));
        registry.register(Box::new(market::FundingRateIndicator));
        registry.register(Box::new(market::OpenInterestIndicator));
        registry.register(Box::new(market::FearGreedIndicator));
        registry.register(Box::new(market::GoogleTrendsIndicator));
        registry.register(Box::new(market::CorrelationIndicator));
        registry.register(Box::new(market::BetaIndicator));
        debug!(count = registry.len(), "Indicator registry initialized");
        registry
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            indicators: BTreeMap::new(),
        }
    }

    /// Register an indicator, replacing any previous one of the same type.
    pub fn register(&mut self, indicator: Box<dyn Indicator>) {
        self.indicators.insert(indicator.indicator_type(), indicator);
    }

    pub fn get(&self, indicator_type: IndicatorType) -> Result<&dyn Indicator, IndicatorError> {
        self.indicators
            .get(&indicator_type)
            .map(|indicator| indicator.as_ref())
            .ok_or_else(|| IndicatorError::UnsupportedIndicator(indicator_type.to_string()))
    }

    /// Look up by type identifier such as `"williams_r"` or `"Money Flow Index"`.
    pub fn get_by_name(&self, name: &str) -> Result<&dyn Indicator, IndicatorError> {
        let indicator_type: IndicatorType = name.parse()?;
        self.get(indicator_type)
    }

    pub fn list(&self) -> Vec<IndicatorType> {
        self.indicators.keys().copied().collect()
    }

    pub fn is_supported(&self, indicator_type: IndicatorType) -> bool {
        self.indicators.contains_key(&indicator_type)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn descriptors(&self) -> Vec<IndicatorDescriptor> {
        self.indicators
            .values()
            .map(|indicator| IndicatorDescriptor {
                name: indicator.name().to_string(),
                indicator_type: indicator.indicator_type(),
                description: indicator.description().to_string(),
                category: indicator.category(),
            })
            .collect()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
