//! Ichimoku Cloud indicator (latest reading only)

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_TENKAN: usize = 9;
pub const DEFAULT_KIJUN: usize = 26;
pub const DEFAULT_SENKOU_B: usize = 52;

/// Midpoint of the highest high and lowest low over the last `period` candles.
fn midpoint(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }
    let window = &candles[candles.len() - period..];
    let high = window.iter().map(|c| c.high).reduce(f64::max)?;
    let low = window.iter().map(|c| c.low).reduce(f64::min)?;
    Some((high + low) / 2.0)
}

/// Calculate the current Ichimoku reading
///
/// The value is the conversion line (tenkan-sen). Base line, leading span A
/// and leading span B are attached when the series is long enough for them.
pub fn calculate_ichimoku(
    candles: &[Candle],
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
) -> Vec<IndicatorValue> {
    let Some(last) = candles.last() else {
        return Vec::new();
    };
    let Some(tenkan) = midpoint(candles, tenkan_period) else {
        return Vec::new();
    };

    let mut value = IndicatorValue::new(
        IndicatorType::Ichimoku,
        format!("Ichimoku Tenkan({})", tenkan_period),
        last.timestamp,
        math::round_to(tenkan, 2),
    )
    .with_param("tenkan_period", tenkan_period)
    .with_param("kijun_period", kijun_period)
    .with_param("senkou_span_b_period", senkou_b_period);

    if let Some(kijun) = midpoint(candles, kijun_period) {
        value = value
            .with_param("kijun", math::round_to(kijun, 2))
            .with_param("senkou_span_a", math::round_to((tenkan + kijun) / 2.0, 2));
    }
    if let Some(span_b) = midpoint(candles, senkou_b_period) {
        value = value.with_param("senkou_span_b", math::round_to(span_b, 2));
    }

    vec![value]
}

pub struct IchimokuIndicator;

impl Indicator for IchimokuIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Ichimoku
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        params.period("tenkan_period", DEFAULT_TENKAN, 1)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let tenkan = params.period("tenkan_period", DEFAULT_TENKAN, 1)?;
        let kijun = params.period("kijun_period", DEFAULT_KIJUN, 1)?;
        let senkou_b = params.period("senkou_span_b_period", DEFAULT_SENKOU_B, 1)?;
        Ok(calculate_ichimoku(candles, tenkan, kijun, senkou_b))
    }
}
