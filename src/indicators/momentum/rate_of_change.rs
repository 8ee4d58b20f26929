//! ROC (Rate of Change) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 10;

/// Calculate ROC = (close - close[n periods ago]) / close[n periods ago] * 100
pub fn calculate_rate_of_change(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let name = format!("ROC({})", period);

    candles
        .iter()
        .enumerate()
        .skip(period)
        .map(|(i, candle)| {
            let previous = candles[i - period].close;
            // zero base has no defined rate
            let roc = if previous == 0.0 {
                0.0
            } else {
                (candle.close - previous) / previous * 100.0
            };
            IndicatorValue::new(IndicatorType::RateOfChange, name.clone(), candle.timestamp, math::round_to(roc, 2))
                .with_param("period", period)
        })
        .collect()
}

pub struct RateOfChangeIndicator;

impl Indicator for RateOfChangeIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::RateOfChange
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(params.period("period", DEFAULT_PERIOD, 1)?.saturating_add(1))
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 1)?;
        Ok(calculate_rate_of_change(candles, period))
    }
}
