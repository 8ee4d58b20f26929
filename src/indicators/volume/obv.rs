//! OBV (On-Balance Volume) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

/// Calculate OBV
///
/// Starts at the first candle's volume, then adds the volume on up closes
/// and subtracts it on down closes.
pub fn calculate_obv(candles: &[Candle]) -> Vec<IndicatorValue> {
    if candles.len() < 2 {
        return Vec::new();
    }

    let mut obv = candles[0].volume_or_zero();
    let mut results = Vec::with_capacity(candles.len());

    for (i, candle) in candles.iter().enumerate() {
        if i > 0 {
            let change = candle.close - candles[i - 1].close;
            if change > 0.0 {
                obv += candle.volume_or_zero();
            } else if change < 0.0 {
                obv -= candle.volume_or_zero();
            }
        }
        results.push(IndicatorValue::new(
            IndicatorType::Obv,
            "OBV",
            candle.timestamp,
            math::round_to(obv, 2),
        ));
    }

    results
}

pub struct ObvIndicator;

impl Indicator for ObvIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Obv
    }

    fn min_samples(&self, _params: &IndicatorParams) -> Result<usize, IndicatorError> {
        Ok(2)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        _params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        Ok(calculate_obv(candles))
    }
}
