//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 14;

/// Calculate ADX indicator
///
/// ADX measures trend strength regardless of direction.
/// +DM counts only when the up move beats the down move and is positive
/// (and symmetrically for -DM); TR, +DM and -DM are smoothed with a rolling
/// mean, then DX is averaged once more over `period`.
pub fn calculate_adx(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let len = candles.len();
    let mut tr_values = Vec::with_capacity(len);
    let mut plus_dm_values = Vec::with_capacity(len);
    let mut minus_dm_values = Vec::with_capacity(len);

    for i in 0..len {
        if i == 0 {
            tr_values.push(candles[0].high - candles[0].low);
            plus_dm_values.push(0.0);
            minus_dm_values.push(0.0);
            continue;
        }

        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));

        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;

        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    let tr_smooth = math::rolling_mean(&tr_values, period);
    let plus_dm_smooth = math::rolling_mean(&plus_dm_values, period);
    let minus_dm_smooth = math::rolling_mean(&minus_dm_values, period);

    // +DI and -DI, then DX
    let dx: Vec<Option<f64>> = (0..len)
        .map(|i| {
            let tr = tr_smooth[i]?;
            let (plus_di, minus_di) = if tr > 0.0 {
                (100.0 * plus_dm_smooth[i]? / tr, 100.0 * minus_dm_smooth[i]? / tr)
            } else {
                (0.0, 0.0)
            };
            let di_sum = plus_di + minus_di;
            Some(if di_sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / di_sum
            } else {
                0.0
            })
        })
        .collect();

    let adx = math::rolling_apply_opt(&dx, period, math::mean);
    let name = format!("ADX({})", period);

    candles
        .iter()
        .zip(adx)
        .filter_map(|(candle, value)| {
            value.map(|v| {
                IndicatorValue::new(IndicatorType::Adx, name.clone(), candle.timestamp, math::round_to(v, 2))
                    .with_param("period", period)
            })
        })
        .collect()
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Vec<IndicatorValue> {
    calculate_adx(candles, DEFAULT_PERIOD)
}

pub struct AdxIndicator;

impl Indicator for AdxIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Adx
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
        Ok(calculate_adx(candles, period))
    }
}
