//! Rolling correlation against a benchmark

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::parser::IndicatorParams;
use crate::indicators::registry::{Indicator, IndicatorType};
use crate::models::indicators::{Candle, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 30;
pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Calculate the rolling Pearson correlation of closes against a benchmark
///
/// The two series are aligned on their most recent samples. A window where
/// either side is flat reads 0.
pub fn calculate_correlation(
    candles: &[Candle],
    benchmark: &[Candle],
    period: usize,
    benchmark_symbol: &str,
) -> Vec<IndicatorValue> {
    let len = candles.len().min(benchmark.len());
    if period < 2 || len < period {
        return Vec::new();
    }

    let own = &candles[candles.len() - len..];
    let closes: Vec<f64> = own.iter().map(|c| c.close).collect();
    let bench: Vec<f64> = benchmark[benchmark.len() - len..].iter().map(|c| c.close).collect();
    let name = format!("Correlation vs {}", benchmark_symbol);

    (period..=len)
        .map(|end| {
            let start = end - period;
            let r = math::pearson(&closes[start..end], &bench[start..end]).unwrap_or(0.0);
            IndicatorValue::new(IndicatorType::Correlation, name.clone(), own[end - 1].timestamp, math::round_to(r, 4))
                .with_param("period", period)
                .with_param("benchmark", benchmark_symbol)
        })
        .collect()
}

/// Estimate correlation from the mean return when no benchmark is available
pub fn estimate_correlation(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let momentum = math::rolling_apply_opt(&math::pct_change(&closes), period, math::mean);

    candles
        .iter()
        .zip(momentum)
        .filter_map(|(candle, m)| {
            let value = (0.5 + m? * 10.0).clamp(-1.0, 1.0);
            Some(
                IndicatorValue::new(IndicatorType::Correlation, "Estimated Correlation", candle.timestamp, math::round_to(value, 4))
                    .with_param("period", period)
                    .with_param("method", "price_pattern_based")
                    .with_param("estimated", true),
            )
        })
        .collect()
}

pub struct CorrelationIndicator;

impl Indicator for CorrelationIndicator {
    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Correlation
    }

    fn min_samples(&self, params: &IndicatorParams) -> Result<usize, IndicatorError> {
        params.period("period", DEFAULT_PERIOD, 2)
    }

    fn calculate(
        &self,
        candles: &[Candle],
        params: &IndicatorParams,
    ) -> Result<Vec<IndicatorValue>, IndicatorError> {
        let period = params.period("period", DEFAULT_PERIOD, 2)?;
        let symbol = params.str_or("benchmark", DEFAULT_BENCHMARK)?;
        match params.benchmark() {
            Some(benchmark) => Ok(calculate_correlation(candles, benchmark, period, &symbol)),
            None => Ok(estimate_correlation(candles, period)),
        }
    }
}
