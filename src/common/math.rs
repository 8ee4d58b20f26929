//! Series math shared by the indicator implementations.
//!
//! Rolling helpers return one slot per input sample; a slot is `None` until
//! the window is full (or while any sample inside the window is missing).

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let high_low = high - low;
    let high_close = (high - prev_close).abs();
    let low_close = (low - prev_close).abs();
    high_low.max(high_close).max(low_close)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample covariance of two equally sized slices.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let sum: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    Some(sum / (xs.len() - 1) as f64)
}

/// Pearson correlation; `None` when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let cov = sample_covariance(xs, ys)?;
    let std_x = sample_std(xs)?;
    let std_y = sample_std(ys)?;
    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }
    Some((cov / (std_x * std_y)).clamp(-1.0, 1.0))
}

/// Mean absolute deviation around the window mean.
pub fn mean_abs_deviation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    mean(&values.iter().map(|v| (v - avg).abs()).collect::<Vec<_>>())
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Apply `f` over every full window of `period` samples.
pub fn rolling_apply<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for end in period..=values.len() {
        out[end - 1] = f(&values[end - period..end]);
    }
    out
}

/// Like [`rolling_apply`] for series with gaps; a window containing a gap yields `None`.
pub fn rolling_apply_opt<F>(values: &[Option<f64>], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for end in period..=values.len() {
        let window: Option<Vec<f64>> = values[end - period..end].iter().copied().collect();
        out[end - 1] = window.and_then(|w| f(&w));
    }
    out
}

pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_apply(values, period, mean)
}

pub fn rolling_sum(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_apply(values, period, |w| Some(w.iter().sum()))
}

pub fn rolling_std(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_apply(values, period, sample_std)
}

pub fn rolling_max(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_apply(values, period, |w| w.iter().copied().reduce(f64::max))
}

pub fn rolling_min(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_apply(values, period, |w| w.iter().copied().reduce(f64::min))
}

/// Exponentially weighted mean with `alpha = 2 / (span + 1)`.
///
/// Uses the bias-adjusted form: every output is the weighted average of all
/// samples seen so far, so the series is defined from the first sample on.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    values
        .iter()
        .map(|&v| {
            numerator = v + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

/// Last value of the bias-adjusted EMA.
pub fn ema(values: &[f64], span: usize) -> Option<f64> {
    ewm_mean(values, span).last().copied()
}

/// Fractional change against the previous sample; `None` at the start or after a zero.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    out.push(None);
    for pair in values.windows(2) {
        out.push(if pair[0] != 0.0 {
            Some(pair[1] / pair[0] - 1.0)
        } else {
            None
        });
    }
    out.truncate(values.len());
    out
}

/// Natural log return against the previous sample.
pub fn log_returns(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    out.push(None);
    for pair in values.windows(2) {
        out.push(if pair[0] > 0.0 && pair[1] > 0.0 {
            Some((pair[1] / pair[0]).ln())
        } else {
            None
        });
    }
    out.truncate(values.len());
    out
}
