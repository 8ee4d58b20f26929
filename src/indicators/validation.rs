use crate::indicators::error::IndicatorError;

/// Longest accepted window; keeps derived sample counts well clear of overflow.
pub const MAX_PERIOD: usize = 100_000;

pub fn validate_period(name: &str, period: usize, min: usize) -> Result<usize, IndicatorError> {
    if period < min {
        return Err(IndicatorError::invalid(
            name,
            format!("must be at least {}, got {}", min, period),
        ));
    }
    if period > MAX_PERIOD {
        return Err(IndicatorError::invalid(
            name,
            format!("must be at most {}, got {}", MAX_PERIOD, period),
        ));
    }
    Ok(period)
}

pub fn validate_positive(name: &str, value: f64) -> Result<f64, IndicatorError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(IndicatorError::invalid(
            name,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(value)
}

pub fn validate_macd_periods(fast: usize, slow: usize) -> Result<(), IndicatorError> {
    if fast >= slow {
        return Err(IndicatorError::invalid(
            "fast",
            format!("fast period ({}) must be shorter than slow period ({})", fast, slow),
        ));
    }
    Ok(())
}

pub fn validate_acceleration(acceleration: f64, maximum: f64) -> Result<(), IndicatorError> {
    validate_positive("acceleration", acceleration)?;
    validate_positive("maximum", maximum)?;
    if acceleration > maximum {
        return Err(IndicatorError::invalid(
            "acceleration",
            format!("step {} exceeds maximum {}", acceleration, maximum),
        ));
    }
    Ok(())
}
