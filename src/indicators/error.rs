use thiserror::Error;

/// Errors raised while resolving or configuring an indicator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Unsupported indicator: {0}")]
    UnsupportedIndicator(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid numeric format: {0}")]
    InvalidNumericFormat(String),
}

impl IndicatorError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        IndicatorError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
