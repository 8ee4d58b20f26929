use serde_json::{Map, Value};

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::*;
use crate::models::indicators::{Candle, MetricPoint};

pub fn parse_f64(value: &str) -> Result<f64, IndicatorError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))
}

pub fn parse_usize(value: &str) -> Result<usize, IndicatorError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))
}

pub fn parse_f64_from_value(name: &str, value: &Value) -> Result<f64, IndicatorError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| IndicatorError::InvalidNumericFormat(name.to_string())),
        Value::String(s) => parse_f64(s),
        _ => Err(IndicatorError::InvalidNumericFormat(name.to_string())),
    }
}

pub fn parse_usize_from_value(name: &str, value: &Value) -> Result<usize, IndicatorError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v as usize);
            }
            // Accept integral floats such as 14.0
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as usize),
                _ => Err(IndicatorError::InvalidNumericFormat(name.to_string())),
            }
        }
        Value::String(s) => parse_usize(s),
        _ => Err(IndicatorError::InvalidNumericFormat(name.to_string())),
    }
}

/// Parameters of one indicator call.
///
/// Scalar settings live in a JSON map (as they arrive from an
/// `IndicatorConfig`); series fetched from collaborators ride along in
/// dedicated slots so the computation itself stays free of I/O.
#[derive(Debug, Clone, Default)]
pub struct IndicatorParams {
    values: Map<String, Value>,
    metric: Option<Vec<MetricPoint>>,
    benchmark: Option<Vec<Candle>>,
}

impl IndicatorParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn with_metric_series(mut self, series: Vec<MetricPoint>) -> Self {
        self.metric = Some(series);
        self
    }

    pub fn with_benchmark(mut self, candles: Vec<Candle>) -> Self {
        self.benchmark = Some(candles);
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn metric_series(&self) -> Option<&[MetricPoint]> {
        self.metric.as_deref().filter(|s| !s.is_empty())
    }

    pub fn benchmark(&self) -> Option<&[Candle]> {
        self.benchmark.as_deref().filter(|s| !s.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn usize_or(&self, key: &str, default: usize) -> Result<usize, IndicatorError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => parse_usize_from_value(key, value),
        }
    }

    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64, IndicatorError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => parse_f64_from_value(key, value),
        }
    }

    pub fn str_or(&self, key: &str, default: &str) -> Result<String, IndicatorError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(IndicatorError::invalid(key, "expected a string")),
        }
    }

    pub fn strings_or(&self, key: &str, default: &[&str]) -> Result<Vec<String>, IndicatorError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default.iter().map(|s| s.to_string()).collect()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(IndicatorError::invalid(key, "expected a list of strings")),
                })
                .collect(),
            Some(_) => Err(IndicatorError::invalid(key, "expected a list of strings")),
        }
    }

    /// A window length, at least `min`.
    pub fn period(&self, key: &str, default: usize, min: usize) -> Result<usize, IndicatorError> {
        validate_period(key, self.usize_or(key, default)?, min)
    }

    pub fn positive_f64(&self, key: &str, default: f64) -> Result<f64, IndicatorError> {
        validate_positive(key, self.f64_or(key, default)?)
    }
}

impl From<Map<String, Value>> for IndicatorParams {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}
