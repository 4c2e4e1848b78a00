//! Hyper-parameter values and maps.
//!
//! [`ParamValue`] is deliberately loose so that parameter grids can be read
//! straight from TOML or JSON. Estimators pull typed values back out through
//! [`ParamsExt`].

use crate::core::error::{CrossValError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single hyper-parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Text(String),
    /// Sequence of values, e.g. hidden layer sizes
    List(Vec<ParamValue>),
}

/// Named hyper-parameters, ordered by name.
pub type Params = BTreeMap<String, ParamValue>;

impl ParamValue {
    /// Whether this value is a sequence rather than a scalar.
    pub fn is_composite(&self) -> bool {
        matches!(self, ParamValue::List(_))
    }

    /// Integer view of the value. Floats with no fractional part convert.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            ParamValue::Float(v) if v.fract() == 0.0 => Some(v as i64),
            _ => None,
        }
    }

    /// Floating point view of the value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// String view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Sequence view of the value.
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{:?}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
            ParamValue::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Typed accessors over a [`Params`] map.
pub trait ParamsExt {
    /// Non-negative integer parameter, `None` when absent.
    fn usize_param(&self, name: &str) -> Result<Option<usize>>;

    /// Floating point parameter, `None` when absent.
    fn f64_param(&self, name: &str) -> Result<Option<f64>>;

    /// Boolean parameter, `None` when absent.
    fn bool_param(&self, name: &str) -> Result<Option<bool>>;

    /// Fail on the first key not listed in `known`.
    fn reject_unknown(&self, known: &[&str]) -> Result<()>;
}

impl ParamsExt for Params {
    fn usize_param(&self, name: &str) -> Result<Option<usize>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => match value.as_i64() {
                Some(v) if v >= 0 => Ok(Some(v as usize)),
                _ => Err(CrossValError::invalid_parameter(
                    name,
                    value.to_string(),
                    "must be a non-negative integer",
                )),
            },
        }
    }

    fn f64_param(&self, name: &str) -> Result<Option<f64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                CrossValError::invalid_parameter(name, value.to_string(), "must be a number")
            }),
        }
    }

    fn bool_param(&self, name: &str) -> Result<Option<bool>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value.as_bool().map(Some).ok_or_else(|| {
                CrossValError::invalid_parameter(name, value.to_string(), "must be a boolean")
            }),
        }
    }

    fn reject_unknown(&self, known: &[&str]) -> Result<()> {
        match self.iter().find(|(key, _)| !known.contains(&key.as_str())) {
            Some((key, value)) => Err(CrossValError::invalid_parameter(
                key.as_str(),
                value.to_string(),
                format!("unexpected parameter, expected one of {:?}", known),
            )),
            None => Ok(()),
        }
    }
}
