//! # Parameter values and typed entries.
//!
//! [`Value`] is what travels: in `"edit"` notifications and in the save body,
//! where it serializes as a bare JSON number or boolean. [`Param`] is what the
//! model stores: the value together with how a numeric field is stepped and
//! displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter value as seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
}

impl Value {
    /// Kind name used in error messages.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A stored parameter.
///
/// Numeric entries carry the increment used by step buttons and the number of
/// digits shown after the decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    Numeric {
        value: f64,
        step: f64,
        precision: usize,
    },
    Boolean {
        value: bool,
    },
}

impl Param {
    /// Numeric entry.
    pub fn numeric(value: f64, step: f64, precision: usize) -> Self {
        Param::Numeric {
            value,
            step,
            precision,
        }
    }

    /// Boolean entry.
    pub fn boolean(value: bool) -> Self {
        Param::Boolean { value }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> Value {
        match *self {
            Param::Numeric { value, .. } => Value::Number(value),
            Param::Boolean { value } => Value::Bool(value),
        }
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.value().kind()
    }

    /// Step increment (numeric entries only).
    #[inline]
    pub fn step(&self) -> Option<f64> {
        match *self {
            Param::Numeric { step, .. } => Some(step),
            Param::Boolean { .. } => None,
        }
    }

    /// Value as the form displays it: fixed digits, or `Yes` / `No`.
    pub fn display(&self) -> String {
        match *self {
            Param::Numeric {
                value, precision, ..
            } => format!("{value:.precision$}"),
            Param::Boolean { value: true } => "Yes".to_string(),
            Param::Boolean { value: false } => "No".to_string(),
        }
    }

    /// True if both entries would look the same in the form.
    pub fn displays_same(&self, other: &Param) -> bool {
        match (self, other) {
            (Param::Boolean { value: a }, Param::Boolean { value: b }) => a == b,
            (Param::Numeric { .. }, Param::Numeric { .. }) => self.display() == other.display(),
            _ => false,
        }
    }

    /// Replaces the value, keeping step and precision.
    pub(crate) fn replace(&mut self, new: Value) -> Result<(), (&'static str, &'static str)> {
        match (self, new) {
            (Param::Numeric { value, .. }, Value::Number(n)) => *value = n,
            (Param::Boolean { value }, Value::Bool(b)) => *value = b,
            (current, new) => return Err((current.kind(), new.kind())),
        }
        Ok(())
    }
}
