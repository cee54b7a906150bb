//! # ParamSet: a fixed set of named parameters.
//!
//! The key set is decided when the set is built. Mutation through the model
//! only ever replaces values of existing keys; unknown names and kind changes
//! are rejected with a [`ParamError`].
//!
//! ## Wire form
//! A `ParamSet` serializes as a flat JSON object of values, which is also the
//! form `from_json` accepts:
//! ```text
//! {"fridge_setpoint": 18.0, "running": false, ...}
//! ```
//!
//! ## Example
//! ```rust
//! use paramsync::{ParamSet, Value};
//!
//! let params = ParamSet::new()
//!     .numeric("fridge_setpoint", 18.0, 0.1, 1)
//!     .boolean("running", false);
//!
//! assert_eq!(params.value("running"), Some(Value::Bool(false)));
//! assert_eq!(
//!     serde_json::to_string(&params).unwrap(),
//!     r#"{"fridge_setpoint":18.0,"running":false}"#
//! );
//! ```

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ParamError;
use crate::params::value::{Param, Value};

/// Ordered mapping of parameter name to typed entry.
///
/// Cloning produces a fully independent copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: BTreeMap<String, Param>,
}

impl ParamSet {
    /// Step used for numbers read by [`ParamSet::from_json`].
    pub const DEFAULT_STEP: f64 = 1.0;
    /// Precision used for numbers read by [`ParamSet::from_json`].
    pub const DEFAULT_PRECISION: usize = 0;

    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a numeric entry.
    #[must_use]
    pub fn numeric(
        mut self,
        name: impl Into<String>,
        value: f64,
        step: f64,
        precision: usize,
    ) -> Self {
        self.entries
            .insert(name.into(), Param::numeric(value, step, precision));
        self
    }

    /// Adds (or replaces) a boolean entry.
    #[must_use]
    pub fn boolean(mut self, name: impl Into<String>, value: bool) -> Self {
        self.entries.insert(name.into(), Param::boolean(value));
        self
    }

    /// Reads a flat JSON object of numbers and booleans.
    ///
    /// Numbers get [`DEFAULT_STEP`](Self::DEFAULT_STEP) and
    /// [`DEFAULT_PRECISION`](Self::DEFAULT_PRECISION); refine them with
    /// [`describe`](Self::describe).
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ParamError> {
        let object = json.as_object().ok_or_else(|| ParamError::InvalidInitial {
            reason: "expected a JSON object".to_string(),
        })?;

        let mut entries = BTreeMap::new();
        for (name, raw) in object {
            let param = match raw {
                serde_json::Value::Bool(b) => Param::boolean(*b),
                serde_json::Value::Number(n) => {
                    let value = n.as_f64().ok_or_else(|| ParamError::InvalidInitial {
                        reason: format!("{name}: {n} is not representable"),
                    })?;
                    Param::numeric(value, Self::DEFAULT_STEP, Self::DEFAULT_PRECISION)
                }
                other => {
                    return Err(ParamError::InvalidInitial {
                        reason: format!("{name}: expected number or boolean, got {other}"),
                    });
                }
            };
            entries.insert(name.clone(), param);
        }
        Ok(Self { entries })
    }

    /// Sets step and display precision of an existing numeric entry.
    pub fn describe(&mut self, name: &str, step: f64, digits: usize) -> Result<(), ParamError> {
        match self.entries.get_mut(name) {
            Some(Param::Numeric {
                step: s,
                precision: p,
                ..
            }) => {
                *s = step;
                *p = digits;
                Ok(())
            }
            Some(Param::Boolean { .. }) => Err(ParamError::NotNumeric {
                name: name.to_string(),
            }),
            None => Err(unknown(name)),
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.entries.get(name)
    }

    #[inline]
    pub fn value(&self, name: &str) -> Option<Value> {
        self.entries.get(name).map(Param::value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Checks that every numeric entry has a finite value and step.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, param) in &self.entries {
            if let Param::Numeric { value, step, .. } = param {
                if !value.is_finite() {
                    return Err(ParamError::InvalidInitial {
                        reason: format!("{name}: value {value} is not finite"),
                    });
                }
                if !step.is_finite() {
                    return Err(ParamError::InvalidInitial {
                        reason: format!("{name}: step {step} is not finite"),
                    });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the value of an existing entry; returns the stored value.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> Result<Value, ParamError> {
        let param = self.entries.get_mut(name).ok_or_else(|| unknown(name))?;
        param
            .replace(value)
            .map_err(|(expected, found)| ParamError::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            })?;
        Ok(param.value())
    }

    /// Adds `delta` to a numeric entry; returns the stored value.
    pub(crate) fn adjust(&mut self, name: &str, delta: f64) -> Result<Value, ParamError> {
        match self.entries.get_mut(name) {
            Some(Param::Numeric { value, .. }) => {
                *value += delta;
                Ok(Value::Number(*value))
            }
            Some(Param::Boolean { .. }) => Err(ParamError::NotNumeric {
                name: name.to_string(),
            }),
            None => Err(unknown(name)),
        }
    }
}

fn unknown(name: &str) -> ParamError {
    ParamError::UnknownParameter {
        name: name.to_string(),
    }
}

impl Serialize for ParamSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, param) in &self.entries {
            map.serialize_entry(name, &param.value())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fridge() -> ParamSet {
        ParamSet::new()
            .numeric("fridge_setpoint", 18.0, 0.1, 1)
            .numeric("fridge_range_lower", 3.0, 1.0, 0)
            .boolean("running", false)
    }

    #[test]
    fn test_from_json_reads_numbers_and_booleans() {
        let set = ParamSet::from_json(&json!({"x": 3, "flag": true})).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("x"), Some(&Param::numeric(3.0, 1.0, 0)));
        assert_eq!(set.value("flag"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        let err = ParamSet::from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(err.as_label(), "param_invalid_initial");

        let err = ParamSet::from_json(&json!({"name": "fridge"})).unwrap_err();
        assert!(matches!(err, ParamError::InvalidInitial { reason } if reason.starts_with("name:")));
    }

    #[test]
    fn test_describe_numeric_only() {
        let mut set = ParamSet::from_json(&json!({"x": 3, "flag": true})).unwrap();
        set.describe("x", 0.5, 2).unwrap();
        assert_eq!(set.get("x"), Some(&Param::numeric(3.0, 0.5, 2)));

        assert!(matches!(
            set.describe("flag", 1.0, 0),
            Err(ParamError::NotNumeric { .. })
        ));
        assert!(matches!(
            set.describe("nope", 1.0, 0),
            Err(ParamError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_numbers() {
        assert_eq!(fridge().validate(), Ok(()));

        let err = fridge().numeric("x", f64::NAN, 1.0, 0).validate().unwrap_err();
        assert_eq!(
            err,
            ParamError::InvalidInitial {
                reason: "x: value NaN is not finite".into()
            }
        );

        let err = fridge()
            .numeric("x", 1.0, f64::INFINITY, 0)
            .validate()
            .unwrap_err();
        assert_eq!(err.as_label(), "param_invalid_initial");
    }

    #[test]
    fn test_assign_keeps_key_set() {
        let mut set = fridge();
        assert_eq!(set.assign("running", Value::Bool(true)), Ok(Value::Bool(true)));
        assert_eq!(
            set.assign("ghost", Value::Number(1.0)),
            Err(ParamError::UnknownParameter {
                name: "ghost".into()
            })
        );
        assert_eq!(
            set.assign("running", Value::Number(1.0)),
            Err(ParamError::TypeMismatch {
                name: "running".into(),
                expected: "boolean",
                found: "number",
            })
        );
        assert_eq!(set.len(), 3);
        assert!(!set.contains("ghost"));
    }

    #[test]
    fn test_adjust_numeric_only() {
        let mut set = fridge();
        assert_eq!(
            set.adjust("fridge_range_lower", -2.0),
            Ok(Value::Number(1.0))
        );
        assert_eq!(
            set.adjust("running", 1.0),
            Err(ParamError::NotNumeric {
                name: "running".into()
            })
        );
        assert_eq!(set.value("running"), Some(Value::Bool(false)));
    }

    #[test]
    fn test_clone_is_independent() {
        let source = fridge();
        let mut a = source.clone();
        let b = source.clone();
        a.assign("fridge_setpoint", Value::Number(4.0)).unwrap();

        assert_eq!(b.value("fridge_setpoint"), Some(Value::Number(18.0)));
        assert_eq!(source.value("fridge_setpoint"), Some(Value::Number(18.0)));
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let value = serde_json::to_value(fridge()).unwrap();
        assert_eq!(
            value,
            json!({"fridge_range_lower": 3.0, "fridge_setpoint": 18.0, "running": false})
        );
    }
}
