//! Typed parameter state.
//!
//! - [`Value`] number or boolean, as sent over the wire
//! - [`Param`] stored entry: numeric (value, step, precision) or boolean
//! - [`ParamSet`] the fixed, named collection a model owns

mod set;
mod value;

pub use set::ParamSet;
pub use value::{Param, Value};
