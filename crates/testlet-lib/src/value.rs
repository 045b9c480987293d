//! Equality rules for checked values.
//!
//! Each supported type implements [`Checkable`], which decides whether an
//! actual value matches an expected one and how the value is printed in
//! diagnostics:
//!
//! - `bool`, `i32`, `i64`: exact comparison.
//! - `f32`, `f64`: IEEE comparison, except that `0.0` and `-0.0` differ and
//!   `NaN` matches `NaN`.
//! - `Option<T: Display>`: objects, compared by their textual form. `None`
//!   is the absent object and only matches another `None`.
//!
//! [`Value`] wraps all of them in a tagged variant for callers that pick
//! the kind at runtime (e.g. from the command line).
//!
//! # Example
//!
//! ```
//! use testlet_lib::value::Checkable;
//!
//! assert!(0.0f64.matches(&0.0));
//! assert!(!0.0f64.matches(&-0.0));
//! assert!(f64::NAN.matches(&f64::NAN));
//! assert!(Some(42).matches(&Some(42)));
//! assert!(!None::<&str>.matches(&Some("null")));
//! ```

use std::fmt;

use crate::error::{HarnessError, Result};

/// Absent objects print as this.
pub const ABSENT: &str = "null";

/// A value that can be compared against an expected value of the same type.
pub trait Checkable {
    /// Whether `self` (the actual result) matches `expected`.
    fn matches(&self, expected: &Self) -> bool;

    /// Text used in `got (..), expected (..)` diagnostics.
    fn render(&self) -> String;
}

macro_rules! exact_checkable {
    ($($t:ty),*) => {
        $(
            impl Checkable for $t {
                fn matches(&self, expected: &Self) -> bool {
                    self == expected
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

exact_checkable!(bool, i32, i64);

macro_rules! float_checkable {
    ($($t:ty),*) => {
        $(
            impl Checkable for $t {
                fn matches(&self, expected: &Self) -> bool {
                    let (result, expected) = (*self, *expected);
                    if result == expected {
                        // Zeros compare equal; their reciprocals are +inf and -inf.
                        result != 0.0 || 1.0 / result == 1.0 / expected
                    } else {
                        result.is_nan() && expected.is_nan()
                    }
                }

                fn render(&self) -> String {
                    format!("{:?}", self)
                }
            }
        )*
    };
}

float_checkable!(f32, f64);

impl<T: fmt::Display> Checkable for Option<T> {
    fn matches(&self, expected: &Self) -> bool {
        match (self, expected) {
            (None, None) => true,
            (Some(result), Some(expected)) => result.to_string() == expected.to_string(),
            _ => false,
        }
    }

    fn render(&self) -> String {
        match self {
            Some(value) => value.to_string(),
            None => ABSENT.to_string(),
        }
    }
}

/// The kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A checked value whose kind is chosen at runtime.
///
/// Values of different kinds never match, so `Int(1)` does not match
/// `Long(1)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Textual form of an object, `None` when absent.
    Object(Option<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Capture an object by its textual form.
    pub fn object<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Object(Some(value.to_string()))
    }

    /// The absent object.
    pub fn absent() -> Self {
        Value::Object(None)
    }

    /// Parse `input` as a value of the given kind.
    ///
    /// For objects the literal `null` is the absent object; anything else is
    /// taken verbatim.
    pub fn parse(kind: Kind, input: &str) -> Result<Self> {
        let invalid = || HarnessError::InvalidValue {
            kind,
            input: input.to_string(),
        };
        let value = match kind {
            Kind::Bool => Value::Bool(input.parse().map_err(|_| invalid())?),
            Kind::Int => Value::Int(input.parse().map_err(|_| invalid())?),
            Kind::Long => Value::Long(input.parse().map_err(|_| invalid())?),
            Kind::Float => Value::Float(input.parse().map_err(|_| invalid())?),
            Kind::Double => Value::Double(input.parse().map_err(|_| invalid())?),
            Kind::Object if input == ABSENT => Value::absent(),
            Kind::Object => Value::object(input),
        };
        Ok(value)
    }
}

impl Checkable for Value {
    fn matches(&self, expected: &Self) -> bool {
        match (self, expected) {
            (Value::Bool(a), Value::Bool(b)) => a.matches(b),
            (Value::Int(a), Value::Int(b)) => a.matches(b),
            (Value::Long(a), Value::Long(b)) => a.matches(b),
            (Value::Float(a), Value::Float(b)) => a.matches(b),
            (Value::Double(a), Value::Double(b)) => a.matches(b),
            (Value::Object(a), Value::Object(b)) => a.matches(b),
            _ => false,
        }
    }

    fn render(&self) -> String {
        match self {
            Value::Bool(v) => v.render(),
            Value::Int(v) => v.render(),
            Value::Long(v) => v.render(),
            Value::Float(v) => v.render(),
            Value::Double(v) => v.render(),
            Value::Object(v) => v.render(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}
