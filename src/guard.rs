//! Range-checked holders for tunable numeric parameters.

use std::fmt;

use thiserror::Error;

/// Error returned when a value falls outside a guard's accepted range.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{name} must be within [{min}, {max}], got {value}")]
pub struct OutOfRange {
    /// Name of the guarded parameter.
    pub name: &'static str,
    /// Rejected value, rendered for display.
    pub value: String,
    /// Inclusive lower bound of the guard.
    pub min: String,
    /// Inclusive upper bound of the guard.
    pub max: String,
}

/// A single numeric parameter that only accepts values within `[min, max]`.
///
/// Both bounds are inclusive, so a guard spanning `[0, i64::MAX]` accepts
/// `i64::MAX` itself. A rejected `set` leaves the held value untouched.
/// Callers sharing a guard across threads serialize access themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedValue<T> {
    name: &'static str,
    value: T,
    min: T,
    max: T,
}

impl<T> BoundedValue<T>
where
    T: Copy + PartialOrd + fmt::Display,
{
    /// Create a guard holding `initial`, which must itself lie within `[min, max]`.
    pub fn new(name: &'static str, initial: T, min: T, max: T) -> Result<Self, OutOfRange> {
        let mut guard = Self {
            name,
            value: min,
            min,
            max,
        };
        guard.set(initial)?;
        Ok(guard)
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Replace the held value when `value` is within range.
    pub fn set(&mut self, value: T) -> Result<(), OutOfRange> {
        if !self.accepts(value) {
            return Err(OutOfRange {
                name: self.name,
                value: value.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Whether `value` would be accepted by [`BoundedValue::set`].
    pub fn accepts(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}
