//! Structural schema validation
//!
//! Each service-model message implements [`Validate`], checking presence of
//! mandatory IEs, value ranges and list sizes. Validation runs before a
//! payload is encoded and after a received payload is decoded.

use thiserror::Error;

/// A violated structural constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct SchemaViolation {
    /// Name of the offending IE
    pub field: &'static str,
    /// Description of the violation
    pub reason: String,
}

impl SchemaViolation {
    /// Creates a new violation for the given IE.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a violation for a mandatory IE that is absent.
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "mandatory IE is missing")
    }
}

/// Structural validation of a service-model message.
pub trait Validate {
    /// Checks the message against its schema constraints.
    fn validate(&self) -> Result<(), SchemaViolation>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

/// Returns the value of a mandatory IE, or a violation if it is absent.
pub fn require<'a, T>(field: &'static str, value: &'a Option<T>) -> Result<&'a T, SchemaViolation> {
    value.as_ref().ok_or_else(|| SchemaViolation::missing(field))
}

/// Checks that an integer IE lies within `min..=max`.
pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), SchemaViolation> {
    if value < min || value > max {
        return Err(SchemaViolation::new(
            field,
            format!("value {value} outside {min}..={max}"),
        ));
    }
    Ok(())
}

/// Checks that a list or string IE has between `min` and `max` elements.
pub fn check_size(field: &'static str, len: usize, min: usize, max: usize) -> Result<(), SchemaViolation> {
    if len < min || len > max {
        return Err(SchemaViolation::new(
            field,
            format!("size {len} outside {min}..={max}"),
        ));
    }
    Ok(())
}

/// Validates every element of a list IE.
pub fn validate_all<T: Validate>(items: &[T]) -> Result<(), SchemaViolation> {
    items.iter().try_for_each(Validate::validate)
}
