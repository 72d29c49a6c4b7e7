//! Calculations error types.
//!
//! Transport-agnostic error definitions for the calculations module.

use thiserror::Error;
use uuid::Uuid;

/// Error type for calculation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// The operator kind is not one of the supported operations.
    #[error("Unsupported calculation type: {0}")]
    UnsupportedOperation(String),

    /// A division was attempted with a zero divisor.
    #[error("Division by zero not permitted.")]
    DivisionByZero,

    /// Request data failed validation.
    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Calculation not found (or not owned by the caller).
    #[error("calculation not found: {id}")]
    NotFound { id: Uuid },

    /// Storage rejected the write (unique or foreign key constraint).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(String),
}

impl CalculationError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }
}
