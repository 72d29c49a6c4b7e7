//! Domain errors for calculations.

use calculations_sdk::CalculationError;
use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors for calculation operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Operator kind outside the supported set.
    #[error("Unsupported calculation type: {0}")]
    UnsupportedOperation(String),

    #[error("Division by zero not permitted.")]
    DivisionByZero,

    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("calculation not found: {id}")]
    NotFound { id: Uuid },

    /// Unique or foreign key constraint rejected by storage.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("database error: {0}")]
    Database(String),
}

impl DomainError {
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

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

/// Lift model-level failures (factory, result computation) into the domain.
impl From<CalculationError> for DomainError {
    fn from(e: CalculationError) -> Self {
        match e {
            CalculationError::UnsupportedOperation(kind) => Self::UnsupportedOperation(kind),
            CalculationError::DivisionByZero => Self::DivisionByZero,
            CalculationError::Validation { field, message } => Self::Validation { field, message },
            CalculationError::NotFound { id } => Self::NotFound { id },
            CalculationError::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
            CalculationError::Database(msg) => Self::Database(msg),
        }
    }
}

/// Convert DomainError to the SDK error exposed to consumers.
impl From<DomainError> for CalculationError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnsupportedOperation(kind) => Self::UnsupportedOperation(kind),
            DomainError::DivisionByZero => Self::DivisionByZero,
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::NotFound { id } => Self::not_found(id),
            DomainError::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
            DomainError::Database(msg) => Self::Database(msg),
        }
    }
}
