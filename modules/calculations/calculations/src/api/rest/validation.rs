//! Boundary validation errors.
//!
//! Per-field failures are collected together so a client sees every
//! problem with its payload at once; the cross-field divide-by-zero rule
//! is only reported once every field is individually valid.

use std::fmt;

use calculations_sdk::CalculationError;
use serde_json::Value;
use thiserror::Error;

/// Numeric operand of a calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl Operand {
    /// Payload key.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("First value"),
            Self::B => f.write_str("Second value"),
        }
    }
}

/// A single rejected field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field required")]
    Missing { field: &'static str },

    #[error("Input should be an object: {0}")]
    Malformed(String),

    #[error("Type must be a string")]
    TypeNotString,

    #[error("Type must be one of 'add', 'subtract', 'multiply' or 'divide'")]
    UnsupportedType { value: String },

    #[error("Type cannot be changed")]
    TypeImmutable,

    #[error("{operand} should be a number")]
    NotANumber { operand: Operand },

    #[error("Cannot divide by zero")]
    DivideByZero,
}

impl FieldError {
    /// Payload key the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } => *field,
            Self::Malformed(_) => "body",
            Self::TypeNotString | Self::UnsupportedType { .. } | Self::TypeImmutable => "type",
            Self::NotANumber { operand } => operand.field(),
            Self::DivideByZero => "b",
        }
    }
}

/// Every field error found in one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    #[must_use]
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {e}", e.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A lone divide-by-zero keeps its dedicated kind; anything else is a
/// validation failure naming the first offending field.
impl From<ValidationErrors> for CalculationError {
    fn from(e: ValidationErrors) -> Self {
        match e.errors() {
            [FieldError::DivideByZero] => Self::DivisionByZero,
            [first, ..] => Self::validation(first.field(), e.to_string()),
            [] => Self::validation("body", "invalid payload"),
        }
    }
}

/// Accept integers and reals; reject strings, booleans and everything else.
pub(crate) fn check_operand(value: &Value, operand: Operand) -> Result<f64, FieldError> {
    match value {
        Value::Null => Err(FieldError::Missing {
            field: operand.field(),
        }),
        Value::Number(n) => n.as_f64().ok_or(FieldError::NotANumber { operand }),
        _ => Err(FieldError::NotANumber { operand }),
    }
}
