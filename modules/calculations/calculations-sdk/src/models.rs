//! Public models for the calculations module.
//!
//! A calculation is a flat record carrying an explicit operator
//! discriminant. The result is never stored; it is derived on demand by
//! [`compute`], so a division persisted with a zero divisor stays readable
//! and only its result fails.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::CalculationError;

/// Arithmetic operator performed by a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl CalculationKind {
    /// Every supported operator, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
    ];

    /// Canonical (lowercase) name, also the value stored in the `type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationKind {
    type Err = CalculationError;

    /// Case-insensitive lookup. The error carries the original input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalculationError::UnsupportedOperation(s.to_owned()))
    }
}

/// Apply `kind` to the operands.
///
/// # Errors
///
/// Returns [`CalculationError::DivisionByZero`] for a division with `b == 0`.
pub fn compute(kind: CalculationKind, a: f64, b: f64) -> Result<f64, CalculationError> {
    match kind {
        CalculationKind::Addition => Ok(a + b),
        CalculationKind::Subtraction => Ok(a - b),
        CalculationKind::Multiplication => Ok(a * b),
        CalculationKind::Division => {
            if b == 0.0 {
                return Err(CalculationError::DivisionByZero);
            }
            Ok(a / b)
        }
    }
}

/// A persisted arithmetic operation owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: CalculationKind,
    pub a: f64,
    pub b: f64,
}

impl Calculation {
    /// Build a calculation with a freshly generated id.
    #[must_use]
    pub fn new(kind: CalculationKind, user_id: Uuid, a: f64, b: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            a,
            b,
        }
    }

    /// Factory keyed by operator name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::UnsupportedOperation`] carrying `kind` when
    /// it names no supported operator.
    pub fn create(kind: &str, user_id: Uuid, a: f64, b: f64) -> Result<Self, CalculationError> {
        let kind = kind.parse::<CalculationKind>()?;
        Ok(Self::new(kind, user_id, a, b))
    }

    /// Compute the result. Evaluated on every call, never cached.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::DivisionByZero`] for a division with `b == 0`.
    pub fn result(&self) -> Result<f64, CalculationError> {
        compute(self.kind, self.a, self.b)
    }

    /// Apply an operand patch. The operator kind is never touched.
    pub fn apply_patch(&mut self, patch: &CalculationPatch) {
        if let Some(a) = patch.a {
            self.a = a;
        }
        if let Some(b) = patch.b {
            self.b = b;
        }
    }
}

/// Data for creating a new calculation.
///
/// `kind` is kept as the raw operator name: it is resolved by
/// [`Calculation::create`] so every creation path goes through the factory.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    pub kind: String,
    pub a: f64,
    pub b: f64,
}

impl NewCalculation {
    #[must_use]
    pub fn new(kind: impl Into<String>, a: f64, b: f64) -> Self {
        Self {
            kind: kind.into(),
            a,
            b,
        }
    }
}

/// Partial update of a calculation's operands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalculationPatch {
    pub a: Option<f64>,
    pub b: Option<f64>,
}

impl CalculationPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }
}
