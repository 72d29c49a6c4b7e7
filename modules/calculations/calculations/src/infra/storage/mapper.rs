//! Entity to domain model mappers.

use calculations_sdk::{Calculation, CalculationKind};
use sea_orm::ActiveValue::{Set, Unchanged};

use super::entity::calculation;
use crate::domain::error::DomainError;

/// Convert a stored row into the SDK model.
///
/// A `type` value outside the supported set means the row was written by
/// something other than this module; it is reported, not guessed.
impl TryFrom<calculation::Model> for Calculation {
    type Error = DomainError;

    fn try_from(model: calculation::Model) -> Result<Self, Self::Error> {
        let kind = model.kind.parse::<CalculationKind>().map_err(|_| {
            DomainError::database(format!(
                "calculation {} has unsupported stored type '{}'",
                model.id, model.kind
            ))
        })?;

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            kind,
            a: model.a,
            b: model.b,
        })
    }
}

/// Active model for inserting a new calculation.
pub fn new_calculation_to_active_model(calc: &Calculation) -> calculation::ActiveModel {
    calculation::ActiveModel {
        id: Set(calc.id),
        user_id: Set(calc.user_id),
        kind: Set(calc.kind.as_str().to_owned()),
        a: Set(calc.a),
        b: Set(calc.b),
    }
}

/// Active model for an operand update. Identity, owner and kind stay as stored.
pub fn operands_to_active_model(calc: &Calculation) -> calculation::ActiveModel {
    calculation::ActiveModel {
        id: Unchanged(calc.id),
        user_id: Unchanged(calc.user_id),
        kind: Unchanged(calc.kind.as_str().to_owned()),
        a: Set(calc.a),
        b: Set(calc.b),
    }
}
