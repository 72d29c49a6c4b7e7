//! REST DTOs for calculations.
//!
//! `CalculationCreate` and `CalculationUpdate` only deserialize through
//! validation: payload fields are read as raw JSON first, so a wrong type
//! yields a field-specific message instead of a generic serde error.

use std::str::FromStr;

use calculations_sdk::{
    Calculation, CalculationError, CalculationKind, CalculationPatch, NewCalculation,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{FieldError, Operand, ValidationErrors, check_operand};

/// Operation accepted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl CalculationType {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Normalized (lowercase) name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl FromStr for CalculationType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldError::UnsupportedType {
                value: s.to_owned(),
            })
    }
}

impl From<CalculationType> for CalculationKind {
    fn from(t: CalculationType) -> Self {
        match t {
            CalculationType::Add => Self::Addition,
            CalculationType::Subtract => Self::Subtraction,
            CalculationType::Multiply => Self::Multiplication,
            CalculationType::Divide => Self::Division,
        }
    }
}

fn check_type(value: &Value) -> Result<CalculationType, FieldError> {
    match value {
        Value::Null => Err(FieldError::Missing { field: "type" }),
        Value::String(s) => s.parse(),
        _ => Err(FieldError::TypeNotString),
    }
}

// === Create ===

/// Validated request for creating a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CalculationCreate {
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    #[schema(example = 3)]
    pub a: f64,
    #[schema(example = 2)]
    pub b: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCalculationCreate {
    #[serde(rename = "type")]
    calculation_type: Value,
    a: Value,
    b: Value,
}

impl TryFrom<RawCalculationCreate> for CalculationCreate {
    type Error = ValidationErrors;

    fn try_from(raw: RawCalculationCreate) -> Result<Self, Self::Error> {
        let calculation_type = check_type(&raw.calculation_type);
        let a = check_operand(&raw.a, Operand::A);
        let b = check_operand(&raw.b, Operand::B);

        let (calculation_type, a, b) = match (calculation_type, a, b) {
            (Ok(t), Ok(a), Ok(b)) => (t, a, b),
            (t, a, b) => {
                let errors = [t.err(), a.err(), b.err()].into_iter().flatten().collect();
                return Err(ValidationErrors::new(errors));
            }
        };

        // Fast-fail only; Calculation::result() still rejects a zero divisor.
        if calculation_type == CalculationType::Divide && b == 0.0 {
            return Err(ValidationErrors::single(FieldError::DivideByZero));
        }

        Ok(Self {
            calculation_type,
            a,
            b,
        })
    }
}

impl<'de> Deserialize<'de> for CalculationCreate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCalculationCreate::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

impl CalculationCreate {
    /// Validate a JSON payload, reporting every field error found.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`].
    pub fn from_json(payload: Value) -> Result<Self, ValidationErrors> {
        let raw: RawCalculationCreate = serde_json::from_value(payload)
            .map_err(|e| ValidationErrors::single(FieldError::Malformed(e.to_string())))?;
        Self::try_from(raw)
    }

    /// Operator kind this request selects.
    #[must_use]
    pub fn kind(&self) -> CalculationKind {
        self.calculation_type.into()
    }

    /// Convert to the SDK creation input.
    #[must_use]
    pub fn into_new_calculation(self) -> NewCalculation {
        NewCalculation::new(self.kind().as_str(), self.a, self.b)
    }
}

// === Update ===

/// Validated partial update. The operator kind cannot be changed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct CalculationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 4)]
    pub a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 3)]
    pub b: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCalculationUpdate {
    /// `Some` whenever the key is present, `null` included.
    #[serde(rename = "type", deserialize_with = "present")]
    calculation_type: Option<Value>,
    a: Value,
    b: Value,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn check_optional_operand(value: &Value, operand: Operand) -> Result<Option<f64>, FieldError> {
    if value.is_null() {
        return Ok(None);
    }
    check_operand(value, operand).map(Some)
}

impl TryFrom<RawCalculationUpdate> for CalculationUpdate {
    type Error = ValidationErrors;

    fn try_from(raw: RawCalculationUpdate) -> Result<Self, Self::Error> {
        let kind = raw
            .calculation_type
            .map_or(Ok(()), |_| Err(FieldError::TypeImmutable));
        let a = check_optional_operand(&raw.a, Operand::A);
        let b = check_optional_operand(&raw.b, Operand::B);

        match (kind, a, b) {
            (Ok(()), Ok(a), Ok(b)) => Ok(Self { a, b }),
            (kind, a, b) => Err(ValidationErrors::new(
                [kind.err(), a.err(), b.err()].into_iter().flatten().collect(),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for CalculationUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCalculationUpdate::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

impl CalculationUpdate {
    /// Validate a JSON payload, reporting every field error found.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`].
    pub fn from_json(payload: Value) -> Result<Self, ValidationErrors> {
        let raw: RawCalculationUpdate = serde_json::from_value(payload)
            .map_err(|e| ValidationErrors::single(FieldError::Malformed(e.to_string())))?;
        Self::try_from(raw)
    }
}

impl From<CalculationUpdate> for CalculationPatch {
    fn from(req: CalculationUpdate) -> Self {
        Self { a: req.a, b: req.b }
    }
}

// === Response ===

/// Response DTO for a calculation, including its computed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[schema(example = "addition")]
    pub calculation_type: String,
    #[schema(example = 9)]
    pub a: f64,
    #[schema(example = 8)]
    pub b: f64,
    #[schema(example = 17)]
    pub result: f64,
}

impl TryFrom<&Calculation> for CalculationResponse {
    type Error = CalculationError;

    /// Fails with `DivisionByZero` when the result cannot be produced; the
    /// stored record itself is unaffected.
    fn try_from(calc: &Calculation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: calc.id,
            calculation_type: calc.kind.as_str().to_owned(),
            a: calc.a,
            b: calc.b,
            result: calc.result()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculation_create_valid() {
        let calc = CalculationCreate::from_json(json!({"type": "subtract", "a": 10, "b": 6})).unwrap();
        assert_eq!(calc.calculation_type, CalculationType::Subtract);
        assert_eq!(calc.a, 10.0);
        assert_eq!(calc.b, 6.0);
    }

    #[test]
    fn test_type_is_matched_case_insensitively_and_normalized() {
        for (raw, expected) in [
            ("Add", CalculationType::Add),
            ("SUBTRACT", CalculationType::Subtract),
            ("mUlTiPlY", CalculationType::Multiply),
            ("Divide", CalculationType::Divide),
        ] {
            let calc = CalculationCreate::from_json(json!({"type": raw, "a": 1, "b": 2})).unwrap();
            assert_eq!(calc.calculation_type, expected);
            let out = serde_json::to_value(calc).unwrap();
            assert_eq!(out["type"], expected.as_str());
        }
    }

    #[test]
    fn test_type_must_be_a_string() {
        let err = CalculationCreate::from_json(json!({"type": 13, "a": 4, "b": 5})).unwrap_err();
        assert_eq!(err.errors(), [FieldError::TypeNotString]);
        assert!(err.to_string().to_lowercase().contains("must be a string"));
    }

    #[test]
    fn test_type_must_be_known() {
        let err =
            CalculationCreate::from_json(json!({"type": "invalid", "a": 4, "b": 5})).unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn test_first_operand_must_be_a_number() {
        let err =
            CalculationCreate::from_json(json!({"type": "add", "a": "four", "b": 5})).unwrap_err();
        assert!(
            err.to_string()
                .to_lowercase()
                .contains("first value should be a number")
        );
    }

    #[test]
    fn test_second_operand_must_be_a_number() {
        let err =
            CalculationCreate::from_json(json!({"type": "add", "a": 4, "b": "five"})).unwrap_err();
        assert!(
            err.to_string()
                .to_lowercase()
                .contains("second value should be a number")
        );
    }

    #[test]
    fn test_cannot_divide_by_zero() {
        let err =
            CalculationCreate::from_json(json!({"type": "Divide", "a": 4, "b": 0})).unwrap_err();
        assert_eq!(err.errors(), [FieldError::DivideByZero]);
        assert!(err.to_string().to_lowercase().contains("cannot divide by zero"));
    }

    #[test]
    fn test_divide_by_zero_rejected_for_any_dividend() {
        for a in [json!(0), json!(-7), json!(3.25), json!(1e300)] {
            for b in [json!(0), json!(0.0), json!(-0.0)] {
                let err = CalculationCreate::from_json(json!({"type": "divide", "a": a, "b": b}))
                    .unwrap_err();
                assert_eq!(err.errors(), [FieldError::DivideByZero], "a={a}, b={b}");
            }
        }
    }

    #[test]
    fn test_divide_by_zero_not_reported_while_fields_are_invalid() {
        let err =
            CalculationCreate::from_json(json!({"type": "divide", "a": "x", "b": 0})).unwrap_err();
        assert_eq!(
            err.errors(),
            [FieldError::NotANumber {
                operand: Operand::A
            }]
        );
    }

    #[test]
    fn test_zero_divisor_allowed_for_other_types() {
        let calc = CalculationCreate::from_json(json!({"type": "multiply", "a": 4, "b": 0})).unwrap();
        assert_eq!(calc.b, 0.0);
    }

    #[test]
    fn test_all_field_errors_are_collected() {
        let err = CalculationCreate::from_json(json!({"type": 1, "a": "x", "b": false})).unwrap_err();
        assert_eq!(err.errors().len(), 3);
        assert!(err.contains(&FieldError::TypeNotString));
        assert!(err.contains(&FieldError::NotANumber {
            operand: Operand::B
        }));
    }

    #[test]
    fn test_missing_fields_are_required() {
        let err = CalculationCreate::from_json(json!({"a": 1})).unwrap_err();
        assert!(err.contains(&FieldError::Missing { field: "type" }));
        assert!(err.contains(&FieldError::Missing { field: "b" }));
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let err = CalculationCreate::from_json(json!("add 1 2")).unwrap_err();
        assert!(matches!(err.errors(), [FieldError::Malformed(_)]));
    }

    #[test]
    fn test_serde_deserialize_goes_through_validation() {
        let err = serde_json::from_value::<CalculationCreate>(json!({"type": 13, "a": 4, "b": 5}))
            .unwrap_err();
        assert!(err.to_string().contains("Type must be a string"));

        let ok: CalculationCreate =
            serde_json::from_str(r#"{"type": "Add", "a": 3, "b": 2.5}"#).unwrap();
        assert_eq!(ok.kind(), CalculationKind::Addition);
    }

    #[test]
    fn test_into_new_calculation_uses_operator_name() {
        let calc = CalculationCreate::from_json(json!({"type": "divide", "a": 9, "b": 3})).unwrap();
        let new_calc = calc.into_new_calculation();
        assert_eq!(new_calc.kind, "division");

        let built = Calculation::create(&new_calc.kind, Uuid::new_v4(), new_calc.a, new_calc.b)
            .unwrap();
        assert_eq!(built.kind, CalculationKind::Division);
    }

    #[test]
    fn test_update_accepts_partial_operands() {
        let upd = CalculationUpdate::from_json(json!({"a": 4})).unwrap();
        assert_eq!(upd, CalculationUpdate { a: Some(4.0), b: None });

        let patch: CalculationPatch = CalculationUpdate::from_json(json!({"b": null}))
            .unwrap()
            .into();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_rejects_type_change_and_bad_operands() {
        let err =
            CalculationUpdate::from_json(json!({"type": "add", "b": "three"})).unwrap_err();
        assert!(err.contains(&FieldError::TypeImmutable));
        assert!(err.contains(&FieldError::NotANumber {
            operand: Operand::B
        }));
    }

    #[test]
    fn test_update_rejects_null_type_key() {
        let err = CalculationUpdate::from_json(json!({"type": null, "a": 1})).unwrap_err();
        assert_eq!(err.errors(), [FieldError::TypeImmutable]);

        let err = serde_json::from_value::<CalculationUpdate>(json!({"type": null})).unwrap_err();
        assert!(err.to_string().contains("Type cannot be changed"));
    }

    #[test]
    fn test_response_result_matches_entity_result() {
        let owner = Uuid::new_v4();
        for kind in CalculationKind::ALL {
            let calc = Calculation::new(kind, owner, 10.0, 8.5);
            let response = CalculationResponse::try_from(&calc).unwrap();
            assert_eq!(response.result, calc.result().unwrap());
            assert_eq!(response.id, calc.id);
            assert_eq!(response.calculation_type, kind.as_str());
        }
    }

    #[test]
    fn test_response_for_zero_divisor_fails() {
        let calc = Calculation::new(CalculationKind::Division, Uuid::new_v4(), 1.0, 0.0);
        assert_eq!(
            CalculationResponse::try_from(&calc),
            Err(CalculationError::DivisionByZero)
        );
    }

    #[test]
    fn test_response_serializes_type_key() {
        let calc = Calculation::new(CalculationKind::Addition, Uuid::new_v4(), 9.0, 8.0);
        let json = serde_json::to_value(CalculationResponse::try_from(&calc).unwrap()).unwrap();
        assert_eq!(json["type"], "addition");
        assert_eq!(json["result"], 17.0);
    }
}
