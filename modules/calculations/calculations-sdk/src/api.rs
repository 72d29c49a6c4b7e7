//! Calculations API trait
//!
//! Every operation is scoped to the owning user: a calculation owned by
//! someone else is reported as not found.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CalculationError;
use crate::models::{Calculation, CalculationPatch, NewCalculation};

#[async_trait]
pub trait CalculationsApi: Send + Sync {
    /// Create and persist a calculation for `owner_id`.
    async fn create_calculation(
        &self,
        owner_id: Uuid,
        new_calculation: NewCalculation,
    ) -> Result<Calculation, CalculationError>;

    /// Fetch a calculation by id.
    async fn get_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Calculation, CalculationError>;

    /// List all calculations of `owner_id`.
    async fn list_calculations(&self, owner_id: Uuid)
    -> Result<Vec<Calculation>, CalculationError>;

    /// Number of calculations owned by `owner_id`.
    async fn count_calculations(&self, owner_id: Uuid) -> Result<u64, CalculationError>;

    /// Change the operands of a calculation. The operator kind is immutable.
    async fn update_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: CalculationPatch,
    ) -> Result<Calculation, CalculationError>;

    /// Remove a calculation.
    async fn delete_calculation(&self, owner_id: Uuid, id: Uuid) -> Result<(), CalculationError>;
}
