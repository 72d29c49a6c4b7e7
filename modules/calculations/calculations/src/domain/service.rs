//! Domain service for calculations.
//!
//! Builds calculations through the factory, persists them via the
//! repository port and enforces ownership on every read and write.

use std::sync::Arc;

use calculations_sdk::{Calculation, CalculationKind, CalculationPatch, NewCalculation};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::DomainError;
use super::repo::CalculationsRepository;

/// Domain service for calculation operations.
pub struct Service {
    repo: Arc<dyn CalculationsRepository>,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn CalculationsRepository>) -> Self {
        Self { repo }
    }

    /// Create a calculation. An unsupported kind fails before anything is written.
    #[instrument(skip(self, new_calculation), fields(owner_id = %owner_id, kind = %new_calculation.kind))]
    pub async fn create_calculation(
        &self,
        owner_id: Uuid,
        new_calculation: NewCalculation,
    ) -> Result<Calculation, DomainError> {
        let calculation = Calculation::create(
            &new_calculation.kind,
            owner_id,
            new_calculation.a,
            new_calculation.b,
        )?;

        let created = self.repo.insert(calculation).await?;
        info!(calculation_id = %created.id, kind = %created.kind, "calculation created");
        Ok(created)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id, calculation_id = %id))]
    pub async fn get_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Calculation, DomainError> {
        debug!("Getting calculation by id");
        self.repo
            .find_by_id(owner_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_calculations(&self, owner_id: Uuid) -> Result<Vec<Calculation>, DomainError> {
        let items = self.repo.list_by_owner(owner_id).await?;
        debug!("Listed {} calculations", items.len());
        Ok(items)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn count_calculations(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        self.repo.count(owner_id).await
    }

    /// Change operands. The update shape cannot see the operator kind, so a
    /// division left with a zero divisor is rejected here, before the write.
    #[instrument(skip(self, patch), fields(owner_id = %owner_id, calculation_id = %id))]
    pub async fn update_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: CalculationPatch,
    ) -> Result<Calculation, DomainError> {
        let mut calculation = self.get_calculation(owner_id, id).await?;
        if patch.is_empty() {
            debug!("Empty patch, nothing to update");
            return Ok(calculation);
        }

        calculation.apply_patch(&patch);
        if calculation.kind == CalculationKind::Division && calculation.b == 0.0 {
            return Err(DomainError::DivisionByZero);
        }

        let updated = self.repo.update(calculation).await?;
        info!("calculation updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id, calculation_id = %id))]
    pub async fn delete_calculation(&self, owner_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(owner_id, id).await? {
            return Err(DomainError::not_found(id));
        }
        info!("calculation deleted");
        Ok(())
    }
}
