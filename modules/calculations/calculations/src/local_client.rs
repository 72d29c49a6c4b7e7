use std::sync::Arc;

use async_trait::async_trait;
use calculations_sdk::{
    Calculation, CalculationError, CalculationPatch, CalculationsApi, NewCalculation,
};
use uuid::Uuid;

use crate::domain::service::Service;

/// In-process [`CalculationsApi`] backed by the domain service.
pub struct CalculationsLocalClient {
    service: Arc<Service>,
}

impl CalculationsLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculationsApi for CalculationsLocalClient {
    async fn create_calculation(
        &self,
        owner_id: Uuid,
        new_calculation: NewCalculation,
    ) -> Result<Calculation, CalculationError> {
        self.service
            .create_calculation(owner_id, new_calculation)
            .await
            .map_err(Into::into)
    }

    async fn get_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Calculation, CalculationError> {
        self.service
            .get_calculation(owner_id, id)
            .await
            .map_err(Into::into)
    }

    async fn list_calculations(&self, owner_id: Uuid) -> Result<Vec<Calculation>, CalculationError> {
        self.service
            .list_calculations(owner_id)
            .await
            .map_err(Into::into)
    }

    async fn count_calculations(&self, owner_id: Uuid) -> Result<u64, CalculationError> {
        self.service
            .count_calculations(owner_id)
            .await
            .map_err(Into::into)
    }

    async fn update_calculation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: CalculationPatch,
    ) -> Result<Calculation, CalculationError> {
        self.service
            .update_calculation(owner_id, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_calculation(&self, owner_id: Uuid, id: Uuid) -> Result<(), CalculationError> {
        self.service
            .delete_calculation(owner_id, id)
            .await
            .map_err(Into::into)
    }
}
