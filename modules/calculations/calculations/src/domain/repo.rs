//! Repository port for calculation persistence.

use async_trait::async_trait;
use calculations_sdk::Calculation;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Storage operations for calculations. Reads and deletes are scoped to
/// the owning user.
#[async_trait]
pub trait CalculationsRepository: Send + Sync {
    /// Persist a new calculation. One write, committed on success.
    async fn insert(&self, calculation: Calculation) -> Result<Calculation, DomainError>;

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid)
    -> Result<Option<Calculation>, DomainError>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Calculation>, DomainError>;

    async fn count(&self, owner_id: Uuid) -> Result<u64, DomainError>;

    /// Overwrite the operands of an existing calculation.
    async fn update(&self, calculation: Calculation) -> Result<Calculation, DomainError>;

    /// Returns `false` when no matching row existed.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
