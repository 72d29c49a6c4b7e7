//! `SeaORM` repository implementation for calculations.

use async_trait::async_trait;
use calculations_sdk::Calculation;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};
use tracing::debug;
use uuid::Uuid;

use super::db::db_err;
use super::entity::calculation::{self, Entity as CalculationEntity};
use super::mapper::{new_calculation_to_active_model, operands_to_active_model};
use crate::domain::error::DomainError;
use crate::domain::repo::CalculationsRepository;

/// `SeaORM` implementation of `CalculationsRepository`.
pub struct OrmCalculationsRepository {
    db: DatabaseConnection,
}

impl OrmCalculationsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalculationsRepository for OrmCalculationsRepository {
    async fn insert(&self, calculation: Calculation) -> Result<Calculation, DomainError> {
        let model = new_calculation_to_active_model(&calculation)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Calculation::try_from(model)
    }

    async fn find_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Calculation>, DomainError> {
        CalculationEntity::find_by_id(id)
            .filter(calculation::Column::UserId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(Calculation::try_from)
            .transpose()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Calculation>, DomainError> {
        CalculationEntity::find()
            .filter(calculation::Column::UserId.eq(owner_id))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Calculation::try_from)
            .collect()
    }

    async fn count(&self, owner_id: Uuid) -> Result<u64, DomainError> {
        CalculationEntity::find()
            .filter(calculation::Column::UserId.eq(owner_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update(&self, calculation: Calculation) -> Result<Calculation, DomainError> {
        let id = calculation.id;
        match operands_to_active_model(&calculation).update(&self.db).await {
            Ok(model) => Calculation::try_from(model),
            Err(DbErr::RecordNotUpdated) => {
                debug!(calculation_id = %id, "update matched no row");
                Err(DomainError::not_found(id))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = CalculationEntity::delete_many()
            .filter(calculation::Column::Id.eq(id))
            .filter(calculation::Column::UserId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
