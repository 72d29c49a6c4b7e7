//! `SeaORM` access to the owner table.
//!
//! Users are managed elsewhere; this repository only covers what the
//! calculations depend on: creating an owner row, checking it exists, and
//! removing it (which cascades to the owner's calculations).

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use super::db::db_err;
use super::entity::user::{self, Entity as UserEntity};
use crate::domain::error::DomainError;

pub struct OrmUsersRepository {
    db: DatabaseConnection,
}

impl OrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an owner and return its id.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` when the username or email is already taken.
    pub async fn insert(&self, username: &str, email: &str) -> Result<Uuid, DomainError> {
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model.id)
    }

    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }

    /// Delete an owner. The database cascades the delete to its calculations.
    ///
    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            info!(user_id = %id, "owner deleted, calculations cascaded");
        }
        Ok(result.rows_affected > 0)
    }
}
