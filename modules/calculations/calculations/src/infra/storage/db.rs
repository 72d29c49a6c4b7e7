//! Database error conversion helpers.

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Convert a `SeaORM` error into a `DomainError`.
///
/// Unique and foreign key violations become `ConstraintViolation`,
/// everything else `Database`.
pub fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::ConstraintViolation(msg)
        }
        _ => DomainError::database(e.to_string()),
    }
}
