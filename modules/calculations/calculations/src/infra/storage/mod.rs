//! Infrastructure storage layer - database persistence.
//!
//! All `SeaORM`-specific code lives here:
//! - `entity` - `SeaORM` entity definitions (users, calculations)
//! - `mapper` - conversions between `SeaORM` models and SDK types
//! - `migrations` - database schema migrations

pub mod entity;
pub mod mapper;
pub mod migrations;

mod calculations_sea_repo;
mod db;
mod users_sea_repo;


pub use calculations_sea_repo::OrmCalculationsRepository;
pub use db::db_err;
pub use users_sea_repo::OrmUsersRepository;
