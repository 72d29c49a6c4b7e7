#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support for calculations integration tests.
//!
//! Each call to [`module`] builds an isolated in-memory `SQLite` database
//! with migrations applied.

#![allow(dead_code)] // Not every test file uses every helper

use calculations::config::{CalculationsConfig, LoggingConfig};
use calculations::{CalculationsModule, logging};
use uuid::Uuid;

/// Module over a fresh in-memory database.
pub async fn module() -> CalculationsModule {
    logging::init(&LoggingConfig::default());
    CalculationsModule::init(&CalculationsConfig::default())
        .await
        .expect("module init")
}

/// Insert an owner with a unique username and email.
pub async fn seed_owner(module: &CalculationsModule) -> Uuid {
    let tag = Uuid::new_v4().simple().to_string();
    module
        .users()
        .insert(&format!("user_{tag}"), &format!("{tag}@example.com"))
        .await
        .expect("seed owner")
}
