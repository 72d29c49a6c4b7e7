#[cfg(feature = "db-sqlite")]
use std::str::FromStr;
use std::sync::Arc;

use calculations_sdk::CalculationsApi;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
#[cfg(feature = "db-sqlite")]
use sea_orm::SqlxSqliteConnector;
#[cfg(feature = "db-sqlite")]
use sea_orm::sqlx::ConnectOptions as _;
#[cfg(feature = "db-sqlite")]
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::{CalculationsConfig, DatabaseConfig};
use crate::domain::service::Service;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{OrmCalculationsRepository, OrmUsersRepository};
use crate::local_client::CalculationsLocalClient;

/// Composition root: owns the connection and wires repository, service and
/// client together.
pub struct CalculationsModule {
    db: DatabaseConnection,
    client: Arc<dyn CalculationsApi>,
}

impl CalculationsModule {
    /// Connect to the configured database, apply migrations when enabled and
    /// build the service.
    ///
    /// # Errors
    ///
    /// Fails when the database is unreachable or a migration fails.
    pub async fn init(cfg: &CalculationsConfig) -> anyhow::Result<Self> {
        info!("Initializing calculations module");
        let db_cfg = &cfg.database;
        debug!(
            "Database config: max_connections={}, min_connections={}, acquire_timeout={:?}",
            db_cfg.max_connections, db_cfg.min_connections, db_cfg.acquire_timeout
        );

        let db = connect(db_cfg).await?;

        if db_cfg.run_migrations {
            Migrator::up(&db, None)
                .await
                .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;
            debug!("Migrations applied");
        }

        let repo = Arc::new(OrmCalculationsRepository::new(db.clone()));
        let service = Arc::new(Service::new(repo));
        let client: Arc<dyn CalculationsApi> = Arc::new(CalculationsLocalClient::new(service));

        info!("Calculations module initialized");
        Ok(Self { db, client })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculationsApi> {
        self.client.clone()
    }

    /// Owner table access on the module's connection.
    #[must_use]
    pub fn users(&self) -> OrmUsersRepository {
        OrmUsersRepository::new(self.db.clone())
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Open the pool described by `cfg`.
///
/// `SQLite` pools are built through sqlx directly: `ConnectOptions` can only
/// set the idle timeout and max lifetime, not disable them, and an
/// in-memory database must never lose its only connection.
async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let (idle_timeout, max_lifetime) = cfg.pool_timeouts();

    #[cfg(feature = "db-sqlite")]
    if cfg.url.starts_with("sqlite:") {
        if cfg.is_memory_sqlite() {
            debug!("In-memory SQLite: idle timeout and max lifetime disabled");
        }
        let conn_opts = SqliteConnectOptions::from_str(&cfg.url)
            .map_err(|e| anyhow::anyhow!("invalid sqlite url: {e}"))?
            .disable_statement_logging();
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .acquire_timeout(cfg.acquire_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect_with(conn_opts)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to database: {e}"))?;
        return Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool));
    }

    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(false);
    if let Some(t) = idle_timeout {
        opts.idle_timeout(t);
    }
    if let Some(t) = max_lifetime {
        opts.max_lifetime(t);
    }

    Database::connect(opts)
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to database: {e}"))
}
