//! Calculations module configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional
//! YAML file, then `CALCULATIONS__*` environment variables (`__` separates
//! nesting levels, e.g. `CALCULATIONS__DATABASE__URL`).

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CALCULATIONS__";

/// Configuration loading error.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Calculations module configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationsConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl CalculationsConfig {
    /// Layered configuration sources, lowest precedence first.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration from defaults, `path` (if any) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a source cannot be parsed or a
    /// value has the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(|e| Box::new(e).into())
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite::memory:` or `postgres://user@host/db`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long to wait for a pooled connection (`"30s"`, `"1m"`, ...).
    #[serde(with = "duration_str")]
    pub acquire_timeout: Duration,
    /// Close connections idle for longer than this. Unset keeps the pool
    /// default. Ignored for in-memory `SQLite`, see [`Self::pool_timeouts`].
    #[serde(with = "opt_duration_str")]
    pub idle_timeout: Option<Duration>,
    /// Recycle connections older than this. Same rules as `idle_timeout`.
    #[serde(with = "opt_duration_str")]
    pub max_lifetime: Option<Duration>,
    /// Apply pending schema migrations on startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            // A single connection keeps an in-memory SQLite database shared.
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: None,
            max_lifetime: None,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Whether `url` names an in-memory `SQLite` database.
    ///
    /// Covers `sqlite::memory:`, `sqlite://:memory:` and URI forms such as
    /// `sqlite:file:memdb1?mode=memory&cache=shared`.
    #[must_use]
    pub fn is_memory_sqlite(&self) -> bool {
        let url = self.url.trim();
        url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
    }

    /// `(idle_timeout, max_lifetime)` to apply to the pool.
    ///
    /// An in-memory database lives only as long as its connection, so
    /// neither timeout may retire it: both are `None` (disabled) there.
    #[must_use]
    pub fn pool_timeouts(&self) -> (Option<Duration>, Option<Duration>) {
        if self.is_memory_sqlite() {
            (None, None)
        } else {
            (self.idle_timeout, self.max_lifetime)
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level for every target.
    pub default: String,
    /// Per-target overrides, e.g. `sea_orm = "warn"`.
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: "info".to_owned(),
            modules: BTreeMap::new(),
        }
    }
}

mod duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(d)?;
        humantime::parse_duration(&raw).map_err(de::Error::custom)
    }
}

mod opt_duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.collect_str(&humantime::format_duration(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| humantime::parse_duration(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_use_in_memory_sqlite() {
        let cfg = CalculationsConfig::default();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.database.acquire_timeout, Duration::from_secs(30));
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.database.idle_timeout, None);
        assert_eq!(cfg.logging.default, "info");
    }

    #[test]
    fn test_memory_urls_never_retire_their_connection() {
        for url in [
            "sqlite::memory:",
            "sqlite://:memory:",
            "sqlite:file:memdb1?mode=memory&cache=shared",
        ] {
            let cfg = DatabaseConfig {
                url: url.to_owned(),
                idle_timeout: Some(Duration::from_secs(1)),
                max_lifetime: Some(Duration::from_secs(1)),
                ..DatabaseConfig::default()
            };
            assert!(cfg.is_memory_sqlite(), "{url}");
            assert_eq!(cfg.pool_timeouts(), (None, None), "{url}");
        }
    }

    #[test]
    fn test_file_and_server_urls_keep_configured_timeouts() {
        for url in ["sqlite://calculations.db?mode=rwc", "postgres://calc@localhost/calc"] {
            let cfg = DatabaseConfig {
                url: url.to_owned(),
                idle_timeout: Some(Duration::from_secs(600)),
                max_lifetime: None,
                ..DatabaseConfig::default()
            };
            assert!(!cfg.is_memory_sqlite(), "{url}");
            assert_eq!(
                cfg.pool_timeouts(),
                (Some(Duration::from_secs(600)), None),
                "{url}"
            );
        }
    }

    #[test]
    fn test_load_without_sources_returns_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = CalculationsConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.database.url, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "calculations.yaml",
                r#"
database:
  url: "postgres://calc@localhost/calc"
  max_connections: 8
  acquire_timeout: "5s"
  idle_timeout: "10m"
logging:
  default: "debug"
  modules:
    sea_orm: "warn"
"#,
            )?;
            jail.set_env("CALCULATIONS__DATABASE__MAX_CONNECTIONS", "16");

            let cfg = CalculationsConfig::load(Some(Path::new("calculations.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.database.url, "postgres://calc@localhost/calc");
            assert_eq!(cfg.database.max_connections, 16);
            assert_eq!(cfg.database.acquire_timeout, Duration::from_secs(5));
            assert_eq!(cfg.database.idle_timeout, Some(Duration::from_secs(600)));
            assert_eq!(cfg.database.max_lifetime, None);
            assert_eq!(cfg.logging.default, "debug");
            assert_eq!(cfg.logging.modules.get("sea_orm").unwrap(), "warn");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "database:\n  hostname: db\n")?;
            let result = CalculationsConfig::load(Some(Path::new("bad.yaml")));
            assert!(matches!(result, Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn test_bad_duration_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CALCULATIONS__DATABASE__ACQUIRE_TIMEOUT", "soon");
            assert!(CalculationsConfig::load(None).is_err());
            Ok(())
        });
    }
}
