//! Log initialisation.
//!
//! `RUST_LOG` takes precedence over the configured levels:
//! ```bash
//! RUST_LOG=calculations=debug,sea_orm=warn
//! ```

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Install the global subscriber. Only the first call has any effect.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            EnvFilter::from_default_env()
        } else {
            build_filter(config)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_filter(filter);

        if tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("global subscriber already installed, keeping it");
        }
    });
}

/// Filter directives for `config`, e.g. `info,sea_orm=warn`.
#[must_use]
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = vec![config.default.clone()];
    directives.extend(
        config
            .modules
            .iter()
            .map(|(target, level)| format!("{target}={level}")),
    );
    directives.join(",")
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let directives = filter_directives(config);
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directives}': {e}; falling back to 'info'");
        EnvFilter::new("info")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_join_overrides() {
        let mut config = LoggingConfig::default();
        config.modules.insert("sea_orm".to_owned(), "warn".to_owned());
        config
            .modules
            .insert("calculations".to_owned(), "debug".to_owned());

        assert_eq!(
            filter_directives(&config),
            "info,calculations=debug,sea_orm=warn"
        );
    }
}
