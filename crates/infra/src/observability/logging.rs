//! `tracing-subscriber` installation driven by [`LoggingConfig`]

use backoffice_domain::{BackofficeError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.filter` when set. Calling this twice is
/// harmless; the second call is ignored with a debug event.
pub fn init_tracing(config: &LoggingConfig) {
    if let Err(err) = try_init_tracing(config) {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

/// Like [`init_tracing`] but reports why installation failed.
///
/// # Errors
/// Returns `BackofficeError::Config` for an invalid filter directive or
/// when a global subscriber is already set.
pub fn try_init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            BackofficeError::Config(format!("Invalid log filter {:?}: {e}", config.filter))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| BackofficeError::Config(format!("Failed to install subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported_not_panicking() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
        assert!(try_init_tracing(&config).is_err());
    }

    #[test]
    fn invalid_filter_is_a_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { filter: "backoffice=bogus".into(), json: false };
        assert!(matches!(try_init_tracing(&config), Err(BackofficeError::Config(_))));
    }
}
