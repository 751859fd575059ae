//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::CoreError;

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`CoreError::Telemetry`] if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), CoreError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|source| CoreError::Telemetry(source.to_string()))?;

    tracing::info!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default();
        // Only one global subscriber per process.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(CoreError::Telemetry(_))));
    }
}
