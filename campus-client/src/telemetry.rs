//! Tracing subscriber installation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "campus_client=info,campus_check=info,warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Build the filter: `RUST_LOG` wins, then the configured filter, then the
/// built-in default.
pub fn build_filter(configured: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = configured.unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).map_err(|e| TelemetryError::InvalidFilter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

/// Install a fmt subscriber. Calling it again once a global subscriber is
/// set does nothing.
pub fn init_tracing(configured: Option<&str>) -> Result<(), TelemetryError> {
    let filter = build_filter(configured)?;

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = ?configured, "Tracing initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_tracing(Some("debug")).is_ok());
        assert!(init_tracing(Some("debug")).is_ok());
    }

    #[test]
    fn test_rejects_malformed_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(build_filter(Some("campus_client=loudest")).is_err());
    }
}
