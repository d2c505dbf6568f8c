//! Logging System
//!
//! Structured logging via `tracing`. Diagnostics go to stderr so the report
//! text on stdout stays clean and pipeable.

use crate::error::ReportError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the global subscriber.
///
/// Level precedence: explicit `level`, then `verbose` (debug), then the
/// `RUST_LOG` environment, then `info`.
pub fn init_logging(level: Option<&str>, verbose: bool) -> Result<(), ReportError> {
    let directive = match (level, verbose) {
        (Some(level), _) => level.to_string(),
        (None, true) => "debug".to_string(),
        (None, false) => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
    };
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        ReportError::ConfigError(format!("invalid log level {:?}: {}", directive, e))
    })?;
    Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| ReportError::ConfigError(format!("failed to initialize logging: {}", e)))
}
