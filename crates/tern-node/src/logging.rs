//! Tracing subscriber setup shared by Tern binaries.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG`, when set, takes precedence over `level_str`. Pass
/// `format = "json"` for structured JSON output; any other value gives
/// human-readable text.
///
/// Installs the global subscriber, so call it once per process.
pub fn init_logging(level_str: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
