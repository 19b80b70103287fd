//! Logging configuration for the console.
//!
//! The server logs to stderr; verbosity is controlled through the standard
//! RUST_LOG environment filter.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// Defaults to `info` when RUST_LOG is not set. Every submitted SQL text is
/// logged at info level by the executor before it runs.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
