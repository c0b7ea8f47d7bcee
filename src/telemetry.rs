//! Logging configuration
//!
//! Simple tracing-based logging for test runs. No OTEL - this is a
//! test assistant, not a production service.
//!
//! # Example
//!
//! ```no_run
//! use valmis::telemetry::init_logging;
//!
//! init_logging();
//! // Poll attempts and lifecycle transitions now log to stderr
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize logging with tracing-subscriber
///
/// Uses RUST_LOG env var for filtering (default: info).
/// Call once at the start of your test or application.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
