//! Tracing subscriber setup.
//!
//! # Configuration
//!
//! - `RUST_LOG`: overrides the configured level filter when set
//! - `logging.level` / `logging.format`: from [`crate::config::LoggingConfig`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use analytics_engine::config::LoggingConfig;
//! use analytics_engine::telemetry::init_tracing;
//!
//! fn main() {
//!     init_tracing(&LoggingConfig::default());
//!     // ... application code
//! }
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// Idempotent: a second call (tests, embedded use) is a no-op instead of a
/// panic.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    if let Err(e) = result {
        tracing::debug!("tracing subscriber already initialized: {e}");
    }
}
