//! Prometheus metrics for the analytics engine.
//!
//! Provides counters and histograms for cache behavior, ledger fetches and
//! computation latency.
//!
//! # Example
//!
//! ```ignore
//! use analytics_engine::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("Failed to initialize metrics");
//!
//! // Record a cache hit for the dashboard query
//! record_cache_hit("dashboard");
//! ```

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            // Latency buckets from 100us to 1s
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ],
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 9090))
}

impl MetricsConfig {
    /// Create a new metrics configuration with a custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the exporter fails to start (e.g. port in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Cache Metrics
// ============================================================================

/// Record a result-cache hit.
///
/// # Arguments
///
/// * `query` - Query family (e.g. "dashboard", "metrics", "report")
pub fn record_cache_hit(query: &str) {
    counter!("analytics_cache_hits_total", "query" => query.to_string()).increment(1);
}

/// Record a result-cache miss.
pub fn record_cache_miss(query: &str) {
    counter!("analytics_cache_misses_total", "query" => query.to_string()).increment(1);
}

/// Record a per-user cache invalidation sweep.
pub fn record_cache_invalidation() {
    counter!("analytics_cache_invalidations_total").increment(1);
}

// ============================================================================
// Ledger and Computation Metrics
// ============================================================================

/// Record a ledger fetch.
///
/// # Arguments
///
/// * `operation` - Fetch kind (e.g. "daily_records", "symbol_aggregates")
/// * `status` - "ok" or "error"
/// * `latency_seconds` - Wall time of the fetch
pub fn record_ledger_fetch(operation: &str, status: &str, latency_seconds: f64) {
    counter!(
        "analytics_ledger_fetches_total",
        "operation" => operation.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "analytics_ledger_fetch_seconds",
        "operation" => operation.to_string(),
    )
    .record(latency_seconds);
}

/// Record an analytics computation.
///
/// # Arguments
///
/// * `operation` - Computation kind (e.g. "performance_metrics", "report")
/// * `latency_seconds` - Wall time of the in-memory computation
pub fn record_computation(operation: &str, latency_seconds: f64) {
    histogram!(
        "analytics_computation_seconds",
        "operation" => operation.to_string(),
    )
    .record(latency_seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9191".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr, addr);
    }

    #[test]
    fn test_recorders_are_safe_without_exporter() {
        // With no recorder installed these are no-ops; they must not panic.
        record_cache_hit("dashboard");
        record_cache_miss("dashboard");
        record_cache_invalidation();
        record_ledger_fetch("daily_records", "ok", 0.004);
        record_computation("performance_metrics", 0.001);
    }
}
