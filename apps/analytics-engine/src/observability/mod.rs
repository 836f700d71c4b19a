//! Metrics instrumentation for the analytics engine.

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_cache_hit, record_cache_invalidation,
    record_cache_miss, record_computation, record_ledger_fetch,
};
