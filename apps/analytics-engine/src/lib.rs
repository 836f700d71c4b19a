// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Analytics Engine - Rust Core Library
//!
//! Deterministic P&L and performance-analytics core of the trading
//! journal. The surrounding request layer (HTTP routing, auth, broker
//! sync) and the persistence layer live elsewhere; this crate computes.
//!
//! # Architecture
//!
//! - **`charges`**: tax-aware round-trip charge and P&L calculation over
//!   data-driven broker schedules
//! - **`performance`**: single-pass streaming risk/performance metrics
//!   over time-ordered daily P&L summaries
//! - **`report`**: period reports, categorical breakdowns, period
//!   comparison and CSV export
//! - **`cache`**: TTL-keyed result memoization behind a backing-agnostic
//!   capability trait
//! - **`ledger`**: the read-only port to the journal's store collaborator
//! - **`service`**: the injected-dependency facade the request layer calls
//!
//! Everything monetary is `rust_decimal`; rounding to 2 decimals happens
//! once, at output boundaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Result cache capability and in-memory backing.
pub mod cache;

/// Charge schedules and P&L calculation.
pub mod charges;

/// Configuration loading and validation.
pub mod config;

/// Structured error types.
pub mod error;

/// Ledger collaborator port.
pub mod ledger;

/// Interchange records and closed enums.
pub mod models;

/// Prometheus metrics instrumentation.
pub mod observability;

/// Streaming performance metrics.
pub mod performance;

/// Period reports and exports.
pub mod report;

/// The analytics service facade.
pub mod service;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::{InMemoryResultCache, ResultCache};
pub use charges::{ChargesBreakdown, ChargesCalculator, ChargesSchedules, PnLResult};
pub use config::{AnalyticsConfig, load_config};
pub use error::{AnalyticsError, ErrorCode};
pub use ledger::{InMemoryLedger, LedgerError, LedgerPort};
pub use models::{
    BreakdownDimension, Broker, ClosedTrade, DailyPnLRecord, DateRange, Exchange, Position,
    Segment, SymbolAggregate, TradeLeg, TradeType,
};
pub use performance::{PerformanceEngine, PerformanceMetrics};
pub use report::{PeriodComparison, ReportAggregator, ReportPeriod, TradingReport};
pub use service::{AnalyticsService, DashboardSummary, PeriodSnapshot};
