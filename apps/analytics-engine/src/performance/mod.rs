//! Streaming risk/performance metrics over daily P&L series.
//!
//! - **Engine**: one O(n) forward pass, O(1) extra state, no second scan
//! - **Derivations**: Sharpe, Sortino, drawdown, Calmar, recovery,
//!   expectancy, consistency — zero denominators resolve to 0, never
//!   NaN or infinity
//! - **Shared math**: the same win-rate/profit-factor/expectancy helpers
//!   back both this engine and the report aggregator

mod constants;
mod engine;
pub mod math;
mod types;

pub use constants::TRADING_DAYS;
pub use engine::PerformanceEngine;
pub use types::PerformanceMetrics;
