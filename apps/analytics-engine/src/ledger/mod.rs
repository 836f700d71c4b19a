//! Ledger/store collaborator port.
//!
//! The ledger owns persistence of trades and daily summaries; this core
//! only reads from it. This is a driven (secondary/outbound) port: the
//! infrastructure layer of the surrounding service provides the real
//! implementation, and [`InMemoryLedger`] backs tests and local wiring.

mod memory;

use async_trait::async_trait;

pub use memory::InMemoryLedger;

use crate::models::{DailyPnLRecord, DateRange, SymbolAggregate};

/// Ledger fetch error.
///
/// All variants are transient from this core's perspective; retry policy
/// belongs to the collaborator or the caller, never here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LedgerError {
    /// Store unreachable or refusing connections.
    #[error("ledger unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Fetch exceeded the collaborator's deadline.
    #[error("ledger fetch timed out after {seconds}s")]
    Timeout {
        /// Seconds waited.
        seconds: u64,
    },

    /// Store returned rows this core cannot decode.
    #[error("ledger returned malformed data: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },
}

/// Port for reading daily summaries and symbol aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Daily records for the user within the inclusive range, ascending
    /// by date. An empty result is data, not an error.
    async fn fetch_daily_records(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<DailyPnLRecord>, LedgerError>;

    /// Lifetime per-symbol aggregates for the user.
    async fn fetch_symbol_aggregates(
        &self,
        user_id: &str,
    ) -> Result<Vec<SymbolAggregate>, LedgerError>;

    /// Pre-aggregated record for a period key (`2026-07-15`, `2026-07`,
    /// `2026`), when the ledger maintains one. `None` means the caller
    /// should fall back to a range fetch.
    async fn fetch_period_record(
        &self,
        user_id: &str,
        period_key: &str,
    ) -> Result<Option<DailyPnLRecord>, LedgerError>;
}
