//! Dashboard summary records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::charges::round_money;
use crate::models::{DailyPnLRecord, SymbolAggregate};
use crate::performance::{PerformanceMetrics, math};

/// Aggregate figures for one dashboard window (today, month, lifetime).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    /// Net P&L in the window.
    pub net_pnl: Decimal,
    /// Gross P&L in the window.
    pub gross_pnl: Decimal,
    /// Charges paid in the window.
    pub charges: Decimal,
    /// Trades closed in the window.
    pub total_trades: u32,
    /// Win rate over decided trades, percent.
    pub win_rate: Decimal,
}

impl PeriodSnapshot {
    /// Fold daily records into a snapshot; empty input is the zero
    /// snapshot.
    #[must_use]
    pub fn from_records(records: &[DailyPnLRecord]) -> Self {
        let mut snapshot = Self::default();
        let mut winning = 0u32;
        let mut losing = 0u32;

        for record in records {
            snapshot.net_pnl += record.net_pnl;
            snapshot.gross_pnl += record.gross_pnl;
            snapshot.charges += record.charges;
            snapshot.total_trades += record.total_trades;
            winning += record.winning_trades;
            losing += record.losing_trades;
        }

        snapshot.win_rate = round_money(math::win_rate_pct(winning, losing));
        snapshot
    }
}

/// The composed dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Today's figures.
    pub today: PeriodSnapshot,
    /// Current calendar month's figures.
    pub this_month: PeriodSnapshot,
    /// Lifetime figures.
    pub all_time: PeriodSnapshot,
    /// Performance metrics over the recent window.
    pub recent_performance: PerformanceMetrics,
    /// Best symbols by lifetime net P&L, at most five.
    pub top_symbols: Vec<SymbolAggregate>,
    /// Worst symbols by lifetime net P&L, at most five.
    pub worst_symbols: Vec<SymbolAggregate>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_snapshot_from_empty_records() {
        assert_eq!(PeriodSnapshot::from_records(&[]), PeriodSnapshot::default());
    }

    #[test]
    fn test_snapshot_folds_records() {
        let mut day = DailyPnLRecord::empty(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        day.net_pnl = dec!(300);
        day.gross_pnl = dec!(330);
        day.charges = dec!(30);
        day.total_trades = 4;
        day.winning_trades = 3;
        day.losing_trades = 1;

        let snapshot = PeriodSnapshot::from_records(&[day.clone(), day]);

        assert_eq!(snapshot.net_pnl, dec!(600));
        assert_eq!(snapshot.total_trades, 8);
        assert_eq!(snapshot.win_rate, dec!(75.00));
    }
}
