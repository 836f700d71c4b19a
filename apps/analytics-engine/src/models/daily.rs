//! Daily P&L summary records produced by the upstream ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Position, Segment, SessionBucket, TradeType};

/// Partial sums for one category value within a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySums {
    /// Net P&L attributed to the category.
    pub net_pnl: Decimal,
    /// Number of trades in the category.
    pub trades: u32,
}

impl CategorySums {
    /// Fold another partial sum into this one.
    pub fn merge(&mut self, other: Self) {
        self.net_pnl += other.net_pnl;
        self.trades += other.trades;
    }
}

/// One trading day's aggregated P&L for a user.
///
/// Written once per trading day by the ledger when it folds closed trades;
/// read-only to the analytics core. Dates are exchange-local calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnLRecord {
    /// Trading date (exchange-local).
    pub date: NaiveDate,
    /// Trades closed on the day.
    pub total_trades: u32,
    /// Trades with positive net P&L.
    pub winning_trades: u32,
    /// Trades with negative net P&L.
    pub losing_trades: u32,
    /// Trades with exactly zero net P&L.
    pub break_even_trades: u32,
    /// Price-based P&L before charges.
    pub gross_pnl: Decimal,
    /// P&L after all charges.
    pub net_pnl: Decimal,
    /// Total charges paid on the day.
    pub charges: Decimal,
    /// Mean net P&L of winning trades (positive).
    pub average_win: Decimal,
    /// Mean net loss of losing trades (positive magnitude).
    pub average_loss: Decimal,
    /// Largest single-trade win.
    pub largest_win: Decimal,
    /// Largest single-trade loss (positive magnitude).
    pub largest_loss: Decimal,
    /// Partial sums per market segment.
    #[serde(default)]
    pub by_segment: BTreeMap<Segment, CategorySums>,
    /// Partial sums per trade type.
    #[serde(default)]
    pub by_trade_type: BTreeMap<TradeType, CategorySums>,
    /// Partial sums per position direction.
    #[serde(default)]
    pub by_position: BTreeMap<Position, CategorySums>,
    /// Partial sums per intraday session bucket.
    #[serde(default)]
    pub by_session: BTreeMap<SessionBucket, CategorySums>,
    /// Partial sums per instrument symbol.
    #[serde(default)]
    pub by_symbol: BTreeMap<String, CategorySums>,
}

impl DailyPnLRecord {
    /// An empty record for the given date.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            break_even_trades: 0,
            gross_pnl: Decimal::ZERO,
            net_pnl: Decimal::ZERO,
            charges: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            by_segment: BTreeMap::new(),
            by_trade_type: BTreeMap::new(),
            by_position: BTreeMap::new(),
            by_session: BTreeMap::new(),
            by_symbol: BTreeMap::new(),
        }
    }

    /// Whether the day closed with a positive net P&L.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.net_pnl > Decimal::ZERO
    }

    /// Sum of wins on the day, weighted by the per-day average.
    #[must_use]
    pub fn total_wins(&self) -> Decimal {
        self.average_win * Decimal::from(self.winning_trades)
    }

    /// Sum of losses on the day (positive magnitude), weighted by the
    /// per-day average.
    #[must_use]
    pub fn total_losses(&self) -> Decimal {
        self.average_loss * Decimal::from(self.losing_trades)
    }
}

/// Lifetime per-symbol aggregate maintained by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAggregate {
    /// Instrument symbol.
    pub symbol: String,
    /// Lifetime net P&L.
    pub net_pnl: Decimal,
    /// Lifetime trade count.
    pub trade_count: u32,
    /// Lifetime win rate, percent.
    pub win_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_all_zero() {
        let record = DailyPnLRecord::empty(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(record.total_trades, 0);
        assert_eq!(record.net_pnl, Decimal::ZERO);
        assert!(!record.is_profitable());
        assert!(record.by_segment.is_empty());
    }

    #[test]
    fn test_trade_weighted_totals() {
        let mut record = DailyPnLRecord::empty(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        record.winning_trades = 3;
        record.average_win = Decimal::new(150, 0);
        record.losing_trades = 2;
        record.average_loss = Decimal::new(80, 0);

        assert_eq!(record.total_wins(), Decimal::new(450, 0));
        assert_eq!(record.total_losses(), Decimal::new(160, 0));
    }

    #[test]
    fn test_category_sums_merge() {
        let mut sums = CategorySums {
            net_pnl: Decimal::new(100, 0),
            trades: 2,
        };
        sums.merge(CategorySums {
            net_pnl: Decimal::new(-40, 0),
            trades: 1,
        });

        assert_eq!(sums.net_pnl, Decimal::new(60, 0));
        assert_eq!(sums.trades, 3);
    }

    #[test]
    fn test_partial_sum_maps_default_when_missing() {
        let json = r#"{
            "date": "2026-07-01",
            "total_trades": 1,
            "winning_trades": 1,
            "losing_trades": 0,
            "break_even_trades": 0,
            "gross_pnl": "120.00",
            "net_pnl": "100.00",
            "charges": "20.00",
            "average_win": "100.00",
            "average_loss": "0",
            "largest_win": "100.00",
            "largest_loss": "0"
        }"#;

        let record: DailyPnLRecord = serde_json::from_str(json).unwrap();
        assert!(record.by_segment.is_empty());
        assert!(record.by_symbol.is_empty());
    }
}
