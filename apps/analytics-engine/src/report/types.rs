//! Report records returned to the request layer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::DateRange;

/// Period a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportPeriod {
    /// One calendar month.
    Monthly {
        /// Calendar year.
        year: i32,
        /// Month, 1-12.
        month: u32,
    },
    /// One calendar year.
    Yearly {
        /// Calendar year.
        year: i32,
    },
    /// An explicit inclusive date range.
    Custom {
        /// The range.
        range: DateRange,
    },
}

/// Headline figures of a period report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Trades closed in the period.
    pub total_trades: u32,
    /// Winning trades.
    pub winning_trades: u32,
    /// Losing trades.
    pub losing_trades: u32,
    /// Break-even trades.
    pub break_even_trades: u32,
    /// Gross P&L before charges.
    pub gross_pnl: Decimal,
    /// Net P&L after charges.
    pub net_pnl: Decimal,
    /// Total charges paid.
    pub total_charges: Decimal,
    /// Win rate over decided trades, percent.
    pub win_rate: Decimal,
    /// Gross wins over gross losses; 0 with no losses.
    pub profit_factor: Decimal,
    /// Average winning trade.
    pub average_win: Decimal,
    /// Average losing trade (positive magnitude).
    pub average_loss: Decimal,
    /// Expected P&L per trade.
    pub expectancy: Decimal,
    /// Largest single-trade win in the period.
    pub largest_win: Decimal,
    /// Largest single-trade loss in the period (positive magnitude).
    pub largest_loss: Decimal,
}

/// One slice of a categorical P&L breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    /// Category label.
    pub label: String,
    /// Net P&L attributed to the category.
    pub value: Decimal,
    /// Trade count in the category.
    pub count: u32,
}

/// Per-symbol performance line in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPerformance {
    /// Instrument symbol.
    pub symbol: String,
    /// Net P&L over the period.
    pub net_pnl: Decimal,
    /// Trades over the period.
    pub trade_count: u32,
}

/// One row of the optional daily breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRow {
    /// Trading date.
    pub date: NaiveDate,
    /// Trades closed on the day.
    pub total_trades: u32,
    /// Gross P&L.
    pub gross_pnl: Decimal,
    /// Net P&L.
    pub net_pnl: Decimal,
    /// Charges paid.
    pub charges: Decimal,
}

/// A complete period report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingReport {
    /// Report identifier.
    pub id: Uuid,
    /// Requested period.
    pub period: ReportPeriod,
    /// Resolved inclusive date range.
    pub range: DateRange,
    /// Headline summary.
    pub summary: ReportSummary,
    /// Breakdown by market segment.
    pub by_segment: Vec<BreakdownSlice>,
    /// Breakdown by trade type.
    pub by_trade_type: Vec<BreakdownSlice>,
    /// Breakdown by position direction.
    pub by_position: Vec<BreakdownSlice>,
    /// Best five symbols by net P&L.
    pub top_symbols: Vec<SymbolPerformance>,
    /// Worst five symbols by net P&L.
    pub worst_symbols: Vec<SymbolPerformance>,
    /// Per-day rows, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<DailyRow>>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Signed differences between two independently computed periods.
///
/// Deltas are `second − first`; the periods need not be adjacent or of
/// equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Earlier / baseline period.
    pub first: ReportPeriod,
    /// Later / compared period.
    pub second: ReportPeriod,
    /// Net P&L difference.
    pub net_pnl_delta: Decimal,
    /// Win-rate difference, percentage points.
    pub win_rate_delta: Decimal,
    /// Trade-count difference.
    pub trade_count_delta: i64,
}
