//! CSV export of daily P&L history.

use std::fmt::Write;

use crate::models::DailyPnLRecord;
use crate::performance::math;

/// Fixed export header; downstream spreadsheet imports key on it.
pub const CSV_HEADER: &str =
    "Date,Total Trades,Winning Trades,Losing Trades,Gross P&L,Net P&L,Charges,Win Rate,Profit Factor";

/// Render records as CSV, one row per day ascending.
///
/// Win rate is a percentage and profit factor a plain ratio, both derived
/// through the shared stat helpers; money renders with 2 decimals. An
/// empty slice yields just the header.
#[must_use]
pub fn export_csv(records: &[DailyPnLRecord]) -> String {
    let mut ordered: Vec<&DailyPnLRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut out = String::with_capacity(CSV_HEADER.len() + ordered.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in ordered {
        let win_rate = math::win_rate_pct(record.winning_trades, record.losing_trades);
        let profit_factor = math::profit_factor(record.total_wins(), record.total_losses());

        let _ = writeln!(
            out,
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            record.date,
            record.total_trades,
            record.winning_trades,
            record.losing_trades,
            record.gross_pnl,
            record.net_pnl,
            record.charges,
            win_rate,
            profit_factor,
        );
    }

    out
}
