//! Canonical calendar resolution for named report periods.
//!
//! Monthly and yearly periods resolve to their calendar boundaries and
//! then flow through the same `[start, end]` path as custom ranges; there
//! is no parallel named-period implementation. Record dates are already
//! exchange-local calendar days, so resolution is pure date arithmetic —
//! the configured reporting offset only enters when the *current* date is
//! anchored (see the service layer).

use chrono::NaiveDate;

use super::types::ReportPeriod;
use crate::error::AnalyticsError;
use crate::models::DateRange;

impl ReportPeriod {
    /// Resolve to the inclusive date range the period covers.
    ///
    /// Rejects out-of-range months with `InvalidInput`.
    pub fn resolve(&self) -> Result<DateRange, AnalyticsError> {
        match *self {
            Self::Monthly { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    AnalyticsError::invalid_input(
                        "month",
                        format!("{year}-{month:02} is not a calendar month"),
                    )
                })?;
                let end = last_day_of_month(year, month);
                DateRange::new(start, end)
            }
            Self::Yearly { year } => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
                    AnalyticsError::invalid_input("year", format!("{year} is not a calendar year"))
                })?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)
                    .unwrap_or(start);
                DateRange::new(start, end)
            }
            Self::Custom { range } => Ok(range),
        }
    }

    /// Stable key for cache entries and the ledger's pre-aggregated
    /// period fast path: `2026-07`, `2026`, or `2026-07-01..2026-07-31`.
    #[must_use]
    pub fn key(&self) -> String {
        match *self {
            Self::Monthly { year, month } => format!("{year:04}-{month:02}"),
            Self::Yearly { year } => format!("{year:04}"),
            Self::Custom { range } => range.to_string(),
        }
    }
}

/// Last calendar day of a month (the day before the next month's first).
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
