//! Deterministic cache key construction.
//!
//! Keys are canonical strings embedding every parameter that affects the
//! result, under a per-user scope prefix so one prefix sweep invalidates a
//! user's entire result set.

use crate::models::{BreakdownDimension, DateRange};

/// Scope prefix covering every cached result for a user.
#[must_use]
pub fn user_scope(user_id: &str) -> String {
    format!("analytics:{user_id}:")
}

/// Key for the composed dashboard summary.
#[must_use]
pub fn dashboard(user_id: &str) -> String {
    format!("analytics:{user_id}:dashboard")
}

/// Key for performance metrics over a resolved range.
#[must_use]
pub fn metrics(user_id: &str, range: DateRange) -> String {
    format!("analytics:{user_id}:metrics:{range}")
}

/// Key for a P&L breakdown query.
#[must_use]
pub fn breakdown(user_id: &str, dimension: BreakdownDimension, range: DateRange) -> String {
    format!(
        "analytics:{user_id}:breakdown:{}:{range}",
        dimension.as_str()
    )
}

/// Key for a generated report.
#[must_use]
pub fn report(user_id: &str, period_key: &str, include_daily: bool) -> String {
    format!("analytics:{user_id}:report:{period_key}:daily={include_daily}")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_keys_are_user_scoped() {
        let scope = user_scope("u-42");
        for key in [
            dashboard("u-42"),
            metrics("u-42", range()),
            breakdown("u-42", BreakdownDimension::Segment, range()),
            report("u-42", "2026-07", true),
        ] {
            assert!(key.starts_with(&scope), "{key} lacks scope prefix");
        }
    }

    #[test]
    fn test_keys_are_stable() {
        assert_eq!(
            metrics("u-1", range()),
            "analytics:u-1:metrics:2026-07-01..2026-07-31"
        );
        assert_eq!(
            breakdown("u-1", BreakdownDimension::DayOfWeek, range()),
            "analytics:u-1:breakdown:day_of_week:2026-07-01..2026-07-31"
        );
        assert_eq!(
            report("u-1", "2026", false),
            "analytics:u-1:report:2026:daily=false"
        );
    }

    #[test]
    fn test_parameter_changes_change_the_key() {
        let a = breakdown("u-1", BreakdownDimension::Segment, range());
        let b = breakdown("u-1", BreakdownDimension::Position, range());
        assert_ne!(a, b);
    }
}
