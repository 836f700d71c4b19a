//! Analytics Service Integration Tests
//!
//! End-to-end tests that run realistic daily-record payloads from the
//! ledger through the full service surface: dashboard composition, metrics
//! windows, reports, comparisons, CSV export and cache invalidation.
//!
//! Fixtures model a July 2026 trading month whose cumulative P&L walks
//! 100, 50, 250, -50, 0 — a 300-point peak-to-trough decline — plus a
//! quiet June for period comparison.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use analytics_engine::models::BreakdownDimension;
use analytics_engine::report::ReportPeriod;
use analytics_engine::{
    AnalyticsConfig, AnalyticsService, DailyPnLRecord, DateRange, InMemoryLedger,
    InMemoryResultCache, SymbolAggregate,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

/// Load a JSON fixture from the fixtures directory.
fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", path.display()))
}

/// Create a service over fixture data, plus handles to its collaborators.
fn make_service() -> (
    AnalyticsService<InMemoryLedger>,
    Arc<InMemoryLedger>,
    Arc<InMemoryResultCache>,
) {
    let ledger = Arc::new(InMemoryLedger::new());

    let july: Vec<DailyPnLRecord> = load_fixture("july_daily_records.json");
    let june: Vec<DailyPnLRecord> = load_fixture("june_daily_records.json");
    for record in june.into_iter().chain(july) {
        ledger.insert_daily("u-1", record);
    }

    let symbols: Vec<SymbolAggregate> = load_fixture("symbol_aggregates.json");
    ledger.set_symbol_aggregates("u-1", symbols);

    let cache = Arc::new(InMemoryResultCache::new());
    let service = AnalyticsService::new(
        Arc::clone(&ledger),
        Arc::clone(&cache) as Arc<dyn analytics_engine::ResultCache>,
        AnalyticsConfig::default(),
    );
    (service, ledger, cache)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn july() -> ReportPeriod {
    ReportPeriod::Monthly {
        year: 2026,
        month: 7,
    }
}

fn june() -> ReportPeriod {
    ReportPeriod::Monthly {
        year: 2026,
        month: 6,
    }
}

#[tokio::test]
async fn test_monthly_report_summary_and_rankings() {
    let (service, _, _) = make_service();

    let report = service.generate_report("u-1", july(), true).await.unwrap();

    assert_eq!(report.range.start(), date(2026, 7, 1));
    assert_eq!(report.range.end(), date(2026, 7, 31));

    assert_eq!(report.summary.total_trades, 8);
    assert_eq!(report.summary.winning_trades, 4);
    assert_eq!(report.summary.losing_trades, 4);
    assert_eq!(report.summary.net_pnl, dec!(0.00));
    assert_eq!(report.summary.gross_pnl, dec!(65.00));
    assert_eq!(report.summary.total_charges, dec!(65.00));
    assert_eq!(report.summary.win_rate, dec!(50.00));
    // Wins and losses both total 430.
    assert_eq!(report.summary.profit_factor, dec!(1.00));
    assert_eq!(report.summary.average_win, dec!(107.50));
    assert_eq!(report.summary.average_loss, dec!(107.50));
    assert_eq!(report.summary.expectancy, dec!(0.00));
    assert_eq!(report.summary.largest_win, dec!(180.00));
    assert_eq!(report.summary.largest_loss, dec!(200.00));

    // Period symbol rankings come from the month's per-symbol sums.
    let top: Vec<&str> = report
        .top_symbols
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(top, ["RELIANCE", "INFY", "BANKNIFTY", "TCS"]);
    assert_eq!(report.top_symbols[0].net_pnl, dec!(300.00));
    assert_eq!(report.top_symbols[0].trade_count, 2);

    let worst: Vec<&str> = report
        .worst_symbols
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(worst, ["TCS", "BANKNIFTY", "INFY", "RELIANCE"]);

    // Daily rows ascend.
    let daily = report.daily.as_ref().unwrap();
    assert_eq!(daily.len(), 5);
    assert_eq!(daily[0].date, date(2026, 7, 1));
    assert_eq!(daily[4].date, date(2026, 7, 7));
}

#[tokio::test]
async fn test_performance_metrics_drawdown_window() {
    let (service, _, _) = make_service();

    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();
    let metrics = service
        .performance_metrics("u-1", Some(range))
        .await
        .unwrap();

    // Cumulative walk peaks at 250 and troughs at -50 on July 6.
    assert_eq!(metrics.max_drawdown, dec!(300.00));
    assert_eq!(metrics.max_drawdown_date, Some(date(2026, 7, 6)));
    assert_eq!(metrics.total_pnl, dec!(0.00));
    assert_eq!(metrics.trading_days, 5);
    assert_eq!(metrics.win_rate, dec!(50));
    // 3 of 5 days profitable.
    assert_eq!(metrics.consistency, dec!(60));
    // Zero total P&L over a real drawdown: recovery resolves to zero.
    assert_eq!(metrics.recovery_factor, dec!(0));
    assert_eq!(metrics.average_rrr, dec!(1));
}

#[tokio::test]
async fn test_widening_the_window_keeps_the_drawdown() {
    let (service, _, _) = make_service();

    let narrow = DateRange::new(date(2026, 7, 1), date(2026, 7, 3)).unwrap();
    let wide = DateRange::new(date(2026, 6, 1), date(2026, 7, 31)).unwrap();

    let narrow_metrics = service
        .performance_metrics("u-1", Some(narrow))
        .await
        .unwrap();
    let wide_metrics = service
        .performance_metrics("u-1", Some(wide))
        .await
        .unwrap();

    assert!(wide_metrics.max_drawdown >= narrow_metrics.max_drawdown);
    assert_eq!(wide_metrics.trading_days, 6);
}

#[tokio::test]
async fn test_period_comparison_deltas() {
    let (service, _, _) = make_service();

    let comparison = service
        .compare_periods("u-1", june(), july())
        .await
        .unwrap();

    // July netted 0 against June's 150; both months hit 50% win rate.
    assert_eq!(comparison.net_pnl_delta, dec!(-150.00));
    assert_eq!(comparison.win_rate_delta, dec!(0.00));
    assert_eq!(comparison.trade_count_delta, 4);
}

#[tokio::test]
async fn test_breakdowns_over_fixture_month() {
    let (service, _, _) = make_service();
    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();

    let by_segment = service
        .pnl_breakdown("u-1", BreakdownDimension::Segment, Some(range))
        .await
        .unwrap();
    let equity = by_segment.iter().find(|s| s.label == "equity").unwrap();
    let options = by_segment.iter().find(|s| s.label == "options").unwrap();
    assert_eq!(equity.value, dec!(0.00));
    assert_eq!(equity.count, 5);
    assert_eq!(options.value, dec!(0.00));
    assert_eq!(options.count, 3);

    let by_day = service
        .pnl_breakdown("u-1", BreakdownDimension::DayOfWeek, Some(range))
        .await
        .unwrap();
    // July 6 2026 is the only Monday in the window.
    assert_eq!(by_day[0].label, "monday");
    assert_eq!(by_day[0].value, dec!(-300.00));
    // Nothing traded on weekends.
    assert_eq!(by_day[5].count, 0);
    assert_eq!(by_day[6].count, 0);

    let by_session = service
        .pnl_breakdown("u-1", BreakdownDimension::TimeOfDay, Some(range))
        .await
        .unwrap();
    let opening = by_session.iter().find(|s| s.label == "opening").unwrap();
    assert_eq!(opening.value, dec!(-120.00));
    assert_eq!(opening.count, 3);
}

#[tokio::test]
async fn test_csv_export_golden() {
    let (service, _, _) = make_service();
    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();

    let csv = service.export_csv("u-1", range).await.unwrap();
    let expected = "\
Date,Total Trades,Winning Trades,Losing Trades,Gross P&L,Net P&L,Charges,Win Rate,Profit Factor
2026-07-01,2,1,1,120.00,100.00,20.00,50.00,2.25
2026-07-02,1,0,1,-40.00,-50.00,10.00,0.00,0.00
2026-07-03,2,2,0,215.00,200.00,15.00,100.00,0.00
2026-07-06,2,0,2,-290.00,-300.00,10.00,0.00,0.00
2026-07-07,1,1,0,60.00,50.00,10.00,100.00,0.00
";
    assert_eq!(csv, expected);
}

#[tokio::test]
async fn test_dashboard_composition() {
    let (service, _, _) = make_service();

    let summary = service.dashboard_summary("u-1").await.unwrap();

    // Lifetime figures cover June and July fixtures.
    assert_eq!(summary.all_time.net_pnl, dec!(150.00));
    assert_eq!(summary.all_time.total_trades, 12);
    assert_eq!(summary.all_time.win_rate, dec!(50.00));

    // Lifetime symbol rankings come from the ledger's aggregates.
    let top: Vec<&str> = summary
        .top_symbols
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(top, ["RELIANCE", "SBIN", "INFY", "HDFCBANK", "TCS"]);

    let worst: Vec<&str> = summary
        .worst_symbols
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(worst, ["BANKNIFTY", "TCS", "HDFCBANK", "INFY", "SBIN"]);
}

#[tokio::test]
async fn test_invalidation_after_mutation() {
    let (service, ledger, cache) = make_service();
    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();

    let before = service
        .performance_metrics("u-1", Some(range))
        .await
        .unwrap();
    let _ = service.generate_report("u-1", july(), false).await.unwrap();
    assert!(cache.len() >= 2);

    // A synced trade lands: one more winning day in July.
    let mut new_day = DailyPnLRecord::empty(date(2026, 7, 8));
    new_day.total_trades = 1;
    new_day.winning_trades = 1;
    new_day.net_pnl = dec!(500.00);
    new_day.gross_pnl = dec!(510.00);
    new_day.charges = dec!(10.00);
    new_day.average_win = dec!(500.00);
    new_day.largest_win = dec!(500.00);
    ledger.insert_daily("u-1", new_day);

    // Without invalidation the stale figure is still served.
    let stale = service
        .performance_metrics("u-1", Some(range))
        .await
        .unwrap();
    assert_eq!(stale.total_pnl, before.total_pnl);

    service.invalidate_user("u-1");

    // Every key scoped to the user now misses and recomputes.
    let fresh = service
        .performance_metrics("u-1", Some(range))
        .await
        .unwrap();
    assert_eq!(fresh.total_pnl, dec!(500.00));
    assert_eq!(fresh.trading_days, 6);

    let report = service.generate_report("u-1", july(), false).await.unwrap();
    assert_eq!(report.summary.net_pnl, dec!(500.00));
}

#[tokio::test]
async fn test_invalidation_is_scoped_per_user() {
    let (service, ledger, cache) = make_service();

    ledger.insert_daily("u-2", DailyPnLRecord::empty(date(2026, 7, 1)));
    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();

    let _ = service
        .performance_metrics("u-1", Some(range))
        .await
        .unwrap();
    let _ = service
        .performance_metrics("u-2", Some(range))
        .await
        .unwrap();
    let populated = cache.len();

    service.invalidate_user("u-1");
    assert!(cache.len() < populated);
    assert!(cache.len() >= 1);
}

#[tokio::test]
async fn test_unknown_user_degrades_to_empty_results() {
    let (service, _, _) = make_service();

    let report = service
        .generate_report("ghost", july(), false)
        .await
        .unwrap();
    assert_eq!(report.summary.total_trades, 0);
    assert_eq!(report.summary.net_pnl, dec!(0));

    let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31)).unwrap();
    let csv = service.export_csv("ghost", range).await.unwrap();
    assert_eq!(csv.lines().count(), 1);
}
