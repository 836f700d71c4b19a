//! Analytics service facade exposed to the request layer.
//!
//! Explicitly constructed with an injected ledger port, result cache and
//! configuration — no module-level singletons. Computation is synchronous
//! per request; independent fetches feeding one composite result are
//! issued concurrently and joined before composition. Cancellation is the
//! caller's concern and no background tasks are spawned.

mod summary;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

pub use summary::{DashboardSummary, PeriodSnapshot};

use crate::cache::{ResultCache, keys};
use crate::charges::{ChargesCalculator, PnLResult};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::ledger::LedgerPort;
use crate::models::{
    BreakdownDimension, ClosedTrade, DailyPnLRecord, DateRange, SymbolAggregate,
};
use crate::observability;
use crate::performance::{PerformanceEngine, PerformanceMetrics};
use crate::report::{
    BreakdownSlice, PeriodComparison, ReportAggregator, ReportPeriod, TradingReport, export_csv,
};

/// Size of the dashboard's symbol rankings.
const DASHBOARD_SYMBOLS: usize = 5;

/// Lower bound for the lifetime window; the journal has no older data.
const ALL_TIME_START: NaiveDate = NaiveDate::MIN;

/// The analytics engine's entry point for the request layer.
///
/// Read-path results are memoized through the injected cache; every trade
/// mutation (create, update, delete, broker sync) must call
/// [`AnalyticsService::invalidate_user`], since a stale cached figure is a
/// correctness bug, not a cosmetic one.
pub struct AnalyticsService<L> {
    ledger: Arc<L>,
    cache: Arc<dyn ResultCache>,
    config: AnalyticsConfig,
    charges: ChargesCalculator,
    engine: PerformanceEngine,
    aggregator: ReportAggregator,
}

impl<L: LedgerPort> AnalyticsService<L> {
    /// Wire a service from its collaborators.
    #[must_use]
    pub fn new(ledger: Arc<L>, cache: Arc<dyn ResultCache>, config: AnalyticsConfig) -> Self {
        let charges = ChargesCalculator::new(config.charges.clone());
        Self {
            ledger,
            cache,
            config,
            charges,
            engine: PerformanceEngine::new(),
            aggregator: ReportAggregator::new(),
        }
    }

    /// Today's date in the configured reporting timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now()
            .with_timezone(&self.config.reporting.offset())
            .date_naive()
    }

    /// Charges and P&L for one closed trade.
    ///
    /// Pure and cheap; deliberately not routed through the cache.
    pub fn trade_pnl(&self, trade: &ClosedTrade) -> Result<PnLResult, AnalyticsError> {
        self.charges.compute(trade)
    }

    /// The composed dashboard summary.
    #[instrument(skip(self))]
    pub async fn dashboard_summary(
        &self,
        user_id: &str,
    ) -> Result<DashboardSummary, AnalyticsError> {
        let key = keys::dashboard(user_id);
        self.cached(
            "dashboard",
            &key,
            self.config.cache.dashboard(),
            self.compute_dashboard(user_id),
        )
        .await
    }

    /// Performance metrics over a window; defaults to the trailing
    /// configured number of months ending today.
    #[instrument(skip(self))]
    pub async fn performance_metrics(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<PerformanceMetrics, AnalyticsError> {
        let range = match range {
            Some(range) => range,
            None => self.default_metrics_range()?,
        };

        let key = keys::metrics(user_id, range);
        self.cached(
            "metrics",
            &key,
            self.config.cache.metrics(),
            async {
                let records = self.fetch_records(user_id, range).await?;
                Ok(self.timed_compute("performance_metrics", || self.engine.compute(&records)))
            },
        )
        .await
    }

    /// Net P&L broken down by a closed dimension; same default window as
    /// the metrics query.
    #[instrument(skip(self))]
    pub async fn pnl_breakdown(
        &self,
        user_id: &str,
        dimension: BreakdownDimension,
        range: Option<DateRange>,
    ) -> Result<Vec<BreakdownSlice>, AnalyticsError> {
        let range = match range {
            Some(range) => range,
            None => self.default_metrics_range()?,
        };

        let key = keys::breakdown(user_id, dimension, range);
        self.cached(
            "breakdown",
            &key,
            self.config.cache.breakdown(),
            async {
                let records = self.fetch_records(user_id, range).await?;
                Ok(self.timed_compute("breakdown", || {
                    self.aggregator.breakdown(&records, dimension)
                }))
            },
        )
        .await
    }

    /// Build a report for a period.
    #[instrument(skip(self))]
    pub async fn generate_report(
        &self,
        user_id: &str,
        period: ReportPeriod,
        include_daily: bool,
    ) -> Result<TradingReport, AnalyticsError> {
        let range = period.resolve()?;

        let key = keys::report(user_id, &period.key(), include_daily);
        self.cached(
            "report",
            &key,
            self.config.cache.report(),
            async {
                let records = self.fetch_records(user_id, range).await?;
                Ok(self.timed_compute("report", || {
                    self.aggregator.build(period, range, &records, include_daily)
                }))
            },
        )
        .await
    }

    /// Compare two periods: each report is computed independently and the
    /// result is `second − first` for net P&L, win rate and trade count.
    /// The periods may be disjoint, overlapping or of unequal length.
    #[instrument(skip(self))]
    pub async fn compare_periods(
        &self,
        user_id: &str,
        first: ReportPeriod,
        second: ReportPeriod,
    ) -> Result<PeriodComparison, AnalyticsError> {
        let (first_report, second_report) = tokio::join!(
            self.generate_report(user_id, first, false),
            self.generate_report(user_id, second, false),
        );
        Ok(self.aggregator.compare(&first_report?, &second_report?))
    }

    /// Render the user's daily history for a range as CSV.
    #[instrument(skip(self))]
    pub async fn export_csv(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<String, AnalyticsError> {
        let records = self.fetch_records(user_id, range).await?;
        Ok(export_csv(&records))
    }

    /// Drop every cached result for the user.
    ///
    /// Must be called on every trade create/update/delete/sync for the
    /// user.
    #[instrument(skip(self))]
    pub fn invalidate_user(&self, user_id: &str) {
        self.cache.invalidate_prefix(&keys::user_scope(user_id));
        observability::record_cache_invalidation();
        tracing::debug!(user_id, "cached analytics invalidated");
    }

    // ------------------------------------------------------------------
    // Composition internals
    // ------------------------------------------------------------------

    async fn compute_dashboard(&self, user_id: &str) -> Result<DashboardSummary, AnalyticsError> {
        let today = self.today();
        let month_start = today.with_day(1).unwrap_or(today);
        let recent_days = i64::from(self.config.reporting.recent_window_days);
        let recent_start = today - chrono::Duration::days(recent_days - 1);

        let all_time_range = DateRange::new(ALL_TIME_START, today)?;
        let month_range = DateRange::new(month_start, today)?;
        let recent_range = DateRange::new(recent_start.min(today), today)?;

        let today_label = today.to_string();
        let month_label = format!("{:04}-{:02}", today.year(), today.month());

        // Independent fetches, joined before composition.
        let (today_snapshot, month_snapshot, all_time_records, recent_records, symbols) = tokio::join!(
            self.period_snapshot(user_id, &today_label, DateRange::single(today)),
            self.period_snapshot(user_id, &month_label, month_range),
            self.fetch_records(user_id, all_time_range),
            self.fetch_records(user_id, recent_range),
            self.fetch_symbols(user_id),
        );

        let all_time = PeriodSnapshot::from_records(&all_time_records?);
        let recent_records = recent_records?;
        let recent_performance =
            self.timed_compute("performance_metrics", || self.engine.compute(&recent_records));
        let (top_symbols, worst_symbols) = rank_symbol_aggregates(symbols?);

        Ok(DashboardSummary {
            today: today_snapshot?,
            this_month: month_snapshot?,
            all_time,
            recent_performance,
            top_symbols,
            worst_symbols,
        })
    }

    /// Snapshot for a period: the ledger's pre-aggregated record when one
    /// exists, otherwise a range fetch.
    async fn period_snapshot(
        &self,
        user_id: &str,
        period_key: &str,
        range: DateRange,
    ) -> Result<PeriodSnapshot, AnalyticsError> {
        if let Some(record) = self.fetch_period_record(user_id, period_key).await? {
            return Ok(PeriodSnapshot::from_records(std::slice::from_ref(&record)));
        }
        let records = self.fetch_records(user_id, range).await?;
        Ok(PeriodSnapshot::from_records(&records))
    }

    fn default_metrics_range(&self) -> Result<DateRange, AnalyticsError> {
        let end = self.today();
        let months = self.config.reporting.default_metrics_months;
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(ALL_TIME_START);
        DateRange::new(start, end)
    }

    fn timed_compute<T>(&self, operation: &str, compute: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = compute();
        observability::record_computation(operation, started.elapsed().as_secs_f64());
        result
    }

    // ------------------------------------------------------------------
    // Ledger fetch wrappers
    // ------------------------------------------------------------------

    async fn fetch_records(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<DailyPnLRecord>, AnalyticsError> {
        let started = Instant::now();
        let result = self.ledger.fetch_daily_records(user_id, range).await;
        record_fetch("daily_records", &result, started);
        Ok(result?)
    }

    async fn fetch_symbols(
        &self,
        user_id: &str,
    ) -> Result<Vec<SymbolAggregate>, AnalyticsError> {
        let started = Instant::now();
        let result = self.ledger.fetch_symbol_aggregates(user_id).await;
        record_fetch("symbol_aggregates", &result, started);
        Ok(result?)
    }

    async fn fetch_period_record(
        &self,
        user_id: &str,
        period_key: &str,
    ) -> Result<Option<DailyPnLRecord>, AnalyticsError> {
        let started = Instant::now();
        let result = self.ledger.fetch_period_record(user_id, period_key).await;
        record_fetch("period_record", &result, started);
        Ok(result?)
    }

    // ------------------------------------------------------------------
    // Cache plumbing
    // ------------------------------------------------------------------

    /// Memoize a computation through the result cache.
    ///
    /// A hit that fails to decode (schema drift after a deploy) is dropped
    /// and recomputed; the cache can never fail a request.
    async fn cached<T>(
        &self,
        query: &'static str,
        key: &str,
        ttl: Duration,
        compute: impl Future<Output = Result<T, AnalyticsError>>,
    ) -> Result<T, AnalyticsError>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(value) = self.cache.get(key) {
            match serde_json::from_value(value) {
                Ok(hit) => {
                    observability::record_cache_hit(query);
                    return Ok(hit);
                }
                Err(e) => {
                    tracing::warn!(key, "dropping undecodable cache entry: {e}");
                    self.cache.delete(key);
                }
            }
        }

        observability::record_cache_miss(query);
        let result = compute.await?;
        let value = serde_json::to_value(&result)
            .map_err(|e| AnalyticsError::internal(format!("cache serialization failed: {e}")))?;
        self.cache.set(key, value, ttl);
        Ok(result)
    }
}

/// Record a ledger fetch outcome.
fn record_fetch<T>(operation: &str, result: &Result<T, crate::ledger::LedgerError>, started: Instant) {
    let status = if result.is_ok() { "ok" } else { "error" };
    observability::record_ledger_fetch(operation, status, started.elapsed().as_secs_f64());
}

/// Rank lifetime symbol aggregates into the dashboard's top and worst
/// lists: net P&L, then higher trade count, then lexical symbol order.
fn rank_symbol_aggregates(
    mut symbols: Vec<SymbolAggregate>,
) -> (Vec<SymbolAggregate>, Vec<SymbolAggregate>) {
    symbols.sort_by(|a, b| {
        b.net_pnl
            .cmp(&a.net_pnl)
            .then(b.trade_count.cmp(&a.trade_count))
            .then(a.symbol.cmp(&b.symbol))
    });
    let top = symbols.iter().take(DASHBOARD_SYMBOLS).cloned().collect();

    symbols.sort_by(|a, b| {
        a.net_pnl
            .cmp(&b.net_pnl)
            .then(b.trade_count.cmp(&a.trade_count))
            .then(a.symbol.cmp(&b.symbol))
    });
    let worst = symbols.into_iter().take(DASHBOARD_SYMBOLS).collect();

    (top, worst)
}
