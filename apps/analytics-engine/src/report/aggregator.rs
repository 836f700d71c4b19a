//! Aggregation of daily records into period reports.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    BreakdownSlice, DailyRow, PeriodComparison, ReportPeriod, ReportSummary, SymbolPerformance,
    TradingReport,
};
use crate::charges::round_money;
use crate::models::{
    BreakdownDimension, CategorySums, DailyPnLRecord, DateRange, Position, Segment, SessionBucket,
    TradeType,
};
use crate::performance::math;

/// Number of symbols in each of the top/worst rankings.
const SYMBOL_RANKING_SIZE: usize = 5;

/// Builds period reports, categorical breakdowns and period comparisons
/// from daily records.
///
/// All derived statistics go through [`crate::performance::math`], the
/// same helpers the metrics engine uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    /// Create an aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build a report over the records of a resolved period.
    ///
    /// An empty slice produces a well-formed all-zero report.
    #[must_use]
    pub fn build(
        &self,
        period: ReportPeriod,
        range: DateRange,
        records: &[DailyPnLRecord],
        include_daily: bool,
    ) -> TradingReport {
        let (top_symbols, worst_symbols) = self.rank_symbols(records);

        let daily = include_daily.then(|| {
            let mut rows: Vec<DailyRow> = records
                .iter()
                .map(|r| DailyRow {
                    date: r.date,
                    total_trades: r.total_trades,
                    gross_pnl: r.gross_pnl,
                    net_pnl: r.net_pnl,
                    charges: r.charges,
                })
                .collect();
            rows.sort_by_key(|row| row.date);
            rows
        });

        TradingReport {
            id: Uuid::new_v4(),
            period,
            range,
            summary: self.summarize(records),
            by_segment: breakdown_by(records, Segment::ALL.iter(), |r, s| {
                r.by_segment.get(s).copied()
            }),
            by_trade_type: breakdown_by(records, TradeType::ALL.iter(), |r, t| {
                r.by_trade_type.get(t).copied()
            }),
            by_position: breakdown_by(records, Position::ALL.iter(), |r, p| {
                r.by_position.get(p).copied()
            }),
            top_symbols,
            worst_symbols,
            daily,
            generated_at: Utc::now(),
        }
    }

    /// Headline summary over the records.
    #[must_use]
    pub fn summarize(&self, records: &[DailyPnLRecord]) -> ReportSummary {
        let mut summary = ReportSummary::default();
        let mut total_wins = Decimal::ZERO;
        let mut total_losses = Decimal::ZERO;

        for record in records {
            summary.total_trades += record.total_trades;
            summary.winning_trades += record.winning_trades;
            summary.losing_trades += record.losing_trades;
            summary.break_even_trades += record.break_even_trades;
            summary.gross_pnl += record.gross_pnl;
            summary.net_pnl += record.net_pnl;
            summary.total_charges += record.charges;
            summary.largest_win = summary.largest_win.max(record.largest_win);
            summary.largest_loss = summary.largest_loss.max(record.largest_loss);
            total_wins += record.total_wins();
            total_losses += record.total_losses();
        }

        let rate = math::win_rate(summary.winning_trades, summary.losing_trades);
        summary.win_rate = round_money(rate * Decimal::ONE_HUNDRED);
        summary.profit_factor = round_money(math::profit_factor(total_wins, total_losses));
        summary.average_win = round_money(math::average(total_wins, summary.winning_trades));
        summary.average_loss = round_money(math::average(total_losses, summary.losing_trades));
        summary.expectancy = round_money(math::expectancy(
            rate,
            math::average(total_wins, summary.winning_trades),
            math::average(total_losses, summary.losing_trades),
        ));

        summary
    }

    /// Categorical breakdown over the query dimensions.
    #[must_use]
    pub fn breakdown(
        &self,
        records: &[DailyPnLRecord],
        dimension: BreakdownDimension,
    ) -> Vec<BreakdownSlice> {
        match dimension {
            BreakdownDimension::Segment => {
                breakdown_by(records, Segment::ALL.iter(), |r, s| {
                    r.by_segment.get(s).copied()
                })
            }
            BreakdownDimension::TradeType => {
                breakdown_by(records, TradeType::ALL.iter(), |r, t| {
                    r.by_trade_type.get(t).copied()
                })
            }
            BreakdownDimension::Position => {
                breakdown_by(records, Position::ALL.iter(), |r, p| {
                    r.by_position.get(p).copied()
                })
            }
            BreakdownDimension::TimeOfDay => {
                breakdown_by(records, SessionBucket::ALL.iter(), |r, b| {
                    r.by_session.get(b).copied()
                })
            }
            BreakdownDimension::DayOfWeek => day_of_week_breakdown(records),
        }
    }

    /// Top and worst symbol rankings over the records' per-symbol sums.
    ///
    /// Ranked by net P&L; ties broken by higher trade count, then lexical
    /// symbol order.
    #[must_use]
    pub fn rank_symbols(
        &self,
        records: &[DailyPnLRecord],
    ) -> (Vec<SymbolPerformance>, Vec<SymbolPerformance>) {
        let mut totals: BTreeMap<&str, CategorySums> = BTreeMap::new();
        for record in records {
            for (symbol, sums) in &record.by_symbol {
                totals.entry(symbol.as_str()).or_default().merge(*sums);
            }
        }

        let mut lines: Vec<SymbolPerformance> = totals
            .into_iter()
            .map(|(symbol, sums)| SymbolPerformance {
                symbol: symbol.to_string(),
                net_pnl: sums.net_pnl,
                trade_count: sums.trades,
            })
            .collect();

        // BTreeMap iteration already yields lexical order, so a stable
        // sort on (pnl, trade count) preserves it as the final tie-break.
        lines.sort_by(|a, b| {
            b.net_pnl
                .cmp(&a.net_pnl)
                .then(b.trade_count.cmp(&a.trade_count))
        });
        let top = lines.iter().take(SYMBOL_RANKING_SIZE).cloned().collect();

        lines.sort_by(|a, b| {
            a.net_pnl
                .cmp(&b.net_pnl)
                .then(b.trade_count.cmp(&a.trade_count))
        });
        let worst = lines.into_iter().take(SYMBOL_RANKING_SIZE).collect();

        (top, worst)
    }

    /// Signed deltas between two independently built reports.
    #[must_use]
    pub fn compare(&self, first: &TradingReport, second: &TradingReport) -> PeriodComparison {
        PeriodComparison {
            first: first.period,
            second: second.period,
            net_pnl_delta: second.summary.net_pnl - first.summary.net_pnl,
            win_rate_delta: second.summary.win_rate - first.summary.win_rate,
            trade_count_delta: i64::from(second.summary.total_trades)
                - i64::from(first.summary.total_trades),
        }
    }
}

/// Fold one partial-sum axis of every record into fixed-category slices.
fn breakdown_by<'a, C, I, F>(records: &[DailyPnLRecord], categories: I, pick: F) -> Vec<BreakdownSlice>
where
    C: 'a + Copy + LabelledCategory,
    I: Iterator<Item = &'a C>,
    F: Fn(&DailyPnLRecord, &C) -> Option<CategorySums>,
{
    categories
        .map(|category| {
            let mut sums = CategorySums::default();
            for record in records {
                if let Some(partial) = pick(record, category) {
                    sums.merge(partial);
                }
            }
            BreakdownSlice {
                label: category.label().to_string(),
                value: sums.net_pnl,
                count: sums.trades,
            }
        })
        .collect()
}

/// Weekday breakdown from the records' exchange-local dates.
fn day_of_week_breakdown(records: &[DailyPnLRecord]) -> Vec<BreakdownSlice> {
    const LABELS: [&str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];

    let mut sums = [(Decimal::ZERO, 0u32); 7];
    for record in records {
        let idx = record.date.weekday().num_days_from_monday() as usize;
        sums[idx].0 += record.net_pnl;
        sums[idx].1 += record.total_trades;
    }

    LABELS
        .iter()
        .zip(sums)
        .map(|(label, (value, count))| BreakdownSlice {
            label: (*label).to_string(),
            value,
            count,
        })
        .collect()
}

/// Category with a stable breakdown label.
trait LabelledCategory {
    fn label(&self) -> &'static str;
}

impl LabelledCategory for Segment {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl LabelledCategory for TradeType {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl LabelledCategory for Position {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl LabelledCategory for SessionBucket {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}
