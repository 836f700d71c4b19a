//! Single-pass streaming computation of performance metrics.

use rust_decimal::Decimal;

use super::constants::TRADING_DAYS;
use super::math::{average, expectancy, sqrt_decimal, win_rate, win_rate_pct};
use super::types::PerformanceMetrics;
use crate::models::DailyPnLRecord;

/// Streaming performance-metrics engine over ordered daily records.
///
/// One forward pass accumulates everything the derivations need; the
/// window is never materialized twice. Sum/sum-of-squares variance is
/// less stable than Welford's recurrence for very long series, which is
/// acceptable at journal scale (a few thousand days at most).
#[derive(Debug, Clone)]
pub struct PerformanceEngine {
    trading_days_per_year: Decimal,
}

impl Default for PerformanceEngine {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS,
        }
    }
}

/// Accumulator state for the single forward pass.
#[derive(Debug, Default)]
struct Accumulator {
    sum: Decimal,
    sum_of_squares: Decimal,
    downside_sum_of_squares: Decimal,
    negative_days: u32,
    profitable_days: u32,
    running_total: Decimal,
    peak: Decimal,
    max_drawdown: Decimal,
    max_drawdown_date: Option<chrono::NaiveDate>,
    total_wins: Decimal,
    total_losses: Decimal,
    winning_trades: u32,
    losing_trades: u32,
}

impl Accumulator {
    fn fold(&mut self, record: &DailyPnLRecord) {
        let pnl = record.net_pnl;

        self.sum += pnl;
        self.sum_of_squares += pnl * pnl;
        if pnl < Decimal::ZERO {
            self.downside_sum_of_squares += pnl * pnl;
            self.negative_days += 1;
        }
        if pnl > Decimal::ZERO {
            self.profitable_days += 1;
        }

        // Drawdown tracks cumulative P&L from a zero baseline; order of
        // records is what makes this meaningful.
        self.running_total += pnl;
        if self.running_total > self.peak {
            self.peak = self.running_total;
        }
        let drawdown = self.peak - self.running_total;
        if drawdown > self.max_drawdown {
            self.max_drawdown = drawdown;
            self.max_drawdown_date = Some(record.date);
        }

        self.total_wins += record.total_wins();
        self.total_losses += record.total_losses();
        self.winning_trades += record.winning_trades;
        self.losing_trades += record.losing_trades;
    }
}

impl PerformanceEngine {
    /// Create an engine with the default annualization base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute metrics over a window of daily records.
    ///
    /// Records are scanned in ascending date order; an unsorted input is
    /// sorted first (drawdown is order-dependent). An empty window yields
    /// the all-zero record.
    #[must_use]
    pub fn compute(&self, records: &[DailyPnLRecord]) -> PerformanceMetrics {
        if records.is_empty() {
            return PerformanceMetrics::default();
        }

        let sorted_storage;
        let ordered: &[DailyPnLRecord] = if records.is_sorted_by_key(|r| r.date) {
            records
        } else {
            let mut owned = records.to_vec();
            owned.sort_by_key(|r| r.date);
            sorted_storage = owned;
            &sorted_storage
        };

        let mut acc = Accumulator::default();
        for record in ordered {
            acc.fold(record);
        }

        self.derive(&acc, ordered.len() as u32)
    }

    /// O(1) derivations from the accumulated pass.
    fn derive(&self, acc: &Accumulator, days: u32) -> PerformanceMetrics {
        let n = Decimal::from(days);
        let mean = acc.sum / n;

        // Population variance, clamped before the square root so tiny
        // negative residue from the difference of squares cannot panic.
        let variance = (acc.sum_of_squares / n - mean * mean).max(Decimal::ZERO);
        let std_dev = sqrt_decimal(variance).unwrap_or(Decimal::ZERO);

        let downside_dev = if acc.negative_days == 0 {
            Decimal::ZERO
        } else {
            sqrt_decimal(acc.downside_sum_of_squares / Decimal::from(acc.negative_days))
                .unwrap_or(Decimal::ZERO)
        };

        let annualize = sqrt_decimal(self.trading_days_per_year).unwrap_or(Decimal::ZERO);
        let sharpe_ratio = if std_dev > Decimal::ZERO {
            mean / std_dev * annualize
        } else {
            Decimal::ZERO
        };
        let sortino_ratio = if downside_dev > Decimal::ZERO {
            mean / downside_dev * annualize
        } else {
            Decimal::ZERO
        };

        let total_pnl = acc.sum;
        let recovery_factor = if acc.max_drawdown > Decimal::ZERO {
            total_pnl / acc.max_drawdown
        } else {
            Decimal::ZERO
        };
        let calmar_ratio = if acc.max_drawdown > Decimal::ZERO {
            mean * self.trading_days_per_year / acc.max_drawdown
        } else {
            Decimal::ZERO
        };

        let average_win = average(acc.total_wins, acc.winning_trades);
        let average_loss = average(acc.total_losses, acc.losing_trades);
        let average_rrr = if average_loss > Decimal::ZERO {
            average_win / average_loss
        } else {
            Decimal::ZERO
        };

        let rate = win_rate(acc.winning_trades, acc.losing_trades);
        let expectancy = expectancy(rate, average_win, average_loss);

        let consistency = Decimal::from(acc.profitable_days) * Decimal::ONE_HUNDRED / n;

        PerformanceMetrics {
            sharpe_ratio,
            sortino_ratio,
            max_drawdown: acc.max_drawdown,
            max_drawdown_date: acc.max_drawdown_date,
            recovery_factor,
            calmar_ratio,
            average_rrr,
            expectancy,
            consistency,
            win_rate: win_rate_pct(acc.winning_trades, acc.losing_trades),
            average_win,
            average_loss,
            total_pnl,
            trading_days: days,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    fn day(d: u32, net_pnl: Decimal) -> DailyPnLRecord {
        let mut record =
            DailyPnLRecord::empty(NaiveDate::from_ymd_opt(2026, 7, d).unwrap());
        record.net_pnl = net_pnl;
        record.gross_pnl = net_pnl;
        record.total_trades = 1;
        if net_pnl > Decimal::ZERO {
            record.winning_trades = 1;
            record.average_win = net_pnl;
            record.largest_win = net_pnl;
        } else if net_pnl < Decimal::ZERO {
            record.losing_trades = 1;
            record.average_loss = net_pnl.abs();
            record.largest_loss = net_pnl.abs();
        } else {
            record.break_even_trades = 1;
        }
        record
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        let metrics = PerformanceEngine::new().compute(&[]);
        assert_eq!(metrics, PerformanceMetrics::default());
    }

    #[test]
    fn test_drawdown_sequence() {
        // Running totals 100, 50, 250, -50, 0; peaks 100, 100, 250, 250, 250.
        let records = vec![
            day(1, dec!(100)),
            day(2, dec!(-50)),
            day(3, dec!(200)),
            day(4, dec!(-300)),
            day(5, dec!(50)),
        ];

        let metrics = PerformanceEngine::new().compute(&records);

        assert_eq!(metrics.max_drawdown, dec!(300));
        assert_eq!(
            metrics.max_drawdown_date,
            Some(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap())
        );
        assert_eq!(metrics.total_pnl, Decimal::ZERO);
        // Total P&L is zero, so recovery resolves to zero despite a real
        // drawdown.
        assert_eq!(metrics.recovery_factor, Decimal::ZERO);
        assert_eq!(metrics.trading_days, 5);
        // 3 of 5 days profitable.
        assert_eq!(metrics.consistency, dec!(60));
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_the_pass() {
        let sorted = vec![
            day(1, dec!(100)),
            day(2, dec!(-50)),
            day(3, dec!(200)),
            day(4, dec!(-300)),
            day(5, dec!(50)),
        ];
        let mut shuffled = sorted.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 4);

        let engine = PerformanceEngine::new();
        assert_eq!(engine.compute(&sorted), engine.compute(&shuffled));
    }

    #[test]
    fn test_all_winning_days_zero_denominators() {
        let records = vec![day(1, dec!(100)), day(2, dec!(150)), day(3, dec!(80))];
        let metrics = PerformanceEngine::new().compute(&records);

        // No losing day: sortino, drawdown-based ratios and RRR resolve
        // to zero rather than infinity.
        assert_eq!(metrics.sortino_ratio, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown, Decimal::ZERO);
        assert_eq!(metrics.recovery_factor, Decimal::ZERO);
        assert_eq!(metrics.calmar_ratio, Decimal::ZERO);
        assert_eq!(metrics.average_rrr, Decimal::ZERO);
        assert_eq!(metrics.win_rate, dec!(100));
        assert_eq!(metrics.consistency, dec!(100));
    }

    #[test]
    fn test_constant_pnl_zero_variance() {
        let records = vec![day(1, dec!(10)), day(2, dec!(10)), day(3, dec!(10))];
        let metrics = PerformanceEngine::new().compute(&records);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_sharpe_positive_for_mostly_winning_series() {
        let records = vec![
            day(1, dec!(120)),
            day(2, dec!(90)),
            day(3, dec!(-30)),
            day(4, dec!(110)),
            day(5, dec!(70)),
        ];
        let metrics = PerformanceEngine::new().compute(&records);

        assert!(metrics.sharpe_ratio > Decimal::ZERO);
        assert!(metrics.sortino_ratio > metrics.sharpe_ratio);
        assert_eq!(metrics.max_drawdown, dec!(30));
    }

    #[test]
    fn test_expectancy_weighted_by_trade_counts() {
        let mut heavy_win = day(1, dec!(450));
        heavy_win.total_trades = 3;
        heavy_win.winning_trades = 3;
        heavy_win.average_win = dec!(150);

        let mut mixed = day(2, dec!(-160));
        mixed.total_trades = 2;
        mixed.winning_trades = 0;
        mixed.losing_trades = 2;
        mixed.average_win = Decimal::ZERO;
        mixed.average_loss = dec!(80);

        let metrics = PerformanceEngine::new().compute(&[heavy_win, mixed]);

        // 3 wins totalling 450, 2 losses totalling 160.
        assert_eq!(metrics.average_win, dec!(150));
        assert_eq!(metrics.average_loss, dec!(80));
        assert_eq!(metrics.win_rate, dec!(60));
        // 0.6*150 - 0.4*80 = 58
        assert_eq!(metrics.expectancy, dec!(58.0));
    }

    proptest! {
        #[test]
        fn prop_extending_window_never_shrinks_drawdown(
            pnls in proptest::collection::vec(-500i64..500, 1..40),
            extra in -500i64..500,
        ) {
            let records: Vec<DailyPnLRecord> = pnls
                .iter()
                .enumerate()
                .map(|(i, v)| day(i as u32 % 28 + 1, Decimal::new(*v, 0)))
                .collect();

            let mut records = records;
            // Re-stamp dates strictly ascending across months.
            for (i, record) in records.iter_mut().enumerate() {
                record.date = NaiveDate::from_num_days_from_ce_opt(739_000 + i as i32).unwrap();
            }

            let engine = PerformanceEngine::new();
            let shorter = engine.compute(&records);

            let mut extended = records;
            let next_date =
                NaiveDate::from_num_days_from_ce_opt(739_000 + extended.len() as i32).unwrap();
            let mut extra_day = day(1, Decimal::new(extra, 0));
            extra_day.date = next_date;
            extended.push(extra_day);

            let longer = engine.compute(&extended);
            prop_assert!(longer.max_drawdown >= shorter.max_drawdown);
        }

        #[test]
        fn prop_consistency_bounded(
            pnls in proptest::collection::vec(-1000i64..1000, 1..60),
        ) {
            let mut records: Vec<DailyPnLRecord> = pnls
                .iter()
                .map(|v| day(1, Decimal::new(*v, 0)))
                .collect();
            for (i, record) in records.iter_mut().enumerate() {
                record.date = NaiveDate::from_num_days_from_ce_opt(739_000 + i as i32).unwrap();
            }

            let metrics = PerformanceEngine::new().compute(&records);
            prop_assert!(metrics.consistency >= Decimal::ZERO);
            prop_assert!(metrics.consistency <= Decimal::ONE_HUNDRED);
        }
    }
}
