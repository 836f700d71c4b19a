//! Performance metrics record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk and performance metrics over a daily P&L window.
///
/// Computed on demand and memoized in the result cache; never persisted as
/// a source of truth. `Default` is the all-zero record returned for an
/// empty window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Annualized Sharpe ratio over daily net P&L.
    pub sharpe_ratio: Decimal,
    /// Annualized Sortino ratio (downside deviation only).
    pub sortino_ratio: Decimal,
    /// Largest peak-to-trough decline of cumulative net P&L.
    pub max_drawdown: Decimal,
    /// Date the maximum drawdown trough occurred.
    pub max_drawdown_date: Option<NaiveDate>,
    /// Total P&L over the maximum drawdown; 0 when there was no drawdown.
    pub recovery_factor: Decimal,
    /// Annualized mean daily P&L over the maximum drawdown.
    pub calmar_ratio: Decimal,
    /// Average win over average loss; 0 when there are no losses.
    pub average_rrr: Decimal,
    /// Expected P&L per trade.
    pub expectancy: Decimal,
    /// Percentage of profitable days in the window.
    pub consistency: Decimal,
    /// Win rate over decided trades, percent.
    pub win_rate: Decimal,
    /// Average winning trade.
    pub average_win: Decimal,
    /// Average losing trade (positive magnitude).
    pub average_loss: Decimal,
    /// Total net P&L over the window.
    pub total_pnl: Decimal,
    /// Number of trading days in the window.
    pub trading_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let metrics = PerformanceMetrics::default();
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown_date, None);
        assert_eq!(metrics.trading_days, 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let metrics = PerformanceMetrics {
            sharpe_ratio: Decimal::new(185, 2),
            trading_days: 252,
            ..Default::default()
        };
        let json = serde_json::to_string(&metrics).unwrap();
        let parsed: PerformanceMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metrics);
    }
}
