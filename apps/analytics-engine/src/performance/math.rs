//! Shared statistical helpers for performance metrics and reports.
//!
//! The report aggregator and the metrics engine both derive win rate,
//! profit factor and expectancy through these functions, so dashboard and
//! report figures cannot drift apart.

use rust_decimal::Decimal;

use super::constants::{HUNDRED, TOLERANCE, TWO};

/// Approximate square root using Newton's method.
#[must_use]
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut guess = value / TWO;

    for _ in 0..50 {
        let next = (guess + value / guess) / TWO;
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}

/// Win rate as a fraction of decided trades; 0 when nothing is decided.
///
/// Break-even trades are excluded from the denominator.
#[must_use]
pub fn win_rate(winning: u32, losing: u32) -> Decimal {
    let decided = winning + losing;
    if decided == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(winning) / Decimal::from(decided)
}

/// Win rate as a percentage.
#[must_use]
pub fn win_rate_pct(winning: u32, losing: u32) -> Decimal {
    win_rate(winning, losing) * HUNDRED
}

/// Gross wins over gross losses; 0 when there are no losses.
#[must_use]
pub fn profit_factor(gross_wins: Decimal, gross_losses: Decimal) -> Decimal {
    if gross_losses <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    gross_wins / gross_losses
}

/// Mean of a total over a count; 0 for an empty count.
#[must_use]
pub fn average(total: Decimal, count: u32) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}

/// Expected P&L per trade from a fractional win rate and average
/// win/loss magnitudes.
#[must_use]
pub fn expectancy(win_rate: Decimal, average_win: Decimal, average_loss: Decimal) -> Decimal {
    win_rate * average_win - (Decimal::ONE - win_rate) * average_loss
}
