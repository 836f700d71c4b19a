//! Round-trip charge and P&L calculation for closed trades.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::schedule::ChargesSchedules;
use crate::error::AnalyticsError;
use crate::models::{ClosedTrade, OrderSide};

/// Itemized charges for one order side or for a full round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargesBreakdown {
    /// Brokerage.
    pub brokerage: Decimal,
    /// Securities/commodities transaction tax.
    pub stt: Decimal,
    /// Stamp duty.
    pub stamp_duty: Decimal,
    /// GST on brokerage.
    pub gst: Decimal,
    /// SEBI turnover charges.
    pub sebi_charges: Decimal,
    /// Exchange transaction charges.
    pub exchange_txn: Decimal,
    /// Sum of all components.
    pub total: Decimal,
}

impl ChargesBreakdown {
    /// Component-wise sum of two breakdowns.
    #[must_use]
    pub fn combined(&self, other: &Self) -> Self {
        Self {
            brokerage: self.brokerage + other.brokerage,
            stt: self.stt + other.stt,
            stamp_duty: self.stamp_duty + other.stamp_duty,
            gst: self.gst + other.gst,
            sebi_charges: self.sebi_charges + other.sebi_charges,
            exchange_txn: self.exchange_txn + other.exchange_txn,
            total: self.total + other.total,
        }
    }

    /// Copy with every field rounded to 2 decimals for output.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            brokerage: round_money(self.brokerage),
            stt: round_money(self.stt),
            stamp_duty: round_money(self.stamp_duty),
            gst: round_money(self.gst),
            sebi_charges: round_money(self.sebi_charges),
            exchange_txn: round_money(self.exchange_txn),
            total: round_money(self.total),
        }
    }
}

/// Full P&L result for a closed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnLResult {
    /// Price-based P&L before charges.
    pub gross_pnl: Decimal,
    /// P&L after round-trip charges.
    pub net_pnl: Decimal,
    /// Signed price move as a percentage of entry price.
    pub percentage_gain: Decimal,
    /// Net P&L as a percentage of capital deployed at entry.
    pub roi: Decimal,
    /// Exit price at which the round trip exactly covers its charges.
    pub break_even_price: Decimal,
    /// Entry-side charges.
    pub entry_charges: ChargesBreakdown,
    /// Exit-side charges.
    pub exit_charges: ChargesBreakdown,
    /// Combined round-trip charges.
    pub total_charges: ChargesBreakdown,
}

impl PnLResult {
    /// Copy with every monetary field rounded to 2 decimals for output.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            gross_pnl: round_money(self.gross_pnl),
            net_pnl: round_money(self.net_pnl),
            percentage_gain: round_money(self.percentage_gain),
            roi: round_money(self.roi),
            break_even_price: round_money(self.break_even_price),
            entry_charges: self.entry_charges.rounded(),
            exit_charges: self.exit_charges.rounded(),
            total_charges: self.total_charges.rounded(),
        }
    }
}

/// Round a monetary value to 2 decimals, midpoint away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Pure charge/P&L calculator over a schedule table.
///
/// Deterministic: identical inputs always produce identical output, so
/// results may be recomputed freely.
#[derive(Debug, Clone, Default)]
pub struct ChargesCalculator {
    schedules: ChargesSchedules,
}

impl ChargesCalculator {
    /// Create a calculator over the given schedule table.
    #[must_use]
    pub const fn new(schedules: ChargesSchedules) -> Self {
        Self { schedules }
    }

    /// Charges for one side of a trade, at full precision.
    ///
    /// `brokerage_override` short-circuits the schedule's brokerage rule
    /// when the broker statement reports the exact amount.
    #[must_use]
    pub fn side_charges(
        &self,
        trade: &ClosedTrade,
        side: OrderSide,
        price: Decimal,
        quantity: Decimal,
        brokerage_override: Option<Decimal>,
    ) -> ChargesBreakdown {
        let schedule = self.schedules.resolve(trade.broker);
        let row = schedule.row(trade.segment, trade.trade_type);
        let turnover = price * quantity;

        let brokerage =
            brokerage_override.unwrap_or_else(|| row.brokerage.amount(turnover));
        let stt = row.stt.amount(side, turnover);
        let stamp_duty = row.stamp_duty.amount(side, turnover);
        let gst = brokerage * schedule.gst_rate;
        let sebi_charges = turnover * schedule.sebi_rate;
        let exchange_txn =
            turnover * self.schedules.exchange_txn.rate(trade.segment, trade.exchange);

        let total = brokerage + stt + stamp_duty + gst + sebi_charges + exchange_txn;

        ChargesBreakdown {
            brokerage,
            stt,
            stamp_duty,
            gst,
            sebi_charges,
            exchange_txn,
            total,
        }
    }

    /// Full-precision P&L for a closed trade.
    ///
    /// Rejects non-positive prices and quantities; nothing is clamped.
    pub fn compute_exact(&self, trade: &ClosedTrade) -> Result<PnLResult, AnalyticsError> {
        let quantity = trade.quantity();
        if quantity <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_input(
                "quantity",
                "quantity must be positive",
            ));
        }
        if trade.entry.price <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_input(
                "entry_price",
                "entry price must be positive",
            ));
        }
        if trade.exit.price <= Decimal::ZERO {
            return Err(AnalyticsError::invalid_input(
                "exit_price",
                "exit price must be positive",
            ));
        }

        let sign = trade.position.sign();
        let entry_charges = self.side_charges(
            trade,
            entry_side(trade),
            trade.entry.price,
            quantity,
            trade.entry.brokerage_override,
        );
        let exit_charges = self.side_charges(
            trade,
            exit_side(trade),
            trade.exit.price,
            quantity,
            trade.exit.brokerage_override,
        );
        let total_charges = entry_charges.combined(&exit_charges);

        let gross_pnl = sign * (trade.exit.price - trade.entry.price) * quantity;
        let net_pnl = gross_pnl - total_charges.total;
        let break_even_price = trade.entry.price + sign * (total_charges.total / quantity);
        let percentage_gain = sign
            * (trade.exit.price - trade.entry.price)
            * Decimal::ONE_HUNDRED
            / trade.entry.price;
        let deployed = trade.entry.price * quantity;
        let roi = net_pnl * Decimal::ONE_HUNDRED / deployed;

        Ok(PnLResult {
            gross_pnl,
            net_pnl,
            percentage_gain,
            roi,
            break_even_price,
            entry_charges,
            exit_charges,
            total_charges,
        })
    }

    /// P&L for a closed trade, rounded to 2 decimals at the output
    /// boundary. Internal accumulation stays at full decimal precision.
    pub fn compute(&self, trade: &ClosedTrade) -> Result<PnLResult, AnalyticsError> {
        Ok(self.compute_exact(trade)?.rounded())
    }
}

/// Side of the entry leg: long positions open with a buy, shorts with a sell.
const fn entry_side(trade: &ClosedTrade) -> OrderSide {
    match trade.position {
        crate::models::Position::Long => OrderSide::Buy,
        crate::models::Position::Short => OrderSide::Sell,
    }
}

const fn exit_side(trade: &ClosedTrade) -> OrderSide {
    match entry_side(trade) {
        OrderSide::Buy => OrderSide::Sell,
        OrderSide::Sell => OrderSide::Buy,
    }
}
