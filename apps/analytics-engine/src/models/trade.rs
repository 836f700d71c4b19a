//! Closed-trade records as received from the journal ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Broker, Exchange, OrderKind, Position, Segment, TradeType};

/// One executed leg (entry or exit) of a closed trade.
///
/// Legs are immutable once recorded; the journal never edits a fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    /// Fill price per unit.
    pub price: Decimal,
    /// Filled quantity (shares or contracts).
    pub quantity: Decimal,
    /// Fill timestamp.
    pub timestamp: DateTime<Utc>,
    /// Order type the leg was placed as.
    pub order_kind: OrderKind,
    /// Explicit brokerage for this leg, when the broker statement carries
    /// one. Overrides the schedule's brokerage rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brokerage_override: Option<Decimal>,
}

/// A round-trip trade with both legs recorded.
///
/// Created by the ledger when a position is closed; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// Instrument symbol (e.g. "RELIANCE", "NIFTY24AUGFUT").
    pub symbol: String,
    /// Opening leg.
    pub entry: TradeLeg,
    /// Closing leg.
    pub exit: TradeLeg,
    /// Direction of the position.
    pub position: Position,
    /// Holding style.
    pub trade_type: TradeType,
    /// Market segment.
    pub segment: Segment,
    /// Execution venue.
    pub exchange: Exchange,
    /// Broker whose charge schedule applies.
    pub broker: Broker,
}

impl ClosedTrade {
    /// Quantity of the round trip (the entry leg's fill size).
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.entry.quantity
    }
}
