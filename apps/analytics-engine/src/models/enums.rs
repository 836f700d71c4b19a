//! Closed category enumerations for trade classification.
//!
//! Every categorical axis (segment, trade type, position, exchange, broker)
//! is a closed enum rather than a free-form string, so an invalid category
//! is unrepresentable past the deserialization boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market segment of the traded instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    /// Cash equity.
    Equity,
    /// Index or stock futures.
    Futures,
    /// Index or stock options.
    Options,
    /// Commodity derivatives.
    Commodity,
}

impl Segment {
    /// All segments, in reporting order.
    pub const ALL: [Self; 4] = [Self::Equity, Self::Futures, Self::Options, Self::Commodity];

    /// Stable lowercase label used in breakdowns and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Futures => "futures",
            Self::Options => "options",
            Self::Commodity => "commodity",
        }
    }
}

/// Holding style of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// Opened and closed within the same session.
    Intraday,
    /// Carried past settlement (delivery). Older ledger rows spell this
    /// `DELIVERY`; both spellings map to the same variant.
    #[serde(alias = "DELIVERY", alias = "delivery")]
    Positional,
    /// Held for days to weeks on a technical setup.
    Swing,
}

impl TradeType {
    /// All trade types, in reporting order.
    pub const ALL: [Self; 3] = [Self::Intraday, Self::Positional, Self::Swing];

    /// Stable lowercase label used in breakdowns and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Positional => "positional",
            Self::Swing => "swing",
        }
    }
}

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    /// Profit when price rises.
    Long,
    /// Profit when price falls.
    Short,
}

impl Position {
    /// All positions, in reporting order.
    pub const ALL: [Self; 2] = [Self::Long, Self::Short];

    /// Direction sign: +1 for long, -1 for short.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Long => Decimal::ONE,
            Self::Short => Decimal::NEGATIVE_ONE,
        }
    }

    /// Stable lowercase label used in breakdowns and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// Exchange the trade was executed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exchange {
    /// National Stock Exchange.
    Nse,
    /// Bombay Stock Exchange.
    Bse,
    /// Multi Commodity Exchange.
    Mcx,
}

impl Exchange {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nse => "nse",
            Self::Bse => "bse",
            Self::Mcx => "mcx",
        }
    }
}

/// Broker the account is synced from.
///
/// Unknown broker strings deserialize to [`Broker::Other`], which resolves
/// to the default charge schedule rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Broker {
    /// Zerodha.
    Zerodha,
    /// Upstox.
    Upstox,
    /// Angel One.
    AngelOne,
    /// Any other broker; billed on the default schedule.
    #[serde(other)]
    Other,
}

impl Broker {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zerodha => "zerodha",
            Self::Upstox => "upstox",
            Self::AngelOne => "angel_one",
            Self::Other => "other",
        }
    }
}

/// Side of a single order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

/// Order type of a leg as reported by the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop-loss order.
    StopLoss,
}

/// Intraday session bucket, assigned by the upstream ledger in
/// exchange-local time when it folds trades into the daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionBucket {
    /// First half hour after the open.
    Opening,
    /// Open+30m until noon.
    Morning,
    /// Noon until the last half hour.
    Afternoon,
    /// Last half hour before the close.
    Closing,
}

impl SessionBucket {
    /// All session buckets, in chronological order.
    pub const ALL: [Self; 4] = [Self::Opening, Self::Morning, Self::Afternoon, Self::Closing];

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Closing => "closing",
        }
    }
}

/// Dimension a P&L breakdown query groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakdownDimension {
    /// Group by market segment.
    Segment,
    /// Group by trade type.
    TradeType,
    /// Group by position direction.
    Position,
    /// Group by weekday of the trading date.
    DayOfWeek,
    /// Group by intraday session bucket.
    TimeOfDay,
}

impl BreakdownDimension {
    /// Stable lowercase label used in cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::TradeType => "trade_type",
            Self::Position => "position",
            Self::DayOfWeek => "day_of_week",
            Self::TimeOfDay => "time_of_day",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_sign() {
        assert_eq!(Position::Long.sign(), Decimal::ONE);
        assert_eq!(Position::Short.sign(), Decimal::NEGATIVE_ONE);
    }

    #[test]
    fn test_trade_type_accepts_legacy_delivery() {
        let parsed: TradeType = serde_json::from_str("\"DELIVERY\"").unwrap();
        assert_eq!(parsed, TradeType::Positional);

        let parsed: TradeType = serde_json::from_str("\"POSITIONAL\"").unwrap();
        assert_eq!(parsed, TradeType::Positional);
    }

    #[test]
    fn test_unknown_broker_maps_to_other() {
        let parsed: Broker = serde_json::from_str("\"FINVASIA\"").unwrap();
        assert_eq!(parsed, Broker::Other);
    }

    #[test]
    fn test_enum_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&Segment::Equity).unwrap(),
            "\"EQUITY\""
        );
        assert_eq!(
            serde_json::to_string(&TradeType::Positional).unwrap(),
            "\"POSITIONAL\""
        );
    }
}
