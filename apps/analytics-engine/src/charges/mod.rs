//! Tax-aware charge and P&L computation for closed trades.
//!
//! - **Schedules**: brokerage rules and statutory levy rates as data,
//!   per broker and (segment, trade-type) row; unknown brokers fall back
//!   to a default schedule
//! - **Calculator**: pure round-trip computation — per-side breakdowns,
//!   gross/net P&L, break-even price, ROI
//! - **Precision**: full-precision decimal accumulation, 2-decimal
//!   rounding only at the output boundary

mod calculator;
mod schedule;

pub use calculator::{ChargesBreakdown, ChargesCalculator, PnLResult, round_money};
pub use schedule::{
    BrokerSchedule, BrokerageRule, ChargesSchedules, ExchangeTxnTable, LevyApplies, LevyRule,
    ScheduleRow,
};
