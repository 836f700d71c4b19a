//! Data-driven brokerage and statutory levy schedules.
//!
//! All rates live in serde-loadable tables so a schedule revision is a
//! config change, not a code change. The shipped defaults reflect the
//! published NSE/BSE/MCX regime and discount-broker price cards as of
//! FY 2025-26.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Broker, Exchange, OrderSide, Segment, TradeType};

/// Which order sides a levy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevyApplies {
    /// Charged on both buy and sell.
    BothSides,
    /// Charged on the buy side only.
    BuyOnly,
    /// Charged on the sell side only.
    SellOnly,
}

/// A turnover-proportional levy with side applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevyRule {
    /// Fraction of turnover (0.001 = 0.1%).
    pub rate: Decimal,
    /// Sides the levy is charged on.
    pub applies: LevyApplies,
}

impl LevyRule {
    /// Levy amount for one side of the trade.
    #[must_use]
    pub fn amount(&self, side: OrderSide, turnover: Decimal) -> Decimal {
        let applies = match self.applies {
            LevyApplies::BothSides => true,
            LevyApplies::BuyOnly => side == OrderSide::Buy,
            LevyApplies::SellOnly => side == OrderSide::Sell,
        };
        if applies {
            turnover * self.rate
        } else {
            Decimal::ZERO
        }
    }
}

/// Brokerage pricing rule for one schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrokerageRule {
    /// No brokerage charged.
    Free,
    /// Flat amount per executed order.
    Flat {
        /// Amount per order.
        amount: Decimal,
    },
    /// Percentage of turnover, uncapped.
    Percent {
        /// Fraction of turnover.
        rate: Decimal,
    },
    /// Percentage of turnover capped at a per-order maximum.
    PercentCapped {
        /// Fraction of turnover.
        rate: Decimal,
        /// Per-order cap.
        cap: Decimal,
    },
}

impl BrokerageRule {
    /// Brokerage for one side given its turnover.
    #[must_use]
    pub fn amount(&self, turnover: Decimal) -> Decimal {
        match self {
            Self::Free => Decimal::ZERO,
            Self::Flat { amount } => *amount,
            Self::Percent { rate } => turnover * rate,
            Self::PercentCapped { rate, cap } => (turnover * rate).min(*cap),
        }
    }
}

/// Per-(segment, trade-type) charge row: brokerage plus the side-dependent
/// statutory levies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Brokerage rule.
    pub brokerage: BrokerageRule,
    /// Securities/commodities transaction tax.
    pub stt: LevyRule,
    /// Stamp duty (buy side under the 2020 uniform regime).
    pub stamp_duty: LevyRule,
}

/// Exchange transaction charges per (segment, exchange), as turnover
/// fractions. Venue fees, identical across brokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTxnTable {
    /// NSE cash equity.
    pub nse_equity: Decimal,
    /// BSE cash equity.
    pub bse_equity: Decimal,
    /// NSE futures.
    pub nse_futures: Decimal,
    /// BSE futures.
    pub bse_futures: Decimal,
    /// NSE options (on premium turnover).
    pub nse_options: Decimal,
    /// BSE options (on premium turnover).
    pub bse_options: Decimal,
    /// MCX commodity derivatives.
    pub mcx: Decimal,
}

impl Default for ExchangeTxnTable {
    fn default() -> Self {
        Self {
            nse_equity: Decimal::new(297, 7),   // 0.00297%
            bse_equity: Decimal::new(375, 7),   // 0.00375%
            nse_futures: Decimal::new(173, 7),  // 0.00173%
            bse_futures: Decimal::ZERO,         // waived
            nse_options: Decimal::new(3503, 7), // 0.03503%
            bse_options: Decimal::new(3250, 7), // 0.0325%
            mcx: Decimal::new(210, 7),          // 0.0021%
        }
    }
}

impl ExchangeTxnTable {
    /// Rate for a (segment, exchange) pair. Commodity rows route to the
    /// commodity exchange rate regardless of the equity venue field.
    #[must_use]
    pub fn rate(&self, segment: Segment, exchange: Exchange) -> Decimal {
        match (segment, exchange) {
            (Segment::Commodity, _) | (_, Exchange::Mcx) => self.mcx,
            (Segment::Equity, Exchange::Nse) => self.nse_equity,
            (Segment::Equity, Exchange::Bse) => self.bse_equity,
            (Segment::Futures, Exchange::Nse) => self.nse_futures,
            (Segment::Futures, Exchange::Bse) => self.bse_futures,
            (Segment::Options, Exchange::Nse) => self.nse_options,
            (Segment::Options, Exchange::Bse) => self.bse_options,
        }
    }
}

/// One broker's complete charge schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerSchedule {
    /// Equity delivery (positional/swing) row.
    pub equity_delivery: ScheduleRow,
    /// Equity intraday row.
    pub equity_intraday: ScheduleRow,
    /// Futures row.
    pub futures: ScheduleRow,
    /// Options row (rates apply to premium turnover).
    pub options: ScheduleRow,
    /// Commodity derivatives row (CTT in the stt slot).
    pub commodity: ScheduleRow,
    /// GST fraction applied to brokerage.
    pub gst_rate: Decimal,
    /// SEBI turnover charges fraction, both sides.
    pub sebi_rate: Decimal,
}

impl BrokerSchedule {
    /// Select the charge row for a (segment, trade-type) pair.
    ///
    /// Only equity differentiates intraday from delivery pricing;
    /// derivative rows are uniform across trade types.
    #[must_use]
    pub fn row(&self, segment: Segment, trade_type: TradeType) -> &ScheduleRow {
        match segment {
            Segment::Equity => match trade_type {
                TradeType::Intraday => &self.equity_intraday,
                TradeType::Positional | TradeType::Swing => &self.equity_delivery,
            },
            Segment::Futures => &self.futures,
            Segment::Options => &self.options,
            Segment::Commodity => &self.commodity,
        }
    }

    fn statutory_defaults(brokerage: [BrokerageRule; 5]) -> Self {
        let [delivery, intraday, futures, options, commodity] = brokerage;
        Self {
            equity_delivery: ScheduleRow {
                brokerage: delivery,
                stt: LevyRule {
                    rate: Decimal::new(1, 3), // 0.1%
                    applies: LevyApplies::BothSides,
                },
                stamp_duty: LevyRule {
                    rate: Decimal::new(15, 5), // 0.015%
                    applies: LevyApplies::BuyOnly,
                },
            },
            equity_intraday: ScheduleRow {
                brokerage: intraday,
                stt: LevyRule {
                    rate: Decimal::new(25, 5), // 0.025%
                    applies: LevyApplies::SellOnly,
                },
                stamp_duty: LevyRule {
                    rate: Decimal::new(3, 5), // 0.003%
                    applies: LevyApplies::BuyOnly,
                },
            },
            futures: ScheduleRow {
                brokerage: futures,
                stt: LevyRule {
                    rate: Decimal::new(125, 6), // 0.0125%
                    applies: LevyApplies::SellOnly,
                },
                stamp_duty: LevyRule {
                    rate: Decimal::new(2, 5), // 0.002%
                    applies: LevyApplies::BuyOnly,
                },
            },
            options: ScheduleRow {
                brokerage: options,
                stt: LevyRule {
                    rate: Decimal::new(1, 3), // 0.1% on premium
                    applies: LevyApplies::SellOnly,
                },
                stamp_duty: LevyRule {
                    rate: Decimal::new(3, 5), // 0.003%
                    applies: LevyApplies::BuyOnly,
                },
            },
            commodity: ScheduleRow {
                brokerage: commodity,
                stt: LevyRule {
                    rate: Decimal::new(1, 4), // CTT 0.01%
                    applies: LevyApplies::SellOnly,
                },
                stamp_duty: LevyRule {
                    rate: Decimal::new(2, 5), // 0.002%
                    applies: LevyApplies::BuyOnly,
                },
            },
            gst_rate: Decimal::new(18, 2),  // 18%
            sebi_rate: Decimal::new(1, 6),  // 0.0001%, Rs 10/crore
        }
    }

    /// Zerodha price card: free delivery, 0.03% capped at Rs 20 for
    /// intraday and derivatives, flat Rs 20 per options order.
    #[must_use]
    pub fn zerodha() -> Self {
        let capped = BrokerageRule::PercentCapped {
            rate: Decimal::new(3, 4),
            cap: Decimal::new(20, 0),
        };
        Self::statutory_defaults([
            BrokerageRule::Free,
            capped,
            capped,
            BrokerageRule::Flat {
                amount: Decimal::new(20, 0),
            },
            capped,
        ])
    }

    /// Upstox price card: 2.5% capped at Rs 20 for delivery, 0.05% capped
    /// at Rs 20 for intraday and futures, flat Rs 20 per options order.
    #[must_use]
    pub fn upstox() -> Self {
        let intraday = BrokerageRule::PercentCapped {
            rate: Decimal::new(5, 4),
            cap: Decimal::new(20, 0),
        };
        Self::statutory_defaults([
            BrokerageRule::PercentCapped {
                rate: Decimal::new(25, 3),
                cap: Decimal::new(20, 0),
            },
            intraday,
            intraday,
            BrokerageRule::Flat {
                amount: Decimal::new(20, 0),
            },
            intraday,
        ])
    }

    /// Angel One price card: free delivery, flat Rs 20 elsewhere.
    #[must_use]
    pub fn angel_one() -> Self {
        let flat = BrokerageRule::Flat {
            amount: Decimal::new(20, 0),
        };
        Self::statutory_defaults([BrokerageRule::Free, flat, flat, flat, flat])
    }

    /// Validate that every rate is a sane fraction.
    pub fn validate(&self) -> Result<(), String> {
        let rows = [
            &self.equity_delivery,
            &self.equity_intraday,
            &self.futures,
            &self.options,
            &self.commodity,
        ];
        for row in rows {
            for levy in [&row.stt, &row.stamp_duty] {
                if levy.rate < Decimal::ZERO || levy.rate > Decimal::ONE {
                    return Err(format!("levy rate {} out of [0, 1]", levy.rate));
                }
            }
        }
        if self.gst_rate < Decimal::ZERO || self.gst_rate > Decimal::ONE {
            return Err(format!("gst rate {} out of [0, 1]", self.gst_rate));
        }
        if self.sebi_rate < Decimal::ZERO || self.sebi_rate > Decimal::ONE {
            return Err(format!("sebi rate {} out of [0, 1]", self.sebi_rate));
        }
        Ok(())
    }
}

impl Default for BrokerSchedule {
    /// The fallback schedule for unrecognized brokers: the discount-broker
    /// card with free delivery.
    fn default() -> Self {
        Self::zerodha()
    }
}

/// The full broker-to-schedule table plus shared exchange fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargesSchedules {
    /// Zerodha schedule.
    pub zerodha: BrokerSchedule,
    /// Upstox schedule.
    pub upstox: BrokerSchedule,
    /// Angel One schedule.
    pub angel_one: BrokerSchedule,
    /// Fallback for any other broker.
    pub fallback: BrokerSchedule,
    /// Exchange transaction charge table.
    pub exchange_txn: ExchangeTxnTable,
}

impl Default for ChargesSchedules {
    fn default() -> Self {
        Self {
            zerodha: BrokerSchedule::zerodha(),
            upstox: BrokerSchedule::upstox(),
            angel_one: BrokerSchedule::angel_one(),
            fallback: BrokerSchedule::default(),
            exchange_txn: ExchangeTxnTable::default(),
        }
    }
}

impl ChargesSchedules {
    /// Resolve the schedule for a broker; unknown brokers get the fallback.
    #[must_use]
    pub fn resolve(&self, broker: Broker) -> &BrokerSchedule {
        match broker {
            Broker::Zerodha => &self.zerodha,
            Broker::Upstox => &self.upstox,
            Broker::AngelOne => &self.angel_one,
            Broker::Other => &self.fallback,
        }
    }

    /// Validate every schedule in the table.
    pub fn validate(&self) -> Result<(), String> {
        for (name, schedule) in [
            ("zerodha", &self.zerodha),
            ("upstox", &self.upstox),
            ("angel_one", &self.angel_one),
            ("fallback", &self.fallback),
        ] {
            schedule
                .validate()
                .map_err(|e| format!("{name}: {e}"))?;
        }
        Ok(())
    }
}
