//! In-memory ledger for tests and local wiring.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{LedgerError, LedgerPort};
use crate::models::{DailyPnLRecord, DateRange, SymbolAggregate};

#[derive(Debug, Default)]
struct Store {
    daily: HashMap<String, Vec<DailyPnLRecord>>,
    symbols: HashMap<String, Vec<SymbolAggregate>>,
    period: HashMap<(String, String), DailyPnLRecord>,
}

/// Ledger implementation over in-process maps.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    store: RwLock<Store>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a daily record for a user.
    pub fn insert_daily(&self, user_id: &str, record: DailyPnLRecord) {
        if let Ok(mut store) = self.store.write() {
            store
                .daily
                .entry(user_id.to_string())
                .or_default()
                .push(record);
        }
    }

    /// Replace a user's symbol aggregates.
    pub fn set_symbol_aggregates(&self, user_id: &str, aggregates: Vec<SymbolAggregate>) {
        if let Ok(mut store) = self.store.write() {
            store.symbols.insert(user_id.to_string(), aggregates);
        }
    }

    /// Install a pre-aggregated record under a period key.
    pub fn insert_period_record(&self, user_id: &str, period_key: &str, record: DailyPnLRecord) {
        if let Ok(mut store) = self.store.write() {
            store
                .period
                .insert((user_id.to_string(), period_key.to_string()), record);
        }
    }
}

#[async_trait]
impl LedgerPort for InMemoryLedger {
    async fn fetch_daily_records(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<DailyPnLRecord>, LedgerError> {
        let store = self.store.read().map_err(|_| LedgerError::Unavailable {
            message: "store lock poisoned".to_string(),
        })?;

        let mut records: Vec<DailyPnLRecord> = store
            .daily
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|r| range.contains(r.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn fetch_symbol_aggregates(
        &self,
        user_id: &str,
    ) -> Result<Vec<SymbolAggregate>, LedgerError> {
        let store = self.store.read().map_err(|_| LedgerError::Unavailable {
            message: "store lock poisoned".to_string(),
        })?;
        Ok(store.symbols.get(user_id).cloned().unwrap_or_default())
    }

    async fn fetch_period_record(
        &self,
        user_id: &str,
        period_key: &str,
    ) -> Result<Option<DailyPnLRecord>, LedgerError> {
        let store = self.store.read().map_err(|_| LedgerError::Unavailable {
            message: "store lock poisoned".to_string(),
        })?;
        Ok(store
            .period
            .get(&(user_id.to_string(), period_key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[tokio::test]
    async fn test_range_filtering_and_ordering() {
        let ledger = InMemoryLedger::new();
        ledger.insert_daily("u-1", DailyPnLRecord::empty(date(20)));
        ledger.insert_daily("u-1", DailyPnLRecord::empty(date(5)));
        ledger.insert_daily("u-1", DailyPnLRecord::empty(date(12)));

        let range = DateRange::new(date(5), date(15)).unwrap();
        let records = ledger.fetch_daily_records("u-1", range).await.unwrap();

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(5), date(12)]);
    }

    #[tokio::test]
    async fn test_unknown_user_yields_empty() {
        let ledger = InMemoryLedger::new();
        let range = DateRange::new(date(1), date(31)).unwrap();

        assert!(ledger
            .fetch_daily_records("nobody", range)
            .await
            .unwrap()
            .is_empty());
        assert!(ledger
            .fetch_symbol_aggregates("nobody")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_period_fast_path() {
        let ledger = InMemoryLedger::new();
        assert!(ledger
            .fetch_period_record("u-1", "2026-07")
            .await
            .unwrap()
            .is_none());

        ledger.insert_period_record("u-1", "2026-07", DailyPnLRecord::empty(date(1)));
        assert!(ledger
            .fetch_period_record("u-1", "2026-07")
            .await
            .unwrap()
            .is_some());
    }
}
