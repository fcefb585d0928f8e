//! In-memory store implementations
//!
//! Back the production traits with plain vectors for tests and local runs.
//! [`MemoryDropEvents`] enforces the same triple uniqueness the production
//! index does, so idempotence can be exercised without a storage service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{DropEventStore, PriceHistoryStore};
use crate::domain::pricing::{DropEvent, PriceObservation};
use crate::shared::errors::StorageError;

/// In-memory price history ledger
#[derive(Default)]
pub struct MemoryPriceHistory {
    rows: Arc<RwLock<Vec<PriceObservation>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryPriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent reads fail with a service error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with a service error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored observation, in append order
    pub async fn observations(&self) -> Vec<PriceObservation> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl PriceHistoryStore for MemoryPriceHistory {
    async fn latest(&self, hotel_id: &str) -> Result<Option<PriceObservation>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Service(500));
        }

        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.hotel_id == hotel_id)
            .max_by_key(|row| row.observed_at)
            .cloned())
    }

    async fn recent(
        &self,
        hotel_id: &str,
        limit: usize,
    ) -> Result<Vec<PriceObservation>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Service(500));
        }

        let rows = self.rows.read().await;
        let mut matching: Vec<PriceObservation> = rows
            .iter()
            .filter(|row| row.hotel_id == hotel_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn append(&self, observation: &PriceObservation) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Service(500));
        }

        self.rows.write().await.push(observation.clone());
        Ok(())
    }
}

/// In-memory drop event ledger with triple uniqueness
#[derive(Default)]
pub struct MemoryDropEvents {
    rows: Arc<RwLock<Vec<DropEvent>>>,
    fail_writes: AtomicBool,
}

impl MemoryDropEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with a service error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored event, in insert order
    pub async fn events(&self) -> Vec<DropEvent> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl DropEventStore for MemoryDropEvents {
    async fn insert(&self, event: &DropEvent) -> Result<bool, StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Service(500));
        }

        let mut rows = self.rows.write().await;
        let duplicate = rows.iter().any(|row| {
            row.hotel_id == event.hotel_id
                && row.previous_price == event.previous_price
                && row.new_price == event.new_price
        });
        if duplicate {
            return Ok(false);
        }

        rows.push(event.clone());
        Ok(true)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<DropEvent>, StorageError> {
        let rows = self.rows.read().await;
        let mut events: Vec<DropEvent> = rows.clone();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn observation(hotel_id: &str, price: f64, age_secs: i64) -> PriceObservation {
        PriceObservation {
            hotel_id: hotel_id.to_string(),
            price,
            currency: "USD".to_string(),
            source: "liteapi".to_string(),
            observed_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn test_latest_returns_newest_for_hotel() {
        let store = MemoryPriceHistory::new();
        store.append(&observation("H1", 200.0, 60)).await.unwrap();
        store.append(&observation("H2", 90.0, 30)).await.unwrap();
        store.append(&observation("H1", 150.0, 0)).await.unwrap();

        let latest = store.latest("H1").await.unwrap().unwrap();
        assert_eq!(latest.price, 150.0);

        assert!(store.latest("H3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first_and_limits() {
        let store = MemoryPriceHistory::new();
        store.append(&observation("H1", 200.0, 120)).await.unwrap();
        store.append(&observation("H1", 180.0, 60)).await.unwrap();
        store.append(&observation("H1", 150.0, 0)).await.unwrap();

        let recent = store.recent("H1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].price, 150.0);
        assert_eq!(recent[1].price, 180.0);
    }

    fn drop_event(hotel_id: &str, previous: f64, new: f64, age_secs: i64) -> DropEvent {
        DropEvent {
            id: crate::shared::utils::generate_id(),
            hotel_id: hotel_id.to_string(),
            previous_price: previous,
            new_price: new,
            drop_percent: 25,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn test_drop_events_dedup_and_recent_ordering() {
        let store = MemoryDropEvents::new();

        assert!(store.insert(&drop_event("H1", 200.0, 150.0, 60)).await.unwrap());
        // Same triple again, fresh id: suppressed
        assert!(!store.insert(&drop_event("H1", 200.0, 150.0, 0)).await.unwrap());
        assert!(store.insert(&drop_event("H2", 120.0, 90.0, 30)).await.unwrap());

        let recent = store.recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].hotel_id, "H2");
        assert_eq!(recent[1].hotel_id, "H1");
    }
}
