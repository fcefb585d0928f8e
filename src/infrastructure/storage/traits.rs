use async_trait::async_trait;

use crate::domain::pricing::{DropEvent, PriceObservation};
use crate::shared::errors::StorageError;

/// Append-mostly ledger of observed hotel prices.
/// Absence of history is a normal outcome, not an error.
#[async_trait]
pub trait PriceHistoryStore: Send + Sync {
    /// Most recently observed price for a hotel, if any
    async fn latest(&self, hotel_id: &str) -> Result<Option<PriceObservation>, StorageError>;

    /// Recent observations for a hotel, newest first
    async fn recent(&self, hotel_id: &str, limit: usize)
        -> Result<Vec<PriceObservation>, StorageError>;

    /// Durably append a new observation. Always creates a new row; the store
    /// performs no deduplication of its own.
    async fn append(&self, observation: &PriceObservation) -> Result<(), StorageError>;
}

/// Durable ledger of confirmed price drops, deduplicated on the
/// (hotel_id, previous_price, new_price) triple.
#[async_trait]
pub trait DropEventStore: Send + Sync {
    /// Insert an event unless its triple already exists.
    /// Returns false when a duplicate was suppressed.
    async fn insert(&self, event: &DropEvent) -> Result<bool, StorageError>;

    /// Recent drop events across all hotels, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<DropEvent>, StorageError>;
}
