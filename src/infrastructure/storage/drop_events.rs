//! Drop event persistence with storage-enforced deduplication

use std::sync::Arc;

use async_trait::async_trait;

use super::rest_client::RestTableClient;
use super::traits::DropEventStore;
use crate::domain::pricing::DropEvent;
use crate::shared::errors::StorageError;

/// Unique index columns backing the at-most-once guarantee
const CONFLICT_COLUMNS: &str = "hotel_id,previous_price,new_price";

/// REST-backed drop event store
pub struct RestDropEventStore {
    client: Arc<RestTableClient>,
    table: String,
}

impl RestDropEventStore {
    pub fn new(client: Arc<RestTableClient>, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl DropEventStore for RestDropEventStore {
    async fn insert(&self, event: &DropEvent) -> Result<bool, StorageError> {
        self.client
            .insert_ignore_duplicates(&self.table, CONFLICT_COLUMNS, event)
            .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<DropEvent>, StorageError> {
        self.client
            .select(&self.table, &[], Some(("created_at", true)), Some(limit))
            .await
    }
}
