//! Price history persistence over the tabular storage service

use std::sync::Arc;

use async_trait::async_trait;

use super::rest_client::RestTableClient;
use super::traits::PriceHistoryStore;
use crate::domain::pricing::PriceObservation;
use crate::shared::errors::StorageError;

/// REST-backed price history store
pub struct RestPriceHistoryStore {
    client: Arc<RestTableClient>,
    table: String,
}

impl RestPriceHistoryStore {
    pub fn new(client: Arc<RestTableClient>, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl PriceHistoryStore for RestPriceHistoryStore {
    async fn latest(&self, hotel_id: &str) -> Result<Option<PriceObservation>, StorageError> {
        let rows: Vec<PriceObservation> = self
            .client
            .select(
                &self.table,
                &[("hotel_id", hotel_id)],
                Some(("observed_at", true)),
                Some(1),
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn recent(
        &self,
        hotel_id: &str,
        limit: usize,
    ) -> Result<Vec<PriceObservation>, StorageError> {
        self.client
            .select(
                &self.table,
                &[("hotel_id", hotel_id)],
                Some(("observed_at", true)),
                Some(limit),
            )
            .await
    }

    async fn append(&self, observation: &PriceObservation) -> Result<(), StorageError> {
        self.client.insert(&self.table, observation).await
    }
}
