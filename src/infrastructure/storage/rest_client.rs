//! PostgREST-style tabular storage client

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::shared::errors::StorageError;
use crate::shared::types::StorageConfig;

/// Thin client over the managed tabular storage service.
///
/// Exposes the three operations the trackers need: filtered selects,
/// plain inserts, and conflict-ignoring inserts keyed by a unique index.
pub struct RestTableClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl RestTableClient {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Select rows with equality filters, optional ordering and a row limit
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        order: Option<(&str, bool)>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, StorageError> {
        let mut request = self
            .http_client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", self.auth_header())
            .query(&[("select", "*")]);

        for (column, value) in filters {
            request = request.query(&[(*column, eq_param(value))]);
        }
        if let Some((column, descending)) = order {
            request = request.query(&[("order", order_param(column, descending))]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StorageError::Service(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Insert a single row
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), StorageError> {
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", self.auth_header())
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Service(response.status().as_u16()));
        }

        Ok(())
    }

    /// Insert a row, silently dropping it when the unique index named by
    /// `on_conflict` already holds a matching row.
    ///
    /// Returns false when the duplicate was suppressed. The service resolves
    /// the conflict atomically, so concurrent duplicate submissions cannot
    /// both create a row.
    pub async fn insert_ignore_duplicates<T: Serialize>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &T,
    ) -> Result<bool, StorageError> {
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", self.auth_header())
            .header("Prefer", "resolution=ignore-duplicates,return=representation")
            .query(&[("on_conflict", on_conflict)])
            .json(row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Service(response.status().as_u16()));
        }

        // With return=representation the body is the array of rows actually
        // written: empty means the duplicate was dropped
        let body = response.text().await?;
        let written: Vec<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| StorageError::InvalidPayload(e.to_string()))?;

        Ok(!written.is_empty())
    }

    /// Check the storage service is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/rest/v1/", self.base_url);
        match self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.auth_header())
            .send()
            .await
        {
            Ok(response) => {
                let is_available = response.status().is_success();
                if is_available {
                    info!("Storage service is available");
                } else {
                    warn!("Storage service returned status: {}", response.status());
                }
                is_available
            }
            Err(e) => {
                warn!("Storage service is not available: {}", e);
                false
            }
        }
    }
}

fn eq_param(value: &str) -> String {
    format!("eq.{}", value)
}

fn order_param(column: &str, descending: bool) -> String {
    let direction = if descending { "desc" } else { "asc" };
    format!("{}.{}", column, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::TrackerConfig;

    #[test]
    fn test_query_param_rendering() {
        assert_eq!(eq_param("H1"), "eq.H1");
        assert_eq!(order_param("observed_at", true), "observed_at.desc");
        assert_eq!(order_param("price", false), "price.asc");
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let mut config = TrackerConfig::default().storage;
        config.base_url = "https://example.supabase.co/".to_string();

        let client = RestTableClient::new(&config).unwrap();
        assert_eq!(
            client.table_url("price_history"),
            "https://example.supabase.co/rest/v1/price_history"
        );
    }
}
