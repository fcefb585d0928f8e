//! Price observation coordination

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::application::recorder::DropEventRecorder;
use crate::domain::pricing::{self, PriceObservation};
use crate::infrastructure::storage::PriceHistoryStore;
use crate::shared::types::TrackingConfig;

/// Coordinates history reads, drop detection and event recording for every
/// price rendered to a user.
pub struct PriceTracker {
    history: Arc<dyn PriceHistoryStore>,
    recorder: Arc<DropEventRecorder>,
    config: TrackingConfig,
}

impl PriceTracker {
    pub fn new(
        history: Arc<dyn PriceHistoryStore>,
        recorder: Arc<DropEventRecorder>,
        config: TrackingConfig,
    ) -> Self {
        Self {
            history,
            recorder,
            config,
        }
    }

    /// Record a freshly observed price for a hotel.
    ///
    /// Triggered as a side effect of rendering a price, not a user-facing
    /// operation: it never returns an error and never blocks on event
    /// recording. Identical consecutive prices are suppressed to keep the
    /// history free of redundant samples.
    pub async fn observe(&self, hotel_id: &str, price: f64) {
        if hotel_id.is_empty() || !price.is_finite() || price <= 0.0 {
            return;
        }

        let latest = match self.history.latest(hotel_id).await {
            Ok(latest) => latest,
            Err(e) => {
                warn!("Skipping observation for {}: history read failed: {}", hotel_id, e);
                return;
            }
        };

        if let Some(previous) = &latest {
            if previous.price == price {
                debug!("Price for {} unchanged at {}, skipping", hotel_id, price);
                return;
            }

            if let Some(signal) = pricing::detect(hotel_id, previous.price, price) {
                // Recorder latency and failures must not affect this call;
                // the task logs its own outcome
                let recorder = Arc::clone(&self.recorder);
                tokio::spawn(async move {
                    recorder.record(&signal).await;
                });
            }
        }

        let observation = PriceObservation {
            hotel_id: hotel_id.to_string(),
            price,
            currency: self.config.currency.clone(),
            source: self.config.source.clone(),
            observed_at: Utc::now(),
        };

        if let Err(e) = self.history.append(&observation).await {
            warn!("Failed to append observation for {}: {}", hotel_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{MemoryDropEvents, MemoryPriceHistory};
    use std::time::Duration;

    fn tracker(
        history: &Arc<MemoryPriceHistory>,
        events: &Arc<MemoryDropEvents>,
    ) -> PriceTracker {
        let history_store: Arc<dyn PriceHistoryStore> = history.clone();
        let recorder = Arc::new(DropEventRecorder::new(events.clone()));
        PriceTracker::new(
            history_store,
            recorder,
            TrackingConfig {
                currency: "USD".to_string(),
                source: "liteapi".to_string(),
            },
        )
    }

    /// Let spawned recorder tasks run to completion
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_first_observation_appends_without_event() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("H1", 200.0).await;
        settle().await;

        let observations = history.observations().await;
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].price, 200.0);
        assert_eq!(observations[0].currency, "USD");
        assert_eq!(observations[0].source, "liteapi");
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_price_drop_records_event_and_appends() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("H1", 200.0).await;
        tracker.observe("H1", 150.0).await;
        settle().await;

        let observations = history.observations().await;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].price, 150.0);

        let stored = events.events().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].previous_price, 200.0);
        assert_eq!(stored[0].new_price, 150.0);
        assert_eq!(stored[0].drop_percent, 25);
    }

    #[tokio::test]
    async fn test_unchanged_price_is_suppressed() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("H1", 150.0).await;
        tracker.observe("H1", 150.0).await;
        settle().await;

        assert_eq!(history.observations().await.len(), 1);
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_price_increase_appends_without_event() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("H1", 150.0).await;
        tracker.observe("H1", 180.0).await;
        settle().await;

        let observations = history.observations().await;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].price, 180.0);
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_drop_pair_stays_single_event() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("H1", 200.0).await;
        tracker.observe("H1", 150.0).await;
        settle().await;
        // Latest is now 150; replaying the same price is a no-op
        tracker.observe("H1", 150.0).await;
        settle().await;

        assert_eq!(history.observations().await.len(), 2);
        assert_eq!(events.events().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_is_a_noop() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        tracker.observe("", 100.0).await;
        tracker.observe("H1", 0.0).await;
        tracker.observe("H1", -10.0).await;
        tracker.observe("H1", f64::NAN).await;
        settle().await;

        assert!(history.observations().await.is_empty());
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_history_read_failure_aborts_silently() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        history.set_fail_reads(true);
        tracker.observe("H1", 200.0).await;
        settle().await;

        history.set_fail_reads(false);
        assert!(history.observations().await.is_empty());
        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_failure_is_swallowed() {
        let history = Arc::new(MemoryPriceHistory::new());
        let events = Arc::new(MemoryDropEvents::new());
        let tracker = tracker(&history, &events);

        history.set_fail_writes(true);
        // Must complete without panicking
        tracker.observe("H1", 200.0).await;
        settle().await;

        history.set_fail_writes(false);
        assert!(history.observations().await.is_empty());
    }
}
