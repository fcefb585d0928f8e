//! Durable recording of confirmed price drops

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::pricing::{DropEvent, DropSignal};
use crate::infrastructure::storage::DropEventStore;

/// Persists drop signals as durable events, at most once per
/// (hotel, previous price, new price) triple.
pub struct DropEventRecorder {
    events: Arc<dyn DropEventStore>,
}

impl DropEventRecorder {
    pub fn new(events: Arc<dyn DropEventStore>) -> Self {
        Self { events }
    }

    /// Record a signal as a durable drop event.
    ///
    /// Best-effort: storage failures are logged and swallowed, never
    /// propagated or retried. Duplicate triples are resolved by the storage
    /// layer's unique index, so replays of the same drop are no-ops.
    pub async fn record(&self, signal: &DropSignal) {
        if signal.hotel_id.is_empty() {
            return;
        }

        let event = DropEvent::from_signal(signal);
        match self.events.insert(&event).await {
            Ok(true) => debug!(
                "Recorded price drop for {}: {} -> {} (-{}%)",
                signal.hotel_id, signal.previous_price, signal.new_price, signal.drop_percent
            ),
            Ok(false) => debug!(
                "Duplicate drop event suppressed for {}: {} -> {}",
                signal.hotel_id, signal.previous_price, signal.new_price
            ),
            Err(e) => warn!("Failed to record drop event for {}: {}", signal.hotel_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryDropEvents;

    fn signal(hotel_id: &str) -> DropSignal {
        DropSignal {
            hotel_id: hotel_id.to_string(),
            previous_price: 200.0,
            new_price: 150.0,
            drop_percent: 25,
        }
    }

    #[tokio::test]
    async fn test_records_drop_event_once() {
        let events = Arc::new(MemoryDropEvents::new());
        let recorder = DropEventRecorder::new(events.clone());

        recorder.record(&signal("H1")).await;
        recorder.record(&signal("H1")).await;

        let stored = events.events().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].hotel_id, "H1");
        assert_eq!(stored[0].previous_price, 200.0);
        assert_eq!(stored[0].new_price, 150.0);
        assert_eq!(stored[0].drop_percent, 25);
    }

    #[tokio::test]
    async fn test_ignores_signal_without_hotel_id() {
        let events = Arc::new(MemoryDropEvents::new());
        let recorder = DropEventRecorder::new(events.clone());

        recorder.record(&signal("")).await;

        assert!(events.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_swallows_storage_failure() {
        let events = Arc::new(MemoryDropEvents::new());
        events.set_fail_writes(true);
        let recorder = DropEventRecorder::new(events.clone());

        // Must complete without panicking or surfacing the error
        recorder.record(&signal("H1")).await;

        events.set_fail_writes(false);
        assert!(events.events().await.is_empty());
    }
}
