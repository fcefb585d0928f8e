//! Pricing domain - observed prices and drop events

mod drop_detector;
mod price_analyzer;

pub use drop_detector::detect;
pub use price_analyzer::{PriceAnalyzer, PriceSummary};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::utils::generate_id;

/// A single recorded price sample for a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub hotel_id: String,
    pub price: f64,
    pub currency: String,
    pub source: String,
    pub observed_at: DateTime<Utc>,
}

/// Computed indication that a newly observed price is lower than the
/// previously recorded one. Lives in memory only; a persisted counterpart
/// is [`DropEvent`].
#[derive(Debug, Clone, PartialEq)]
pub struct DropSignal {
    pub hotel_id: String,
    pub previous_price: f64,
    pub new_price: f64,
    pub drop_percent: u32,
}

/// A durably persisted record of a confirmed price drop.
///
/// At most one event exists per (hotel_id, previous_price, new_price)
/// triple; uniqueness is enforced by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    pub id: String,
    pub hotel_id: String,
    pub previous_price: f64,
    pub new_price: f64,
    pub drop_percent: u32,
    pub created_at: DateTime<Utc>,
}

impl DropEvent {
    /// Build a persistable event from an in-memory signal
    pub fn from_signal(signal: &DropSignal) -> Self {
        Self {
            id: generate_id(),
            hotel_id: signal.hotel_id.clone(),
            previous_price: signal.previous_price,
            new_price: signal.new_price,
            drop_percent: signal.drop_percent,
            created_at: Utc::now(),
        }
    }
}
