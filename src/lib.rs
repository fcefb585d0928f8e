//! Hotelwatch - hotel price tracking and drop detection
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::tracker::PriceTracker;
pub use application::recorder::DropEventRecorder;
pub use domain::pricing::{DropEvent, DropSignal, PriceObservation};
pub use infrastructure::storage::{DropEventStore, PriceHistoryStore};
