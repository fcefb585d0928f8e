//! Tabular storage service access for price history and drop events

pub mod traits;
pub mod rest_client;
pub mod price_history;
pub mod drop_events;
pub mod memory;

pub use traits::{DropEventStore, PriceHistoryStore};
pub use rest_client::RestTableClient;
pub use price_history::RestPriceHistoryStore;
pub use drop_events::RestDropEventStore;
pub use memory::{MemoryDropEvents, MemoryPriceHistory};
