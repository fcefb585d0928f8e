//! Application layer - use cases and services

pub mod commands;
pub mod recorder;
pub mod tracker;

pub use commands::{Cli, CommandExecutor, Commands};
pub use recorder::DropEventRecorder;
pub use tracker::PriceTracker;
