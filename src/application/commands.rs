//! CLI commands and handlers

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::recorder::DropEventRecorder;
use crate::application::tracker::PriceTracker;
use crate::domain::pricing::PriceAnalyzer;
use crate::infrastructure::storage::{
    RestDropEventStore, RestPriceHistoryStore, RestTableClient,
};
use crate::shared::errors::AppError;
use crate::shared::types::TrackerConfig;
use crate::shared::utils::format_price;

#[derive(Parser)]
#[command(name = "hotelwatch")]
#[command(about = "Hotel price tracking and drop detection")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a freshly observed price for a hotel
    Observe {
        /// Hotel identifier
        #[arg(long)]
        hotel: String,

        /// Observed price in the configured currency
        #[arg(long)]
        price: f64,
    },

    /// Show recorded price history for a hotel
    History {
        /// Hotel identifier
        #[arg(long)]
        hotel: String,

        /// Limit number of observations to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show recently recorded price drops across all hotels
    Drops {
        /// Limit number of events to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show tracker status and configuration
    Status,
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: TrackerConfig) -> Result<(), AppError> {
        let client = Arc::new(RestTableClient::new(&config.storage)?);
        let history = Arc::new(RestPriceHistoryStore::new(
            Arc::clone(&client),
            config.storage.history_table.clone(),
        ));
        let events = Arc::new(RestDropEventStore::new(
            Arc::clone(&client),
            config.storage.events_table.clone(),
        ));

        match command {
            Commands::Observe { hotel, price } => {
                Self::execute_observe_command(hotel, price, history, events, config).await
            }
            Commands::History { hotel, limit } => {
                Self::execute_history_command(hotel, limit, history, config).await
            }
            Commands::Drops { limit } => Self::execute_drops_command(limit, events, config).await,
            Commands::Status => Self::execute_status_command(client, config).await,
        }
    }

    /// Execute observe command
    async fn execute_observe_command(
        hotel: String,
        price: f64,
        history: Arc<RestPriceHistoryStore>,
        events: Arc<RestDropEventStore>,
        config: TrackerConfig,
    ) -> Result<(), AppError> {
        let recorder = Arc::new(DropEventRecorder::new(events));
        let tracker = PriceTracker::new(history, recorder, config.tracking.clone());

        info!(
            "👀 Observing {} at {}",
            hotel,
            format_price(price, &config.tracking.currency)
        );
        tracker.observe(&hotel, price).await;

        // Give the fire-and-forget recorder a moment before the process exits
        tokio::time::sleep(Duration::from_millis(250)).await;

        info!("✅ Observation processed");
        Ok(())
    }

    /// Execute history command
    async fn execute_history_command(
        hotel: String,
        limit: usize,
        history: Arc<RestPriceHistoryStore>,
        config: TrackerConfig,
    ) -> Result<(), AppError> {
        use crate::infrastructure::storage::PriceHistoryStore;

        let observations = history.recent(&hotel, limit).await?;
        if observations.is_empty() {
            info!("No recorded prices for {}", hotel);
            return Ok(());
        }

        info!("📈 Price history for {}:", hotel);
        for (i, observation) in observations.iter().enumerate() {
            info!(
                "   {}. {} at {} ({})",
                i + 1,
                format_price(observation.price, &observation.currency),
                observation.observed_at.format("%Y-%m-%d %H:%M:%S"),
                observation.source
            );
        }

        if let Some(summary) = PriceAnalyzer.summarize(&observations) {
            info!("   Samples: {}", summary.samples);
            info!(
                "   Lowest: {}",
                format_price(summary.lowest, &config.tracking.currency)
            );
            info!(
                "   Highest: {}",
                format_price(summary.highest, &config.tracking.currency)
            );
            info!(
                "   Average: {}",
                format_price(summary.average, &config.tracking.currency)
            );
            info!("   Net change: {:.2}%", summary.net_change_percent);
        }

        Ok(())
    }

    /// Execute drops command
    async fn execute_drops_command(
        limit: usize,
        events: Arc<RestDropEventStore>,
        config: TrackerConfig,
    ) -> Result<(), AppError> {
        use crate::infrastructure::storage::DropEventStore;

        let drops = events.recent(limit).await?;
        if drops.is_empty() {
            info!("No recorded price drops");
            return Ok(());
        }

        info!("📉 Recent price drops:");
        for (i, event) in drops.iter().enumerate() {
            info!(
                "   {}. {} {} -> {} (-{}%) at {}",
                i + 1,
                event.hotel_id,
                format_price(event.previous_price, &config.tracking.currency),
                format_price(event.new_price, &config.tracking.currency),
                event.drop_percent,
                event.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }

        Ok(())
    }

    /// Execute status command
    async fn execute_status_command(
        client: Arc<RestTableClient>,
        config: TrackerConfig,
    ) -> Result<(), AppError> {
        info!("📊 Tracker status:");
        info!("   Version: {}", env!("CARGO_PKG_VERSION"));
        info!("   Storage endpoint: {}", config.storage.base_url);
        info!("   History table: {}", config.storage.history_table);
        info!("   Events table: {}", config.storage.events_table);
        info!("   Currency: {}", config.tracking.currency);
        info!("   Price source: {}", config.tracking.source);

        if client.is_available().await {
            info!("   Storage: ✅ reachable");
        } else {
            info!("   Storage: ❌ unreachable");
        }

        Ok(())
    }
}
