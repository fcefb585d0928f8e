//! Price analysis over recorded history

use super::PriceObservation;
use crate::shared::utils::calculate_percentage_change;

/// Summary of a hotel's recorded price history
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub samples: usize,
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
    /// Change from the oldest to the newest observation, in percent
    pub net_change_percent: f64,
}

/// Analyzes observed price data and trends
pub struct PriceAnalyzer;

impl PriceAnalyzer {
    /// Summarize a history slice ordered newest-first, as the store returns it
    pub fn summarize(&self, history: &[PriceObservation]) -> Option<PriceSummary> {
        let newest = history.first()?;
        let oldest = history.last()?;

        let mut lowest = f64::MAX;
        let mut highest = f64::MIN;
        let mut total = 0.0;
        for observation in history {
            lowest = lowest.min(observation.price);
            highest = highest.max(observation.price);
            total += observation.price;
        }

        Some(PriceSummary {
            samples: history.len(),
            lowest,
            highest,
            average: total / history.len() as f64,
            net_change_percent: calculate_percentage_change(oldest.price, newest.price),
        })
    }

    pub fn is_significant_change(&self, change_percentage: f64, threshold: f64) -> bool {
        change_percentage.abs() >= threshold
    }
}
