//! Drop detection - pure comparison of consecutive observed prices

use super::DropSignal;

/// Compare a previous price against a newly observed one.
///
/// Produces a signal only for a strict decrease that rounds to at least one
/// whole percent. Missing, non-positive or non-finite inputs yield no signal
/// rather than an error; detection never fails.
pub fn detect(hotel_id: &str, previous_price: f64, new_price: f64) -> Option<DropSignal> {
    if hotel_id.is_empty() {
        return None;
    }
    if !previous_price.is_finite() || !new_price.is_finite() {
        return None;
    }
    if previous_price <= 0.0 || new_price <= 0.0 {
        return None;
    }
    if new_price >= previous_price {
        return None;
    }

    let drop_percent = ((previous_price - new_price) / previous_price * 100.0).round() as u32;
    if drop_percent == 0 {
        // Sub-half-percent wobble, not an alertable drop
        return None;
    }

    Some(DropSignal {
        hotel_id: hotel_id.to_string(),
        previous_price,
        new_price,
        drop_percent,
    })
}
