//! Placeholder budget model: base rate per event type plus flat adjustments

use tracing::debug;

use crate::types::EventType;

/// Base rate used when an event type label is not recognised
pub const DEFAULT_BASE_RATE: u64 = 50_000;

/// Flat cost added when catering is required
pub const CATERING_COST: u64 = 20_000;

/// Cost added per hour of event duration
pub const HOURLY_COST: u64 = 1_000;

/// Base budget for an event type
pub fn base_rate(event_type: EventType) -> u64 {
    match event_type {
        EventType::Conference => 100_000,
        EventType::Concert => 200_000,
        EventType::Festival => 300_000,
        EventType::NetworkingEvent => 50_000,
        EventType::Exhibition => 150_000,
        EventType::Workshop => 40_000,
    }
}

/// Base budget for a raw event type label, with [`DEFAULT_BASE_RATE`] for
/// labels that name no known type
pub fn base_rate_for_label(label: &str) -> u64 {
    match EventType::from_label(label) {
        Some(event_type) => base_rate(event_type),
        None => {
            debug!(label, "unknown event type, using default base rate");
            DEFAULT_BASE_RATE
        }
    }
}

/// Predicted budget for an event
pub fn estimate(event_type: EventType, duration_hours: u32, catering_required: bool) -> u64 {
    with_adjustments(base_rate(event_type), duration_hours, catering_required)
}

/// Predicted budget for an event given its type as a free-form label
pub fn estimate_for_label(label: &str, duration_hours: u32, catering_required: bool) -> u64 {
    with_adjustments(base_rate_for_label(label), duration_hours, catering_required)
}

fn with_adjustments(base: u64, duration_hours: u32, catering_required: bool) -> u64 {
    let catering = if catering_required { CATERING_COST } else { 0 };
    base + catering + u64::from(duration_hours) * HOURLY_COST
}
