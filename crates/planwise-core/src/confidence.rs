//! Confidence that a stated budget covers the predicted one
//!
//! The score interpolates linearly across a ±5% band around the prediction:
//! 0 at or below the lower edge, 100 at or above the upper edge.

use serde::{Deserialize, Serialize};

/// Lower band edge as a percentage of the predicted budget
pub const LOWER_BAND_PERCENT: u64 = 95;

/// Upper band edge as a percentage of the predicted budget
pub const UPPER_BAND_PERCENT: u64 = 105;

/// Score together with the band it was measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// 0..=100
    pub score: u8,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceAssessment {
    /// Band edges rounded down to whole rupees, for display
    pub fn display_range(&self) -> (u64, u64) {
        (self.lower.floor() as u64, self.upper.floor() as u64)
    }
}

/// Tolerance band `[0.95 × predicted, 1.05 × predicted]`
pub fn band(predicted_budget: u64) -> (f64, f64) {
    let p = predicted_budget as f64;
    (
        p * LOWER_BAND_PERCENT as f64 / 100.0,
        p * UPPER_BAND_PERCENT as f64 / 100.0,
    )
}

/// Confidence score in `0..=100`.
///
/// Evaluated in integers: `(user - 0.95p) / (0.1p) * 100` is
/// `(100·user - 95·p) · 10 / p`, so the result is exact and floored.
pub fn score(user_budget: u64, predicted_budget: u64) -> u8 {
    // Zero-width band: any non-negative budget covers it.
    if predicted_budget == 0 {
        return 100;
    }

    let user = u128::from(user_budget) * 100;
    let predicted = u128::from(predicted_budget);
    let lower = predicted * u128::from(LOWER_BAND_PERCENT);
    let upper = predicted * u128::from(UPPER_BAND_PERCENT);

    if user <= lower {
        0
    } else if user >= upper {
        100
    } else {
        ((user - lower) * 10 / predicted) as u8
    }
}

/// Score plus band, ready for display
pub fn assess(user_budget: u64, predicted_budget: u64) -> ConfidenceAssessment {
    let (lower, upper) = band(predicted_budget);
    ConfidenceAssessment {
        score: score(user_budget, predicted_budget),
        lower,
        upper,
    }
}
