use serde::{Deserialize, Serialize};

use crate::Seconds;

/// Creation parameters for a timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerSpec {
    /// Countdown length in (possibly fractional) minutes.
    pub minutes: f64,
}

impl TimerSpec {
    pub fn minutes(minutes: f64) -> Self {
        Self { minutes }
    }

    /// `floor(minutes * 60)`, with negative and NaN input clamped to zero.
    pub fn duration_seconds(&self) -> Seconds {
        // f64::max drops NaN; float-to-int `as` saturates.
        (self.minutes.max(0.0) * 60.0).floor() as Seconds
    }

    /// Whether the API layer should accept this spec (finite and strictly positive).
    pub fn is_valid(&self) -> bool {
        self.minutes.is_finite() && self.minutes > 0.0
    }
}
