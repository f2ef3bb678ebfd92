use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a timer.
///
/// `Created -> Running -> Finished | Cancelled`. A created timer may also be
/// finalized to `Finished` directly by a query once its duration has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Registered, no background task yet.
    Created,
    /// Background task is counting down.
    Running,
    /// Countdown reached zero.
    Finished,
    /// Background task observed a cancel request.
    Cancelled,
}

impl TimerStatus {
    /// Returns `true` if no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerStatus::Finished | TimerStatus::Cancelled)
    }

    /// Returns `true` if the timer is still counting (created or running).
    pub fn is_active(&self) -> bool {
        matches!(self, TimerStatus::Created | TimerStatus::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Created => "created",
            TimerStatus::Running => "running",
            TimerStatus::Finished => "finished",
            TimerStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status: '{0}' (valid: created, running, finished, cancelled)")]
pub struct ParseStatusError(pub String);

impl FromStr for TimerStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(TimerStatus::Created),
            "running" => Ok(TimerStatus::Running),
            "finished" => Ok(TimerStatus::Finished),
            "cancelled" | "canceled" => Ok(TimerStatus::Cancelled),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
