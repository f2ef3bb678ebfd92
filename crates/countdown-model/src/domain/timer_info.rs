use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::{Seconds, TimerId, TimerStatus};

/// Point-in-time snapshot of a timer.
///
/// Owned copy; mutating it has no effect on the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerInfo {
    /// Unique timer identifier.
    pub id: TimerId,
    /// Current lifecycle state.
    pub status: TimerStatus,
    /// Total countdown length, fixed at creation.
    pub duration_seconds: Seconds,
    /// Seconds left as of the snapshot.
    pub remaining_seconds: Seconds,
    /// When the timer was created (the countdown starts here).
    #[serde(with = "time_serde")]
    pub started_at: SystemTime,
    /// When the countdown reached zero. Set iff `status == Finished`.
    #[serde(
        default,
        with = "time_serde::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<SystemTime>,
    /// A cancel has been requested but not necessarily observed yet.
    #[serde(default)]
    pub cancel_requested: bool,
}

/// Timestamps on the wire are fractional seconds since the UNIX epoch.
mod time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?;
        since_epoch.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        let since_epoch = Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)?;
        Ok(UNIX_EPOCH + since_epoch)
    }

    pub mod opt {
        use super::*;

        pub fn serialize<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<f64>::deserialize(deserializer)?
                .map(|secs| {
                    Duration::try_from_secs_f64(secs)
                        .map(|d| UNIX_EPOCH + d)
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}
