use std::time::{Duration, SystemTime};

use countdown_model::{Seconds, TimerId, TimerInfo, TimerStatus};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Mutable record owned by the registry.
///
/// Elapsed time is measured against `anchor` (monotonic); `started_at` and
/// `finished_at` are wall-clock values kept for reporting only.
pub(crate) struct TimerEntry {
    pub id: TimerId,
    /// Creation order, used for stable listing.
    pub seq: u64,
    pub status: TimerStatus,
    pub duration: Seconds,
    pub remaining: Seconds,
    pub started_at: SystemTime,
    pub finished_at: Option<SystemTime>,
    pub cancel_requested: bool,
    /// Wakes the background task as soon as a cancel is requested.
    pub cancel: CancellationToken,
    anchor: Instant,
    /// Monotonic time of the terminal transition, for retention.
    ended: Option<Instant>,
}

impl TimerEntry {
    pub fn new(id: TimerId, seq: u64, duration: Seconds, now: Instant) -> Self {
        Self {
            id,
            seq,
            status: TimerStatus::Created,
            duration,
            remaining: duration,
            started_at: SystemTime::now(),
            finished_at: None,
            cancel_requested: false,
            cancel: CancellationToken::new(),
            anchor: now,
            ended: None,
        }
    }

    /// Exact time until expiry, zero once expired.
    pub fn time_left(&self, now: Instant) -> Duration {
        Duration::from_secs(self.duration).saturating_sub(now.saturating_duration_since(self.anchor))
    }

    /// Recompute `remaining` for an active timer and finish it when it hits zero.
    ///
    /// Returns the previous status if this call performed the transition to `Finished`.
    /// Never transitions to `Cancelled`.
    pub fn refresh(&mut self, now: Instant) -> Option<TimerStatus> {
        if !self.status.is_active() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.anchor).as_secs();
        self.remaining = self.duration.saturating_sub(elapsed);

        if self.time_left(now).is_zero() {
            let from = self.status;
            self.remaining = 0;
            self.status = TimerStatus::Finished;
            self.finished_at = Some(SystemTime::now());
            self.ended = Some(now);
            return Some(from);
        }
        None
    }

    /// Observe a pending cancel request. Returns the previous status on transition.
    pub fn settle_cancel(&mut self, now: Instant) -> Option<TimerStatus> {
        if !self.cancel_requested || self.status.is_terminal() {
            return None;
        }
        let from = self.status;
        self.status = TimerStatus::Cancelled;
        self.ended = Some(now);
        Some(from)
    }

    /// Terminal and past the retention window.
    pub fn is_evictable(&self, now: Instant, retention: Duration) -> bool {
        self.status.is_terminal()
            && self
                .ended
                .is_some_and(|ended| now.saturating_duration_since(ended) >= retention)
    }

    pub fn snapshot(&self) -> TimerInfo {
        TimerInfo {
            id: self.id.clone(),
            status: self.status,
            duration_seconds: self.duration,
            remaining_seconds: self.remaining,
            started_at: self.started_at,
            finished_at: self.finished_at,
            cancel_requested: self.cancel_requested,
        }
    }
}
