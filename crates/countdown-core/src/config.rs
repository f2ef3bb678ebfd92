use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Tuning knobs for a [`TimerRegistry`](crate::TimerRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Longest single wait of a background task between two recomputations.
    pub tick: Duration,
    /// How long terminal timers are kept before eviction. `None` keeps them forever.
    pub retention: Option<Duration>,
    /// Period of the eviction task started by `spawn_reaper`.
    pub reap_interval: Duration,
}

impl RegistryConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = Some(retention);
        self
    }

    pub fn with_reap_interval(mut self, every: Duration) -> Self {
        self.reap_interval = every;
        self
    }

    /// Tick clamped away from zero so a runner never spins.
    pub(crate) fn effective_tick(&self) -> Duration {
        self.tick.max(MIN_PERIOD)
    }

    /// `tokio::time::interval` rejects a zero period.
    pub(crate) fn effective_reap_interval(&self) -> Duration {
        self.reap_interval.max(MIN_PERIOD)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            retention: None,
            reap_interval: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_timers_forever() {
        let cfg = RegistryConfig::default();
        assert_eq!(cfg.tick, Duration::from_secs(1));
        assert!(cfg.retention.is_none());
    }

    #[test]
    fn zero_periods_are_clamped() {
        let cfg = RegistryConfig::default()
            .with_tick(Duration::ZERO)
            .with_reap_interval(Duration::ZERO);
        assert_eq!(cfg.effective_tick(), MIN_PERIOD);
        assert_eq!(cfg.effective_reap_interval(), MIN_PERIOD);
    }
}
