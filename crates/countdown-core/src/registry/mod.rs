mod entry;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use countdown_model::{TimerId, TimerInfo, TimerPage, TimerQuery, TimerSpec, TimerStatus};
use tokio::{runtime::Handle, task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace};

use crate::{
    config::RegistryConfig,
    error::CoreError,
    metrics::{self, MetricsHandle},
    runner::{self, TimerHandle},
};
use entry::TimerEntry;

/// Owner of every timer record and spawner of their background tasks.
///
/// Cheap to clone; clones share the same records. All operations except the
/// background wait are short critical sections under one lock and never await.
#[derive(Clone)]
pub struct TimerRegistry {
    state: Arc<RwLock<RegistryState>>,
    config: RegistryConfig,
    metrics: MetricsHandle,
    shutdown: CancellationToken,
}

struct RegistryState {
    timers: HashMap<TimerId, TimerEntry>,
    next_seq: u64,
}

/// Outcome of one background tick.
pub(crate) enum Tick {
    /// Record no longer exists.
    Gone,
    /// Timer is terminal.
    Done(TimerStatus),
    /// Still counting; wait at most this long.
    Wait(Duration),
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                timers: HashMap::new(),
                next_seq: 0,
            })),
            config,
            metrics: metrics::noop(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Replace the metrics backend. Call before the registry is shared.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a new timer in `created` state. Negative input counts as zero.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, minutes: f64) -> TimerId {
        let mut state = self.write();
        let entry = self.insert(&mut state, minutes);
        let (id, duration) = (entry.id.clone(), entry.duration);
        drop(state);

        info!(timer = %id, duration_seconds = duration, "timer created");
        id
    }

    /// Register a timer and start it in one step.
    ///
    /// Nothing is registered when the registry is shut down or there is no runtime
    /// to spawn on, so a failed call never leaves a `created` record behind.
    #[instrument(level = "debug", skip(self))]
    pub fn create_started(&self, minutes: f64) -> Result<TimerHandle, CoreError> {
        if self.shutdown.is_cancelled() {
            return Err(CoreError::ShutDown);
        }
        let rt = Handle::try_current().map_err(|e| CoreError::Runtime(e.to_string()))?;

        let (id, duration, cancel) = {
            let mut state = self.write();
            let entry = self.insert(&mut state, minutes);
            entry.status = TimerStatus::Running;
            self.metrics
                .timer_transition(TimerStatus::Created, TimerStatus::Running);
            (entry.id.clone(), entry.duration, entry.cancel.clone())
        };

        let join = rt.spawn(runner::run(self.clone(), id.clone(), cancel));
        info!(timer = %id, duration_seconds = duration, "timer created and started");
        Ok(TimerHandle::new(id, join))
    }

    /// Move a `created` timer to `running` and spawn its background task.
    ///
    /// Any other status is rejected with [`CoreError::NotStartable`], so at most one
    /// task ever exists per timer. Must be called from within a tokio runtime.
    pub fn start(&self, id: &TimerId) -> Result<TimerHandle, CoreError> {
        if self.shutdown.is_cancelled() {
            return Err(CoreError::ShutDown);
        }
        let rt = Handle::try_current().map_err(|e| CoreError::Runtime(e.to_string()))?;

        let cancel = {
            let mut state = self.write();
            let entry = state
                .timers
                .get_mut(id)
                .ok_or_else(|| CoreError::NotFound(id.clone()))?;

            if entry.status != TimerStatus::Created {
                return Err(CoreError::NotStartable {
                    id: id.clone(),
                    status: entry.status,
                });
            }
            entry.status = TimerStatus::Running;
            self.metrics
                .timer_transition(TimerStatus::Created, TimerStatus::Running);
            entry.cancel.clone()
        };

        let join = rt.spawn(runner::run(self.clone(), id.clone(), cancel));
        info!(timer = %id, "timer started");
        Ok(TimerHandle::new(id.clone(), join))
    }

    /// Snapshot of a timer, finalizing it to `finished` first if it has expired.
    pub fn query(&self, id: &TimerId) -> Option<TimerInfo> {
        let now = Instant::now();
        let mut state = self.write();
        let entry = state.timers.get_mut(id)?;
        self.refresh(entry, now);
        Some(entry.snapshot())
    }

    /// Request cooperative cancellation.
    ///
    /// Returns `false` only for unknown ids. The status itself is switched to
    /// `cancelled` by the background task, never here.
    pub fn cancel(&self, id: &TimerId) -> bool {
        let mut state = self.write();
        let Some(entry) = state.timers.get_mut(id) else {
            return false;
        };

        if entry.status.is_terminal() {
            trace!(timer = %id, status = %entry.status, "cancel ignored for terminal timer");
            return true;
        }
        if !entry.cancel_requested {
            entry.cancel_requested = true;
            entry.cancel.cancel();
            info!(timer = %id, status = %entry.status, "timer cancel requested");
        }
        true
    }

    /// List timers in creation order, refreshing each before filtering.
    pub fn list(&self, q: &TimerQuery) -> TimerPage<TimerInfo> {
        let now = Instant::now();
        let mut state = self.write();

        let mut matched: Vec<&mut TimerEntry> = state
            .timers
            .values_mut()
            .filter_map(|entry| {
                self.refresh(entry, now);
                match q.status {
                    Some(status) if entry.status != status => None,
                    _ => Some(entry),
                }
            })
            .collect();
        matched.sort_by_key(|entry| entry.seq);

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(q.offset)
            .take(q.limit)
            .map(|entry| entry.snapshot())
            .collect();

        TimerPage { items, total }
    }

    pub fn len(&self) -> usize {
        self.read().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop terminal timers older than the retention window.
    ///
    /// Returns the number of evicted timers; always zero without retention.
    pub fn evict_terminal(&self) -> usize {
        let Some(retention) = self.config.retention else {
            return 0;
        };
        let now = Instant::now();
        let mut state = self.write();

        // Expired timers nobody queried are still `created`/`running` until refreshed.
        for entry in state.timers.values_mut() {
            self.refresh(entry, now);
        }
        let before = state.timers.len();
        state
            .timers
            .retain(|_, entry| !entry.is_evictable(now, retention));
        let evicted = before.saturating_sub(state.timers.len());
        drop(state);

        if evicted > 0 {
            self.metrics.timers_evicted(evicted);
            debug!(evicted, "terminal timers evicted");
        }
        evicted
    }

    /// Spawn the periodic eviction task. `Ok(None)` when no retention is configured.
    pub fn spawn_reaper(&self) -> Result<Option<JoinHandle<()>>, CoreError> {
        if self.config.retention.is_none() {
            return Ok(None);
        }
        let rt = Handle::try_current().map_err(|e| CoreError::Runtime(e.to_string()))?;
        let registry = self.clone();
        let every = self.config.effective_reap_interval();

        let join = rt.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        registry.evict_terminal();
                    }
                    _ = registry.shutdown.cancelled() => {
                        debug!("reaper stopped");
                        break;
                    }
                }
            }
        });
        Ok(Some(join))
    }

    /// Stop every background task and the reaper. Timer state is left as is.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            info!(timers = self.len(), "timer registry shutting down");
            self.shutdown.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// One iteration of the background algorithm for `id`.
    pub(crate) fn tick(&self, id: &TimerId) -> Tick {
        let now = Instant::now();
        let mut state = self.write();
        let Some(entry) = state.timers.get_mut(id) else {
            return Tick::Gone;
        };

        if entry.status.is_terminal() {
            return Tick::Done(entry.status);
        }
        if let Some(from) = entry.settle_cancel(now) {
            self.metrics.timer_transition(from, TimerStatus::Cancelled);
            info!(timer = %id, remaining_seconds = entry.remaining, "timer cancelled");
            return Tick::Done(TimerStatus::Cancelled);
        }
        if self.refresh(entry, now) {
            return Tick::Done(TimerStatus::Finished);
        }

        trace!(timer = %id, remaining_seconds = entry.remaining, "tick");
        Tick::Wait(entry.time_left(now).min(self.config.effective_tick()))
    }

    /// Shared finalize-if-expired step. Returns `true` if the timer just finished.
    fn refresh(&self, entry: &mut TimerEntry, now: Instant) -> bool {
        match entry.refresh(now) {
            Some(from) => {
                self.metrics.timer_transition(from, TimerStatus::Finished);
                if from == TimerStatus::Created {
                    debug!(timer = %entry.id, "unstarted timer finished on read");
                }
                info!(timer = %entry.id, duration_seconds = entry.duration, "timer finished");
                true
            }
            None => false,
        }
    }

    fn insert<'a>(&self, state: &'a mut RegistryState, minutes: f64) -> &'a mut TimerEntry {
        let duration = TimerSpec::minutes(minutes).duration_seconds();
        let id = TimerId::generate();
        let seq = state.next_seq;
        state.next_seq = seq.wrapping_add(1);
        self.metrics.timer_created();

        state
            .timers
            .entry(id.clone())
            .or_insert_with(|| TimerEntry::new(id, seq, duration, Instant::now()))
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
