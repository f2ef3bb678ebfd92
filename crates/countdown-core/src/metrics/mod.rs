//! Metrics hooks called by the registry on every lifecycle change.
//!
//! The core only defines the seam; concrete backends (Prometheus, ...) live in
//! their own crates and are injected with [`TimerRegistry::with_metrics`](crate::TimerRegistry::with_metrics).

use std::sync::Arc;

use countdown_model::TimerStatus;

/// Backend receiving timer lifecycle notifications.
///
/// Hooks are invoked while the registry lock is held, so implementations must be
/// cheap and must not call back into the registry.
pub trait MetricsBackend: Send + Sync + 'static {
    /// A timer was registered.
    fn timer_created(&self);

    /// A timer moved from `from` to `to`.
    fn timer_transition(&self, from: TimerStatus, to: TimerStatus);

    /// Terminal timers were evicted past their retention window.
    fn timers_evicted(&self, count: usize);
}

pub type MetricsHandle = Arc<dyn MetricsBackend>;

/// Backend that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    #[inline]
    fn timer_created(&self) {}

    #[inline]
    fn timer_transition(&self, _from: TimerStatus, _to: TimerStatus) {}

    #[inline]
    fn timers_evicted(&self, _count: usize) {}
}

pub fn noop() -> MetricsHandle {
    Arc::new(NoopMetrics)
}
