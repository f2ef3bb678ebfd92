use countdown_core::MetricsBackend;
use countdown_model::TimerStatus;
use prometheus::{
    Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder, proto::MetricFamily,
};

/// [`MetricsBackend`] exporting timer lifecycle counters to Prometheus.
///
/// Clones share the same collectors.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    created: IntCounter,
    started: IntCounter,
    completed: IntCounterVec,
    active: IntGauge,
    evicted: IntCounter,
}

impl PrometheusMetrics {
    /// Create collectors in a fresh private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Register collectors in an existing registry.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let created = IntCounter::new(
            "countdown_timers_created_total",
            "Timers registered",
        )?;
        let started = IntCounter::new(
            "countdown_timers_started_total",
            "Timers whose background task was started",
        )?;
        let completed = IntCounterVec::new(
            Opts::new(
                "countdown_timers_completed_total",
                "Timers that reached a terminal state",
            ),
            &["outcome"],
        )?;
        let active = IntGauge::new(
            "countdown_timers_active",
            "Started timers not yet finished or cancelled",
        )?;
        let evicted = IntCounter::new(
            "countdown_timers_evicted_total",
            "Terminal timers dropped after the retention window",
        )?;

        registry.register(Box::new(created.clone()))?;
        registry.register(Box::new(started.clone()))?;
        registry.register(Box::new(completed.clone()))?;
        registry.register(Box::new(active.clone()))?;
        registry.register(Box::new(evicted.clone()))?;

        Ok(Self {
            registry,
            created,
            started,
            completed,
            active,
            evicted,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Current metrics in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn timer_created(&self) {
        self.created.inc();
    }

    fn timer_transition(&self, from: TimerStatus, to: TimerStatus) {
        if to == TimerStatus::Running {
            self.started.inc();
            self.active.inc();
            return;
        }
        if to.is_terminal() {
            self.completed.with_label_values(&[to.as_str()]).inc();
            if from == TimerStatus::Running {
                self.active.dec();
            }
        }
    }

    fn timers_evicted(&self, count: usize) {
        self.evicted.inc_by(count as u64);
    }
}
