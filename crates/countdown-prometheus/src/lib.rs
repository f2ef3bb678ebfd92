//! Prometheus metrics backend for the countdown timer registry.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use countdown_core::TimerRegistry;
//! use countdown_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let registry = TimerRegistry::new().with_metrics(Arc::new(metrics.clone()));
//!
//! registry.create(5.0);
//! let text = metrics.encode_text()?;
//! assert!(text.contains("countdown_timers_created_total 1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `countdown_timers_created_total` - Counter
//! - `countdown_timers_started_total` - Counter
//! - `countdown_timers_completed_total{outcome}` - Counter (`finished` | `cancelled`)
//! - `countdown_timers_active` - Gauge (started, not yet terminal)
//! - `countdown_timers_evicted_total` - Counter
//!
//! This crate does not serve `/metrics`; mount [`PrometheusMetrics::encode_text`]
//! in whatever HTTP stack the application already runs.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
