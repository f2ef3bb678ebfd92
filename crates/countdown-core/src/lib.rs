mod config;
pub use config::RegistryConfig;

mod error;
pub use error::CoreError;

pub mod metrics;
pub use metrics::{MetricsBackend, MetricsHandle, NoopMetrics};

mod registry;
pub use registry::TimerRegistry;

mod runner;
pub use runner::TimerHandle;
