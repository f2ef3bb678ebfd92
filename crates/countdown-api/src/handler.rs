use async_trait::async_trait;
use countdown_model::{TimerId, TimerInfo, TimerPage, TimerQuery, TimerSpec};

use crate::error::ApiError;

/// Timer API handler.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided `RegistryAdapter`
/// - Implement custom handlers with additional logic (auth, quotas, etc.)
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Create a timer, optionally starting its countdown task right away.
    async fn create_timer(&self, spec: TimerSpec, autostart: bool) -> Result<TimerInfo, ApiError>;

    /// Start a created timer.
    async fn start_timer(&self, id: &TimerId) -> Result<TimerInfo, ApiError>;

    /// Current snapshot of a timer, `None` if unknown.
    async fn get_timer(&self, id: &TimerId) -> Result<Option<TimerInfo>, ApiError>;

    /// Request cancellation. `false` if the timer is unknown.
    async fn cancel_timer(&self, id: &TimerId) -> Result<bool, ApiError>;

    /// List timers with filters and pagination.
    async fn query_timers(&self, query: TimerQuery) -> Result<TimerPage<TimerInfo>, ApiError>;
}
