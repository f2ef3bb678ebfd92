use async_trait::async_trait;
use countdown_core::TimerRegistry;
use countdown_model::{TimerId, TimerInfo, TimerPage, TimerQuery, TimerSpec};
use tracing::debug;

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges `TimerRegistry` to `ApiHandler`.
///
/// Owns input validation: the registry accepts any duration and clamps it, while
/// this layer rejects non-positive or non-finite minutes.
#[derive(Clone)]
pub struct RegistryAdapter {
    registry: TimerRegistry,
}

impl RegistryAdapter {
    pub fn new(registry: TimerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    fn snapshot(&self, id: &TimerId) -> Result<TimerInfo, ApiError> {
        self.registry
            .query(id)
            .ok_or_else(|| ApiError::TimerNotFound(id.to_string()))
    }
}

#[async_trait]
impl ApiHandler for RegistryAdapter {
    async fn create_timer(&self, spec: TimerSpec, autostart: bool) -> Result<TimerInfo, ApiError> {
        if !spec.is_valid() {
            return Err(ApiError::InvalidRequest(format!(
                "minutes must be a finite number > 0, got {}",
                spec.minutes
            )));
        }

        let id = if autostart {
            // The handle is not needed; the task runs detached.
            self.registry.create_started(spec.minutes)?.id().clone()
        } else {
            self.registry.create(spec.minutes)
        };
        debug!(timer = %id, autostart, "timer created via api");
        self.snapshot(&id)
    }

    async fn start_timer(&self, id: &TimerId) -> Result<TimerInfo, ApiError> {
        self.registry.start(id)?;
        self.snapshot(id)
    }

    async fn get_timer(&self, id: &TimerId) -> Result<Option<TimerInfo>, ApiError> {
        Ok(self.registry.query(id))
    }

    async fn cancel_timer(&self, id: &TimerId) -> Result<bool, ApiError> {
        Ok(self.registry.cancel(id))
    }

    async fn query_timers(&self, query: TimerQuery) -> Result<TimerPage<TimerInfo>, ApiError> {
        Ok(self.registry.list(&query))
    }
}
