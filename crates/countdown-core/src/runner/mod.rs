use countdown_model::{TimerId, TimerStatus};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    error::CoreError,
    registry::{Tick, TimerRegistry},
};

/// Handle to a timer's background task.
///
/// Dropping it detaches the task; the timer keeps counting.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    join: JoinHandle<Option<TimerStatus>>,
}

impl TimerHandle {
    pub(crate) fn new(id: TimerId, join: JoinHandle<Option<TimerStatus>>) -> Self {
        Self { id, join }
    }

    pub fn id(&self) -> &TimerId {
        &self.id
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the background task to exit.
    ///
    /// Resolves to the terminal status it observed, or `None` if the record was
    /// evicted or the registry shut down first.
    pub async fn wait(self) -> Result<Option<TimerStatus>, CoreError> {
        self.join
            .await
            .map_err(|e| CoreError::Runtime(e.to_string()))
    }
}

/// Background loop for one timer: tick, then wait for the tick interval, the
/// remaining time, a cancel request or registry shutdown, whichever comes first.
#[instrument(level = "debug", skip_all, fields(timer = %id))]
pub(crate) async fn run(
    registry: TimerRegistry,
    id: TimerId,
    cancel: CancellationToken,
) -> Option<TimerStatus> {
    let shutdown = registry.shutdown_token();

    loop {
        match registry.tick(&id) {
            Tick::Gone => {
                debug!("timer record gone, runner exiting");
                return None;
            }
            Tick::Done(status) => {
                debug!(%status, "runner done");
                return Some(status);
            }
            Tick::Wait(wait) => {
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = cancel.cancelled() => {}
                    _ = shutdown.cancelled() => {
                        debug!("registry shut down, runner exiting");
                        return None;
                    }
                }
            }
        }
    }
}
