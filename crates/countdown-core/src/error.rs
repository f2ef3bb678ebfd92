use countdown_model::{TimerId, TimerStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("timer not found: {0}")]
    NotFound(TimerId),

    #[error("timer {id} cannot be started from status {status}")]
    NotStartable { id: TimerId, status: TimerStatus },

    #[error("timer registry is shut down")]
    ShutDown,

    #[error("runtime error: {0}")]
    Runtime(String),
}
