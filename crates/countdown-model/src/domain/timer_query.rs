use super::TimerStatus;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Query parameters for listing timers with filtering and pagination.
#[derive(Debug, Clone)]
pub struct TimerQuery {
    pub status: Option<TimerStatus>,
    pub limit: usize,
    pub offset: usize,
}

/// Result of a paginated timer query.
#[derive(Debug, Clone)]
pub struct TimerPage<T> {
    pub items: Vec<T>,
    /// Matches after filtering, before pagination.
    pub total: usize,
}

impl TimerQuery {
    pub fn new() -> Self {
        Self {
            status: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_status(mut self, status: TimerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl Default for TimerQuery {
    fn default() -> Self {
        Self::new()
    }
}
