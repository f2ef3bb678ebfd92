mod timer_id;
pub use timer_id::TimerId;

mod timer_status;
pub use timer_status::{ParseStatusError, TimerStatus};

mod timer_info;
pub use timer_info::TimerInfo;

mod timer_spec;
pub use timer_spec::TimerSpec;

mod timer_query;
pub use timer_query::{TimerPage, TimerQuery};

/// Whole seconds of countdown time.
pub type Seconds = u64;
