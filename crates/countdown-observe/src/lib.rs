//! Logging bootstrap for countdown services.
//!
//! ```no_run
//! use countdown_observe::{LoggerConfig, LoggerFormat, logger_init};
//!
//! let cfg = LoggerConfig {
//!     format: LoggerFormat::Json,
//!     level: "countdown_core=debug,info".to_string(),
//!     ..Default::default()
//! };
//! logger_init(&cfg).expect("logger");
//! ```

mod logger;
pub use logger::*;
