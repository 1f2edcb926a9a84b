//! # Organizer Log
//!
//! Logging facility for a mod-management host and its plugins, plus the
//! interfaces plugins use to talk to the host.
//!
//! ## Features
//!
//! - **Fan-out**: every record goes to the console, an optional file and an
//!   optional in-process callback
//! - **File rotation**: by size with bounded archives, or daily at a set time
//! - **Safe callbacks**: receivers may log and may panic without disturbing
//!   the other sinks
//! - **Live reconfiguration**: level, pattern, file and callback can change
//!   while other threads log
//!
//! ## Example
//!
//! ```
//! use organizer_log::{create_default, get_default, File, Level};
//!
//! create_default(Level::Info, "[%l] %v").unwrap();
//! get_default().set_file(&File::none());
//! organizer_log::warn("profile changed\nreloading mod list");
//! ```

pub mod core;
pub mod host;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        create_default, get_default, try_default, BackendLevel, Entry, File, Level, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, PatternFormatter, Result, Sink,
        SinkRef, DEFAULT_PATTERN,
    };
    pub use crate::sinks::{Callback, CallbackSink, ConsoleSink, DailyFileSink, RotatingFileSink};
}

pub use crate::core::global::{debug, error, info, log, warn};
pub use crate::core::{
    create_default, destroy_default, get_default, install_default, try_default, BackendLevel,
    Entry, File, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    PatternFormatter, Result, DEFAULT_LOGGER_NAME, DEFAULT_PATTERN,
};
pub use sinks::{Callback, ConsoleSink};
