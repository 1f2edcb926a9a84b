//! Core logger types and traits

pub mod composite;
pub mod config;
pub mod error;
pub mod global;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod sink;

pub use composite::CompositeSink;
pub use config::{File, LoggerConfig};
pub use error::{LoggerError, Result};
pub use global::{
    create_default, destroy_default, get_default, install_default, try_default,
    DEFAULT_LOGGER_NAME,
};
pub use log_entry::{current_thread_id, Entry, Record};
pub use log_level::{BackendLevel, Level};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::{strip_line_ending, FormattedLine, PatternFormatter, DEFAULT_PATTERN, LINE_ENDING};
pub use sink::{same_sink, Sink, SinkRef};
