//! Sink implementations

pub mod callback;
pub mod console;
pub mod daily_file;
pub mod file;
pub mod rotating_file;

pub use callback::{Callback, CallbackSink};
pub use console::ConsoleSink;
pub use daily_file::DailyFileSink;
pub use file::{create_file_sink, try_create_file_sink};
pub use rotating_file::RotatingFileSink;

pub use crate::core::{Sink, SinkRef};
