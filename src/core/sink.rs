//! Sink trait for log output destinations

use super::{error::Result, log_entry::Record};
use std::sync::Arc;

/// A terminal destination for records
///
/// Sinks are shared between the composite that delivers to them and the
/// logger that owns their configuration, so every method takes `&self` and
/// implementations serialize themselves internally.
pub trait Sink: Send + Sync {
    fn log(&self, record: &Record<'_>) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn set_pattern(&self, pattern: &str);
    fn name(&self) -> &str;
}

pub type SinkRef = Arc<dyn Sink>;

/// Identity comparison that ignores vtable pointers
pub fn same_sink(a: &SinkRef, b: &SinkRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
