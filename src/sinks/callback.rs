//! Callback sink delivering [`Entry`] values to an in-process receiver

use crate::core::error::panic_message;
use crate::core::{Entry, Level, LoggerMetrics, PatternFormatter, Record, Result, Sink};
use parking_lot::{Mutex, RwLock};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Receiver installed on a logger
pub type Callback = Arc<dyn Fn(Entry) + Send + Sync>;

thread_local! {
    static IN_CALLBACK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as delivering to a receiver until dropped
struct ReentrancyGuard;

impl ReentrancyGuard {
    /// `None` if this thread is already inside a delivery
    fn try_enter() -> Option<Self> {
        IN_CALLBACK.with(|active| {
            if active.get() {
                None
            } else {
                active.set(true);
                Some(ReentrancyGuard)
            }
        })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        IN_CALLBACK.with(|active| active.set(false));
    }
}

/// Hands each record to a replaceable receiver
///
/// - a missing receiver drops the record silently
/// - a record produced while this thread is already inside any receiver is
///   dropped here, though other sinks still get it
/// - a panicking receiver is reported on stderr and never unwinds into the
///   logging call
pub struct CallbackSink {
    target: RwLock<Option<Callback>>,
    formatter: RwLock<PatternFormatter>,
    /// Serializes receiver invocations across threads
    delivery: Mutex<()>,
    metrics: Arc<LoggerMetrics>,
}

impl CallbackSink {
    pub fn new(target: Option<Callback>) -> Self {
        Self::with_metrics(target, Arc::new(LoggerMetrics::new()))
    }

    pub fn with_metrics(target: Option<Callback>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            target: RwLock::new(target),
            formatter: RwLock::new(PatternFormatter::default()),
            delivery: Mutex::new(()),
            metrics,
        }
    }

    /// Replace the receiver; `None` disables delivery
    pub fn set_callback(&self, target: Option<Callback>) {
        *self.target.write() = target;
    }

    pub fn has_callback(&self) -> bool {
        self.target.read().is_some()
    }

    fn entry_for(&self, record: &Record<'_>) -> Entry {
        let formatted_message = self.formatter.read().format_line(record);
        Entry {
            time: record.time,
            level: Level::from_backend(record.level),
            message: record.payload.to_string(),
            formatted_message,
        }
    }
}

impl Sink for CallbackSink {
    fn log(&self, record: &Record<'_>) -> Result<()> {
        let Some(_guard) = ReentrancyGuard::try_enter() else {
            self.metrics.record_reentrant_drop();
            return Ok(());
        };

        let Some(target) = self.target.read().clone() else {
            return Ok(());
        };

        let entry = self.entry_for(record);
        let _delivery = self.delivery.lock();

        if let Err(panic_info) = catch_unwind(AssertUnwindSafe(|| (*target)(entry))) {
            self.metrics.record_callback_panic();
            eprintln!(
                "[LOGGER ERROR] uncaught panic in logging callback: {}",
                panic_message(panic_info.as_ref())
            );
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn set_pattern(&self, pattern: &str) {
        *self.formatter.write() = PatternFormatter::new(pattern);
    }

    fn name(&self) -> &str {
        "callback"
    }
}
