//! Composite sink fanning records out to child sinks

use super::{
    error::{panic_message, Result},
    log_entry::Record,
    metrics::LoggerMetrics,
    pattern::DEFAULT_PATTERN,
    sink::{same_sink, Sink, SinkRef},
};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

thread_local! {
    /// Composite deliveries in progress on this thread
    static DELIVERY_DEPTH: Cell<u32> = const { Cell::new(0) };
}

struct DeliveryDepth;

impl DeliveryDepth {
    fn enter() -> Self {
        DELIVERY_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DeliveryDepth
    }

    fn nested() -> bool {
        DELIVERY_DEPTH.with(|depth| depth.get() > 0)
    }
}

impl Drop for DeliveryDepth {
    fn drop(&mut self) {
        DELIVERY_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Delivers every record to an ordered list of children
///
/// Deliveries hold a read lock on the child list, so
/// [`add`](CompositeSink::add) and [`remove`](CompositeSink::remove) wait for
/// in-flight deliveries to finish. A delivery started from inside another one
/// on the same thread (a callback that logs) takes the lock recursively and
/// never queues behind a waiting writer.
///
/// **Per-sink isolation**: each child call is wrapped in `catch_unwind`; an
/// error or panic in one child is reported on stderr and the remaining
/// children still receive the record.
pub struct CompositeSink {
    sinks: RwLock<Vec<SinkRef>>,
    pattern: Mutex<String>,
    metrics: Arc<LoggerMetrics>,
}

impl CompositeSink {
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(LoggerMetrics::new()))
    }

    pub fn with_metrics(metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            sinks: RwLock::new(Vec::new()),
            pattern: Mutex::new(DEFAULT_PATTERN.to_string()),
            metrics,
        }
    }

    /// Append a child; it adopts the composite's current pattern
    pub fn add(&self, sink: SinkRef) {
        {
            let pattern = self.pattern.lock();
            sink.set_pattern(&pattern);
        }
        self.sinks.write().push(sink);
    }

    /// Remove a child by identity, returning whether it was present
    pub fn remove(&self, sink: &SinkRef) -> bool {
        let mut sinks = self.sinks.write();
        let before = sinks.len();
        sinks.retain(|s| !same_sink(s, sink));
        sinks.len() != before
    }

    fn children(&self) -> RwLockReadGuard<'_, Vec<SinkRef>> {
        if DeliveryDepth::nested() {
            self.sinks.read_recursive()
        } else {
            self.sinks.read()
        }
    }

    pub fn contains(&self, sink: &SinkRef) -> bool {
        self.children().iter().any(|s| same_sink(s, sink))
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the children, in delivery order
    pub fn sink_names(&self) -> Vec<String> {
        self.children()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    pub fn pattern(&self) -> String {
        self.pattern.lock().clone()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn report_failure(&self, sink: &SinkRef, action: &str, outcome: std::thread::Result<Result<()>>) {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_sink_failure();
                eprintln!("[LOGGER ERROR] Sink '{}' {} failed: {}", sink.name(), action, e);
            }
            Err(panic_info) => {
                self.metrics.record_sink_failure();
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked during {}: {}. \
                     Other sinks continue to function.",
                    sink.name(),
                    action,
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}

impl Default for CompositeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for CompositeSink {
    fn log(&self, record: &Record<'_>) -> Result<()> {
        let sinks = self.children();
        let _depth = DeliveryDepth::enter();
        for sink in sinks.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.log(record)));
            self.report_failure(sink, "delivery", outcome);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let sinks = self.children();
        let _depth = DeliveryDepth::enter();
        for sink in sinks.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.flush()));
            self.report_failure(sink, "flush", outcome);
        }
        Ok(())
    }

    fn set_pattern(&self, pattern: &str) {
        let mut current = self.pattern.lock();
        *current = pattern.to_string();
        for sink in self.children().iter() {
            sink.set_pattern(pattern);
        }
    }

    fn name(&self) -> &str {
        "composite"
    }
}
