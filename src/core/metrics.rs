//! Logger metrics for observability
//!
//! Counters describing how records moved through the sink pipeline,
//! including failures that were absorbed rather than surfaced to callers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use organizer_log::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records handed to the composite sink
    total_logged: AtomicU64,

    /// Child sink deliveries or flushes that returned an error or panicked
    sink_failures: AtomicU64,

    /// Callback receivers that panicked
    callback_panics: AtomicU64,

    /// Records dropped from a callback sink because the thread was already
    /// inside a callback
    reentrant_drops: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            callback_panics: AtomicU64::new(0),
            reentrant_drops: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn callback_panics(&self) -> u64 {
        self.callback_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reentrant_drops(&self) -> u64 {
        self.reentrant_drops.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_callback_panic(&self) -> u64 {
        self.callback_panics.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reentrant_drop(&self) -> u64 {
        self.reentrant_drops.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of records that hit at least one failing sink (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been logged.
    pub fn failure_rate(&self) -> f64 {
        let total = self.total_logged();
        if total == 0 {
            return 0.0;
        }
        (self.sink_failures() as f64 / total as f64) * 100.0
    }

    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.callback_panics.store(0, Ordering::Relaxed);
        self.reentrant_drops.store(0, Ordering::Relaxed);
    }
}
