//! Main logger implementation

use super::{
    composite::CompositeSink,
    config::{File, LoggerConfig},
    error::{LoggerError, Result},
    log_entry::Record,
    log_level::{BackendLevel, Level},
    metrics::LoggerMetrics,
    pattern::DEFAULT_PATTERN,
    sink::{Sink, SinkRef},
};
use crate::sinks::{create_file_sink, Callback, CallbackSink, ConsoleSink};
use colored::Color;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// A named logger fanning records out to a console sink, an optional file
/// sink and an optional callback sink
///
/// Every configuration method takes `&self`, so a logger can be shared
/// behind an `Arc` and reconfigured while other threads log through it.
///
/// # Example
///
/// ```
/// use organizer_log::{File, Level, Logger};
///
/// let logger = Logger::new("plugins", Level::Info, "[%l] %v").unwrap();
/// logger.set_file(&File::none());
/// logger.warn("disk space low\nfreeing caches");
/// assert_eq!(logger.sink_count(), 1);
/// ```
pub struct Logger {
    name: String,
    level: AtomicU8,
    sinks: CompositeSink,
    console: Arc<ConsoleSink>,
    file: Mutex<Option<SinkRef>>,
    callback: Mutex<Option<Arc<CallbackSink>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger writing to standard error
    ///
    /// # Errors
    ///
    /// Returns error if `name` is empty
    pub fn new(name: impl Into<String>, level: Level, pattern: impl Into<String>) -> Result<Self> {
        Self::with_console(name.into(), level, pattern.into(), ConsoleSink::stderr())
    }

    fn with_console(name: String, level: Level, pattern: String, console: ConsoleSink) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(LoggerError::config("Logger", "name must not be empty"));
        }

        // Keep routine output neutral; warnings and errors keep their emphasis
        console.set_color(BackendLevel::Debug, Some(Color::White));
        console.set_color(BackendLevel::Info, Some(Color::White));

        let metrics = Arc::new(LoggerMetrics::new());
        let sinks = CompositeSink::with_metrics(Arc::clone(&metrics));
        sinks.set_pattern(&pattern);

        let console = Arc::new(console);
        sinks.add(console.clone());

        Ok(Self {
            name,
            level: AtomicU8::new(level.to_backend() as u8),
            sinks,
            console,
            file: Mutex::new(None),
            callback: Mutex::new(None),
            metrics,
        })
    }

    /// Build a logger from a serializable description
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Logger::builder(config.name.clone())
            .level(config.level)
            .pattern(config.pattern.clone())
            .file(config.file.clone())
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        Level::from_backend(self.backend_level())
    }

    /// Records below `level` are dropped before reaching any sink
    pub fn set_level(&self, level: Level) {
        self.level.store(level.to_backend() as u8, Ordering::Relaxed);
    }

    fn backend_level(&self) -> BackendLevel {
        BackendLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn should_log(&self, level: Level) -> bool {
        level.to_backend() >= self.backend_level()
    }

    pub fn pattern(&self) -> String {
        self.sinks.pattern()
    }

    /// Change the pattern used by every sink, including ones added later
    pub fn set_pattern(&self, pattern: impl AsRef<str>) {
        self.sinks.set_pattern(pattern.as_ref());
    }

    /// Replace the file sink
    ///
    /// The previous file sink is removed and closed first. If the new sink
    /// cannot be created, a diagnostic goes to stderr and the logger carries
    /// on without a file sink.
    pub fn set_file(&self, file: &File) {
        let mut current = self.file.lock();

        if let Some(old) = current.take() {
            self.sinks.remove(&old);
        }

        if let Some(sink) = create_file_sink(file) {
            self.sinks.add(Arc::clone(&sink));
            *current = Some(sink);
        }
    }

    /// Install or replace the receiver of [`Entry`](super::Entry) values
    ///
    /// The callback sink is created on first use and reused afterwards;
    /// `None` leaves it in place with nothing to deliver to.
    ///
    /// Receivers may log, but records they produce are not delivered back to
    /// any callback sink. They must not call [`set_file`](Self::set_file) or
    /// install the first callback on a logger that is delivering to them.
    pub fn set_callback(&self, callback: Option<Callback>) {
        let mut current = self.callback.lock();

        match current.as_ref() {
            Some(sink) => sink.set_callback(callback),
            None => {
                let sink = Arc::new(CallbackSink::with_metrics(
                    callback,
                    Arc::clone(&self.metrics),
                ));
                self.sinks.add(sink.clone());
                *current = Some(sink);
            }
        }
    }

    /// Log `message` at `level`, one record per line
    ///
    /// The message is split on `\n`; every segment, including empty ones, is
    /// logged separately, so a message with `k` newlines yields `k + 1`
    /// records.
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if !self.should_log(level) {
            return;
        }

        let level = level.to_backend();
        for line in message.as_ref().split('\n') {
            self.log_record(level, line);
        }
    }

    fn log_record(&self, level: BackendLevel, payload: &str) {
        let record = Record::new(&self.name, level, payload);
        let _ = self.sinks.log(&record);
        self.metrics.record_logged();
        // Flush on every record so a crash loses nothing already accepted
        let _ = self.sinks.flush();
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }

    pub fn flush(&self) -> Result<()> {
        self.sinks.flush()
    }

    /// Console sink, e.g. to adjust its colors
    pub fn console(&self) -> &ConsoleSink {
        &self.console
    }

    pub fn has_file_sink(&self) -> bool {
        self.file.lock().is_some()
    }

    pub fn has_callback_sink(&self) -> bool {
        self.callback.lock().is_some()
    }

    /// Number of sinks currently receiving records
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Sink names in delivery order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.sink_names()
    }

    /// # Example
    ///
    /// ```
    /// use organizer_log::Logger;
    ///
    /// let logger = Logger::new("metrics", Default::default(), "%v").unwrap();
    /// logger.info("one\ntwo");
    /// assert_eq!(logger.metrics().total_logged(), 2);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.sinks.flush();
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use organizer_log::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder("organizer")
///     .level(Level::Debug)
///     .pattern("[%H:%M:%S] [%l] %v")
///     .callback(Arc::new(|entry: Entry| {
///         assert!(!entry.formatted_message.ends_with('\n'));
///     }))
///     .build()
///     .unwrap();
///
/// logger.debug("started");
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Level,
    pattern: String,
    console: Option<ConsoleSink>,
    file: File,
    callback: Option<Callback>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::Info,
            pattern: DEFAULT_PATTERN.to_string(),
            console: None,
            file: File::None,
            callback: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Use a custom console sink instead of standard error
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleSink) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, file: File) -> Self {
        self.file = file;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn build(self) -> Result<Logger> {
        let console = self.console.unwrap_or_else(ConsoleSink::stderr);
        let logger = Logger::with_console(self.name, self.level, self.pattern, console)?;

        if !self.file.is_none() {
            logger.set_file(&self.file);
        }
        if let Some(callback) = self.callback {
            logger.set_callback(Some(callback));
        }

        Ok(logger)
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
