//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and logs the result,
//! splitting it into one record per line. Without a `logger:` argument the
//! default logger is used.
//!
//! # Examples
//!
//! ```
//! use organizer_log::prelude::*;
//! use organizer_log::info;
//!
//! let logger = Logger::new("plugins", Level::Info, "[%l] %v").unwrap();
//!
//! // Explicit logger
//! info!(logger: logger, "Loaded {} plugins", 12);
//!
//! // Default logger (ignored until create_default has been called)
//! info!("Profile {} activated", "Default");
//! ```

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use organizer_log::prelude::*;
/// # let logger = Logger::new("doc", Level::Info, "%v").unwrap();
/// use organizer_log::log;
/// log!(logger: logger, Level::Info, "Simple message");
/// log!(logger: logger, Level::Error, "Error code: {}", 500);
/// log!(Level::Warning, "Default logger: {}", "hello");
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use organizer_log::prelude::*;
/// # let logger = Logger::new("doc", Level::Debug, "%v").unwrap();
/// use organizer_log::debug;
/// debug!(logger: logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use organizer_log::prelude::*;
/// # let logger = Logger::new("doc", Level::Info, "%v").unwrap();
/// use organizer_log::info;
/// info!(logger: logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use organizer_log::prelude::*;
/// # let logger = Logger::new("doc", Level::Info, "%v").unwrap();
/// use organizer_log::warn;
/// warn!(logger: logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use organizer_log::prelude::*;
/// # let logger = Logger::new("doc", Level::Info, "%v").unwrap();
/// use organizer_log::error;
/// error!(logger: logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}
