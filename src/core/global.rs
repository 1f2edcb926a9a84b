//! Process-wide default logger
//!
//! The default logger is created explicitly with [`create_default`] and read
//! with [`get_default`]. The free functions [`log`], [`debug`], [`info`],
//! [`warn`] and [`error`] (and the crate's macros without a `logger:` argument)
//! write through it.

use super::{
    error::Result,
    log_level::Level,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Name given to the default logger
pub const DEFAULT_LOGGER_NAME: &str = "default";

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Create (or replace) the default logger
///
/// A replaced logger is flushed and closed once the last handle obtained from
/// [`get_default`] is dropped.
pub fn create_default(level: Level, pattern: impl Into<String>) -> Result<()> {
    let logger = Arc::new(Logger::new(DEFAULT_LOGGER_NAME, level, pattern)?);
    install_default(logger);
    Ok(())
}

/// Install an already configured logger as the default
pub fn install_default(logger: Arc<Logger>) {
    let previous = DEFAULT_LOGGER.write().replace(logger);
    // Drop outside the lock; closing file sinks may block
    drop(previous);
}

/// Handle to the default logger
///
/// # Panics
///
/// Panics if [`create_default`] has not been called.
pub fn get_default() -> Arc<Logger> {
    match try_default() {
        Some(logger) => logger,
        None => panic!("default logger used before create_default() was called"),
    }
}

/// Handle to the default logger, if one exists
pub fn try_default() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.read().clone()
}

/// Remove the default logger, flushing and closing its sinks once no other
/// handles remain
pub fn destroy_default() {
    let previous = DEFAULT_LOGGER.write().take();
    drop(previous);
}

/// Log through the default logger; does nothing before [`create_default`]
pub fn log(level: Level, message: impl AsRef<str>) {
    if let Some(logger) = try_default() {
        logger.log(level, message);
    }
}

pub fn debug(message: impl AsRef<str>) {
    log(Level::Debug, message);
}

pub fn info(message: impl AsRef<str>) {
    log(Level::Info, message);
}

pub fn warn(message: impl AsRef<str>) {
    log(Level::Warning, message);
}

pub fn error(message: impl AsRef<str>) {
    log(Level::Error, message);
}
