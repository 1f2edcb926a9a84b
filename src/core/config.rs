//! Logger configuration values
//!
//! [`File`] selects the optional file sink; [`LoggerConfig`] bundles everything
//! needed to build a [`Logger`](super::Logger) and can be loaded from JSON.

use super::error::Result;
use super::log_level::Level;
use super::pattern::DEFAULT_PATTERN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File output configuration
///
/// # Examples
///
/// ```
/// use organizer_log::File;
///
/// // 5 MB per file, keep three archives
/// let rotating = File::rotating("/var/log/organizer.log", 5 * 1024 * 1024, 3);
///
/// // New file every day at 02:30 local time
/// let daily = File::daily("/var/log/organizer.log", 2, 30);
///
/// // No file output
/// let none = File::none();
/// assert!(none.is_none());
/// # let _ = (rotating, daily);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum File {
    #[default]
    None,

    /// Rotate when the active file would exceed `max_size` bytes
    Rotating {
        path: PathBuf,
        max_size: u64,
        max_files: usize,
        /// Gzip archives after rotation
        #[serde(default)]
        compress: bool,
    },

    /// Start a new dated file every day at `hour:minute` local time
    Daily {
        path: PathBuf,
        hour: u32,
        minute: u32,
    },
}

impl File {
    #[must_use]
    pub fn none() -> Self {
        File::None
    }

    #[must_use]
    pub fn rotating(path: impl Into<PathBuf>, max_size: u64, max_files: usize) -> Self {
        File::Rotating {
            path: path.into(),
            max_size,
            max_files,
            compress: false,
        }
    }

    #[must_use]
    pub fn daily(path: impl Into<PathBuf>, hour: u32, minute: u32) -> Self {
        File::Daily {
            path: path.into(),
            hour,
            minute,
        }
    }

    /// Enable gzip compression of rotated archives; ignored for other variants
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        if let File::Rotating { compress, .. } = &mut self {
            *compress = enabled;
        }
        self
    }

    pub fn is_none(&self) -> bool {
        matches!(self, File::None)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            File::None => None,
            File::Rotating { path, .. } | File::Daily { path, .. } => Some(path),
        }
    }
}

/// Serializable description of a logger
///
/// # Example
///
/// ```
/// use organizer_log::{Level, LoggerConfig};
///
/// let config = LoggerConfig::from_json(
///     r#"{"name": "plugins", "level": "debug", "pattern": "[%l] %v"}"#,
/// ).unwrap();
/// assert_eq!(config.level, Level::Debug);
/// assert!(config.file.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Level,
    pub pattern: String,
    pub file: File,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            level: Level::Info,
            pattern: DEFAULT_PATTERN.to_string(),
            file: File::None,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
