//! Log level definitions
//!
//! [`Level`] is the four-valued set exposed to callers. Records travel through
//! the sinks with a [`BackendLevel`], the richer seven-valued set used for
//! filtering, coloring and rendering.

use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    #[serde(alias = "warn")]
    Warning = 2,
    Error = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Translate to the backend level used for filtering and rendering
    #[must_use]
    pub fn to_backend(self) -> BackendLevel {
        match self {
            Level::Debug => BackendLevel::Debug,
            Level::Info => BackendLevel::Info,
            Level::Warning => BackendLevel::Warn,
            Level::Error => BackendLevel::Err,
        }
    }

    /// Collapse a backend level onto the public set
    ///
    /// Levels below info map to [`Level::Debug`], levels above warn map to
    /// [`Level::Error`], and `Off` maps to [`Level::Info`].
    #[must_use]
    pub fn from_backend(level: BackendLevel) -> Self {
        match level {
            BackendLevel::Trace | BackendLevel::Debug => Level::Debug,
            BackendLevel::Warn => Level::Warning,
            BackendLevel::Err | BackendLevel::Critical => Level::Error,
            BackendLevel::Info | BackendLevel::Off => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Level carried by a record inside the sink pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum BackendLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Err = 4,
    Critical = 5,
    Off = 6,
}

impl BackendLevel {
    pub const COUNT: usize = 7;

    pub fn to_str(&self) -> &'static str {
        match self {
            BackendLevel::Trace => "trace",
            BackendLevel::Debug => "debug",
            BackendLevel::Info => "info",
            BackendLevel::Warn => "warning",
            BackendLevel::Err => "error",
            BackendLevel::Critical => "critical",
            BackendLevel::Off => "off",
        }
    }

    pub fn short_str(&self) -> &'static str {
        match self {
            BackendLevel::Trace => "T",
            BackendLevel::Debug => "D",
            BackendLevel::Info => "I",
            BackendLevel::Warn => "W",
            BackendLevel::Err => "E",
            BackendLevel::Critical => "C",
            BackendLevel::Off => "O",
        }
    }

    /// Unknown discriminants collapse to `Off`
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => BackendLevel::Trace,
            1 => BackendLevel::Debug,
            2 => BackendLevel::Info,
            3 => BackendLevel::Warn,
            4 => BackendLevel::Err,
            5 => BackendLevel::Critical,
            _ => BackendLevel::Off,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn color_code(&self) -> Option<Color> {
        use colored::Color::*;
        match self {
            BackendLevel::Trace => Some(White),
            BackendLevel::Debug => Some(Cyan),
            BackendLevel::Info => Some(Green),
            BackendLevel::Warn => Some(Yellow),
            BackendLevel::Err => Some(Red),
            BackendLevel::Critical => Some(BrightRed),
            BackendLevel::Off => None,
        }
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl From<Level> for BackendLevel {
    fn from(level: Level) -> Self {
        level.to_backend()
    }
}

impl From<BackendLevel> for Level {
    fn from(level: BackendLevel) -> Self {
        Level::from_backend(level)
    }
}
