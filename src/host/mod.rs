//! Interfaces between the host application and its plugins
//!
//! These are declarations only: the host implements [`Organizer`],
//! [`GameInfo`] and [`ModHandle`], and plugins receive them as trait objects.
//! The logging facility does not depend on anything here; the host consumes
//! log records through a [`Callback`](crate::sinks::Callback) instead.

mod organizer;
mod version;

pub use organizer::{GameInfo, ModHandle, ModRef, Organizer};
pub use version::{ReleaseType, VersionInfo};

/// Errors reported by host operations
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A mod with this name is already installed
    #[error("mod '{0}' already exists")]
    ModExists(String),

    /// No mod with this name is installed
    #[error("mod '{0}' not found")]
    ModNotFound(String),

    /// The plugin never declared the requested setting
    #[error("plugin '{plugin}' has no setting '{key}'")]
    UndeclaredSetting { plugin: String, key: String },

    /// Text that is not a version number
    #[error("invalid version string '{0}'")]
    InvalidVersion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    pub fn undeclared_setting(plugin: impl Into<String>, key: impl Into<String>) -> Self {
        HostError::UndeclaredSetting {
            plugin: plugin.into(),
            key: key.into(),
        }
    }
}
