//! Application version numbers

use super::HostError;
use std::fmt;
use std::str::FromStr;

/// Release stage of a version, ordered from least to most mature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ReleaseType {
    PreAlpha,
    Alpha,
    Beta,
    Candidate,
    #[default]
    Final,
}

impl ReleaseType {
    /// Suffix used when displaying a version; empty for final releases
    pub fn suffix(&self) -> &'static str {
        match self {
            ReleaseType::PreAlpha => "pre-alpha",
            ReleaseType::Alpha => "alpha",
            ReleaseType::Beta => "beta",
            ReleaseType::Candidate => "rc",
            ReleaseType::Final => "",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pre-alpha" | "prealpha" => Ok(ReleaseType::PreAlpha),
            "alpha" | "a" => Ok(ReleaseType::Alpha),
            "beta" | "b" => Ok(ReleaseType::Beta),
            "rc" | "candidate" => Ok(ReleaseType::Candidate),
            "" | "final" => Ok(ReleaseType::Final),
            _ => Err(HostError::InvalidVersion(s.to_string())),
        }
    }
}

/// `major.minor.subminor` with a release stage
///
/// Versions order by their numbers first, then by release stage, so
/// `2.5.0-rc` sorts before `2.5.0`.
///
/// ```
/// use organizer_log::host::VersionInfo;
///
/// let rc: VersionInfo = "2.5.0-rc".parse().unwrap();
/// let release: VersionInfo = "v2.5".parse().unwrap();
/// assert!(rc < release);
/// assert_eq!(release.to_string(), "2.5.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub subminor: u32,
    pub release: ReleaseType,
}

impl VersionInfo {
    pub const fn new(major: u32, minor: u32, subminor: u32) -> Self {
        Self {
            major,
            minor,
            subminor,
            release: ReleaseType::Final,
        }
    }

    #[must_use]
    pub const fn with_release(mut self, release: ReleaseType) -> Self {
        self.release = release;
        self
    }

    pub fn is_final(&self) -> bool {
        self.release == ReleaseType::Final
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.subminor)?;
        if !self.is_final() {
            write!(f, "-{}", self.release.suffix())?;
        }
        Ok(())
    }
}

impl FromStr for VersionInfo {
    type Err = HostError;

    /// Accepts an optional leading `v`, one to three numeric parts and an
    /// optional release suffix, e.g. `2.4`, `v2.4.1-beta`, `1.0.0rc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HostError::InvalidVersion(s.to_string());

        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let split = body
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(body.len());
        let (numbers, suffix) = body.split_at(split);
        let suffix = suffix.strip_prefix('-').unwrap_or(suffix);

        let parts = numbers
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() || parts.len() > 3 {
            return Err(invalid());
        }

        let part = |i: usize| parts.get(i).copied().unwrap_or(0);
        let release = suffix.parse::<ReleaseType>().map_err(|_| invalid())?;

        Ok(VersionInfo::new(part(0), part(1), part(2)).with_release(release))
    }
}
