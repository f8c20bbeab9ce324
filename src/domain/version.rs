use crate::error::{GitsemError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Immutable once built: bumping returns a fresh value and leaves the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// Create a plain release version with no pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// The version assumed when no VERSION file exists yet
    pub fn initial() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse a strict SemVer 2.0 string (e.g. "1.2.3", "2.0.0-beta+build.5")
    ///
    /// Whitespace is not accepted, and neither is a leading `v`; see
    /// [`VersionRequest::parse`] for user-facing input.
    pub fn parse(input: &str) -> Result<Self> {
        semver::Version::parse(input)
            .map(Version)
            .map_err(|e| GitsemError::invalid_version(input, e))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Pre-release identifiers, empty for a release version
    pub fn pre(&self) -> &str {
        self.0.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn build(&self) -> &str {
        self.0.build.as_str()
    }

    /// Bump version according to bump type
    ///
    /// Lower-order components reset to zero and any pre-release or build
    /// metadata is dropped. Fails with [GitsemError::VersionOverflow] when
    /// the incremented component would exceed `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());
        let overflow = || GitsemError::VersionOverflow {
            version: self.to_string(),
            bump: bump_type.as_str(),
        };
        // semver::Version::new leaves pre-release and build empty
        let next = match bump_type {
            VersionBump::Major => {
                semver::Version::new(major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionBump::Minor => {
                semver::Version::new(major, minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            VersionBump::Patch => {
                semver::Version::new(major, minor, patch.checked_add(1).ok_or_else(overflow)?)
            }
        };
        Ok(Version(next))
    }

    /// Tag and commit-message form of the version: `v<version>`
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::initial()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = GitsemError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl FromStr for VersionBump {
    type Err = GitsemError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(GitsemError::usage(format!(
                "'{}' is not a bump keyword (expected major, minor or patch)",
                other
            ))),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked the new version to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    /// Increment a component of the current version
    Bump(VersionBump),
    /// Use this exact version
    Explicit(Version),
}

impl VersionRequest {
    /// Parse the positional command-line argument
    ///
    /// Bump keywords win; anything else is a literal version with one
    /// optional leading `v`.
    pub fn parse(arg: &str) -> Result<Self> {
        if let Ok(bump) = arg.parse::<VersionBump>() {
            return Ok(VersionRequest::Bump(bump));
        }

        let literal = arg.strip_prefix('v').unwrap_or(arg);
        Version::parse(literal).map(VersionRequest::Explicit)
    }

    /// Compute the new version from the current one
    pub fn resolve(&self, current: &Version) -> Result<Version> {
        match self {
            VersionRequest::Bump(bump) => current.bump(*bump),
            VersionRequest::Explicit(version) => Ok(version.clone()),
        }
    }
}
