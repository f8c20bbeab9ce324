//! The `VERSION` file at the repository root: the tool's only durable state.

use crate::domain::Version;
use crate::error::{GitsemError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const VERSION_FILE_NAME: &str = "VERSION";

/// Location of the version file for a repository root
pub fn version_file_path(root: &Path) -> PathBuf {
    root.join(VERSION_FILE_NAME)
}

/// Reads the current version.
///
/// A missing file means nothing has been released yet and yields `0.0.0`.
/// Surrounding whitespace in the file is ignored.
///
/// # Returns
/// * `Ok(Version)` - Parsed or initial version
/// * `Err` - If the file exists but cannot be read or does not hold a valid version
pub fn read_version(path: &Path) -> Result<Version> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no version file, starting from 0.0.0");
            return Ok(Version::initial());
        }
        Err(e) => return Err(GitsemError::from(e).in_version_file(path)),
    };

    Version::parse(contents.trim()).map_err(|e| e.in_version_file(path))
}

/// Overwrites the version file with the version string, no trailing newline.
pub fn write_version(path: &Path, version: &Version) -> Result<()> {
    fs::write(path, version.to_string()).map_err(|e| GitsemError::from(e).in_version_file(path))
}
