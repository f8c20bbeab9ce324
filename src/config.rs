use crate::domain::message::PLACEHOLDER;
use crate::error::{GitsemError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "gitsem.toml";

/// Defaults applied when the corresponding command-line flag is not given.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Commit message template; `%s` becomes the tag name
    #[serde(default = "default_message")]
    pub message: String,

    /// Tag the version commit
    #[serde(default = "default_true")]
    pub tag: bool,

    /// Refuse to run on a dirty working tree
    #[serde(default = "default_true")]
    pub clean_check: bool,
}

fn default_message() -> String {
    PLACEHOLDER.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            message: default_message(),
            tag: true,
            clean_check: true,
        }
    }
}

/// Per-user configuration file location, if the platform has one
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitsem").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `gitsem.toml` in current directory
/// 3. `gitsem/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return load_config_file(Path::new(path));
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return load_config_file(&local);
    }

    match user_config_path() {
        Some(path) if path.exists() => load_config_file(&path),
        _ => Ok(Config::default()),
    }
}

/// Parses a single configuration file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        GitsemError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| GitsemError::config(format!("cannot parse {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), ?config, "loaded configuration");
    Ok(config)
}
