use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for gitsem operations
#[derive(Error, Debug)]
pub enum GitsemError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Not inside a git repository: {0}")]
    NotARepository(String),

    #[error("Working tree is not clean; commit or stash your changes, or pass -n")]
    DirtyWorkingTree,

    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Cannot bump {bump} of {version}: component would overflow")]
    VersionOverflow { version: String, bump: &'static str },

    #[error("Version file {}: {reason}", path.display())]
    VersionFile {
        path: PathBuf,
        reason: Box<GitsemError>,
    },

    #[error("git {command} failed\noutput:\n{output}")]
    GitCommand { command: String, output: String },

    #[error("Configuration error: {0}")]
    Config(String),

    // io::Error is displayed inline and is not the source()
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

/// Convenience type alias for Results in gitsem
pub type Result<T> = std::result::Result<T, GitsemError>;

impl From<std::io::Error> for GitsemError {
    fn from(err: std::io::Error) -> Self {
        GitsemError::Io(err)
    }
}

impl GitsemError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        GitsemError::Usage(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitsemError::Config(msg.into())
    }

    /// Create a version parse error for the given input
    pub fn invalid_version(input: impl Into<String>, reason: impl ToString) -> Self {
        GitsemError::InvalidVersion {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a git command failure carrying the subprocess output
    pub fn git_command(command: impl Into<String>, output: impl Into<String>) -> Self {
        GitsemError::GitCommand {
            command: command.into(),
            output: output.into(),
        }
    }

    /// Attach the version file path to an error raised while handling it
    pub fn in_version_file(self, path: impl Into<PathBuf>) -> Self {
        GitsemError::VersionFile {
            path: path.into(),
            reason: Box::new(self),
        }
    }

    /// Whether this error came from bad command-line input
    pub fn is_usage(&self) -> bool {
        matches!(self, GitsemError::Usage(_))
    }
}
