//! Git operations abstraction layer
//!
//! The bump workflow needs five things from git: the repository root, the
//! working tree status, and the ability to stage, commit and tag. They are
//! captured by the [Repository] trait so orchestration can run against either
//! implementation:
//!
//! - [command::GitCli]: runs the `git` binary as a blocking subprocess
//! - [mock::MockRepository]: records calls in memory for tests
//!
//! ```rust
//! # use gitsem::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gitsem::Result<()> {
//! let root = repo.repo_root()?;
//! if repo.is_clean()? {
//!     repo.add_file(&root.join("VERSION"))?;
//!     repo.commit("v1.0.0")?;
//!     repo.tag("v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;

pub use command::GitCli;
pub use mock::{GitCall, GitOp, MockRepository};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Common git operation trait for abstraction
///
/// Every call blocks until git finishes. Nothing is retried: a non-zero exit
/// surfaces as [crate::error::GitsemError::GitCommand] carrying the combined
/// stdout/stderr of the subprocess.
pub trait Repository: Send + Sync {
    /// Absolute path of the repository's top-level directory
    ///
    /// Equivalent to `git rev-parse --show-toplevel`, trimmed of whitespace.
    /// Fails with [crate::error::GitsemError::NotARepository] outside a repo.
    fn repo_root(&self) -> Result<PathBuf>;

    /// Whether `git status --porcelain` reports nothing
    ///
    /// Untracked files count as dirty.
    fn is_clean(&self) -> Result<bool>;

    /// Stage exactly one path (`git add <path>`)
    fn add_file(&self, path: &Path) -> Result<()>;

    /// Commit the index (`git commit -m <message>`)
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag at HEAD (`git tag <name>`)
    fn tag(&self, name: &str) -> Result<()>;
}
