use crate::error::{GitsemError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A mutating call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Add(PathBuf),
    Commit(String),
    Tag(String),
}

/// Operations that [MockRepository] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOp {
    RepoRoot,
    Status,
    Add,
    Commit,
    Tag,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    root: PathBuf,
    clean: bool,
    fail_on: Option<GitOp>,
    calls: Mutex<Vec<GitCall>>,
    status_checks: AtomicUsize,
}

impl MockRepository {
    /// Create a clean mock repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MockRepository {
            root: root.into(),
            clean: true,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
            status_checks: AtomicUsize::new(0),
        }
    }

    /// Report a dirty working tree
    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Make the given operation fail with a git command error
    pub fn failing_on(mut self, op: GitOp) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Mutating calls made so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of times the working tree status was queried
    pub fn status_checks(&self) -> usize {
        self.status_checks.load(Ordering::SeqCst)
    }

    fn check(&self, op: GitOp, command: &str) -> Result<()> {
        if self.fail_on == Some(op) {
            return Err(GitsemError::git_command(command, "mock failure"));
        }
        Ok(())
    }

    fn record(&self, call: GitCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Repository for MockRepository {
    fn repo_root(&self) -> Result<PathBuf> {
        if self.fail_on == Some(GitOp::RepoRoot) {
            return Err(GitsemError::NotARepository("mock repository".to_string()));
        }
        Ok(self.root.clone())
    }

    fn is_clean(&self) -> Result<bool> {
        self.status_checks.fetch_add(1, Ordering::SeqCst);
        self.check(GitOp::Status, "status --porcelain")?;
        Ok(self.clean)
    }

    fn add_file(&self, path: &Path) -> Result<()> {
        self.check(GitOp::Add, "add")?;
        self.record(GitCall::Add(path.to_path_buf()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.check(GitOp::Commit, "commit")?;
        self.record(GitCall::Commit(message.to_string()));
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.check(GitOp::Tag, "tag")?;
        self.record(GitCall::Tag(name.to_string()));
        Ok(())
    }
}
