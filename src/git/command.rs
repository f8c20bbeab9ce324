use crate::error::{GitsemError, Result};
use crate::git::Repository;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GIT: &str = "git";

/// Repository backed by the `git` executable
///
/// All commands run with `workdir` as their current directory, so the
/// process-wide working directory is never consulted after construction.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run git commands from the given directory
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: workdir.into(),
        }
    }

    /// Run git commands from the process's current directory
    pub fn current_dir() -> Result<Self> {
        Ok(GitCli::new(std::env::current_dir()?))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git <args>` and return its output if it exits successfully
    ///
    /// A spawn failure or non-zero exit becomes [GitsemError::GitCommand]
    /// with stdout followed by stderr as the output text.
    fn run<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command_line = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(workdir = %self.workdir.display(), "running git {}", command_line);

        let output = Command::new(GIT)
            .args(&args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| {
                GitsemError::git_command(&command_line, format!("failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            let combined = combined_output(&output);
            tracing::debug!(
                code = output.status.code().unwrap_or(-1),
                "git {} failed",
                command_line
            );
            return Err(GitsemError::git_command(command_line, combined));
        }

        Ok(output)
    }
}

fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut combined = String::with_capacity(stdout.len() + stderr.len());
    combined.push_str(&stdout);
    combined.push_str(&stderr);
    combined
}

impl Repository for GitCli {
    fn repo_root(&self) -> Result<PathBuf> {
        let output = self
            .run(["rev-parse", "--show-toplevel"])
            .map_err(|e| match e {
                GitsemError::GitCommand { output, .. } => {
                    GitsemError::NotARepository(output.trim().to_string())
                }
                other => other,
            })?;

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(GitsemError::NotARepository(
                "git reported an empty top-level directory".to_string(),
            ));
        }
        Ok(PathBuf::from(root))
    }

    fn is_clean(&self) -> Result<bool> {
        let output = self.run(["status", "--porcelain"])?;
        Ok(output.stdout.is_empty())
    }

    fn add_file(&self, path: &Path) -> Result<()> {
        self.run([OsStr::new("add"), path.as_os_str()])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(["commit", "-m", message])?;
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.run(["tag", name])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_root_outside_repository() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        match git.repo_root() {
            Err(GitsemError::NotARepository(_)) => {}
            Ok(root) => panic!("unexpected repository root {}", root.display()),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_failed_command_carries_output() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        let err = git.tag("v1.0.0").unwrap_err();
        match err {
            GitsemError::GitCommand { command, output } => {
                assert_eq!(command, "tag v1.0.0");
                assert!(!output.is_empty());
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_failed_command_names_full_command_line() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        let err = git.commit("release v1.0.0").unwrap_err();
        match err {
            GitsemError::GitCommand { command, .. } => {
                assert_eq!(command, "commit -m release v1.0.0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_workdir() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        assert_eq!(git.workdir(), dir.path());
    }
}
