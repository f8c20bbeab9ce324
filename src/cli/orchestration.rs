//! Main workflow orchestration logic
//!
//! Keeps the bump workflow apart from argument parsing so it can be driven
//! programmatically, and against a mock repository in tests.

use std::path::PathBuf;

use crate::domain::{CommitMessage, Version, VersionRequest};
use crate::error::{GitsemError, Result};
use crate::git::Repository;
use crate::version_file;

/// Arguments for the bump workflow
///
/// The resolved request after command-line flags and configuration defaults
/// have been merged. Independent of clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpArgs {
    /// `major`, `minor`, `patch` or a literal version (optionally `v`-prefixed)
    pub target: String,

    /// Commit message template
    pub message: String,

    /// Tag the version commit
    pub tag: bool,

    /// Show old and new versions without changing anything
    pub preview: bool,

    /// Skip the working tree cleanliness check
    pub skip_clean_check: bool,
}

impl BumpArgs {
    /// Arguments with the default flags for the given target
    pub fn new(target: impl Into<String>) -> Self {
        BumpArgs {
            target: target.into(),
            message: crate::domain::message::PLACEHOLDER.to_string(),
            tag: true,
            preview: false,
            skip_clean_check: false,
        }
    }

    /// Whether the working tree must be clean before proceeding
    ///
    /// Previewing never mutates anything, so it never requires a clean tree.
    pub fn requires_clean_tree(&self) -> bool {
        !self.preview && !self.skip_clean_check
    }
}

/// Everything resolved for one run, passed explicitly through the workflow
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub version_file: PathBuf,
    pub old_version: Version,
    pub new_version: Version,
    pub clean_check: bool,
    pub message: CommitMessage,
    pub tag: bool,
    pub preview: bool,
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Nothing was changed
    Preview {
        old_version: Version,
        new_version: Version,
        /// Working tree status at preview time, informational only
        clean: bool,
    },
    /// The version file was written and committed
    Committed {
        /// `v<new version>`
        tag_name: String,
        /// The rendered commit message
        message: String,
        /// Whether a tag was created
        tagged: bool,
    },
}

/// Main bump workflow
///
/// 1. Resolve the repository root
/// 2. Refuse a dirty working tree (unless previewing or skipped)
/// 3. Read the current version from `<root>/VERSION`
/// 4. Resolve the requested version
/// 5. Preview, or write + stage + commit + tag
///
/// Stops at the first error. Nothing is rolled back: a failure after the
/// version file was written leaves it in place.
pub fn run_bump_workflow<R>(repo: &R, args: BumpArgs) -> Result<WorkflowOutcome>
where
    R: Repository + ?Sized,
{
    let message = CommitMessage::new(args.message.as_str())?;

    let root = repo.repo_root()?;
    tracing::debug!(root = %root.display(), "resolved repository root");

    let clean_check = args.requires_clean_tree();
    if clean_check {
        if !repo.is_clean()? {
            return Err(GitsemError::DirtyWorkingTree);
        }
        tracing::debug!("working tree is clean");
    }

    let version_file = version_file::version_file_path(&root);
    let old_version = version_file::read_version(&version_file)?;
    let request = VersionRequest::parse(&args.target)?;
    let new_version = request.resolve(&old_version)?;
    tracing::debug!(old = %old_version, new = %new_version, "resolved versions");

    let ctx = RunContext {
        version_file,
        old_version,
        new_version,
        clean_check,
        message,
        tag: args.tag,
        preview: args.preview,
    };

    if ctx.preview {
        preview(repo, ctx)
    } else {
        commit_new_version(repo, ctx)
    }
}

fn preview<R>(repo: &R, ctx: RunContext) -> Result<WorkflowOutcome>
where
    R: Repository + ?Sized,
{
    let clean = repo.is_clean()?;
    if !clean {
        tracing::debug!("previewing on a dirty working tree");
    }

    Ok(WorkflowOutcome::Preview {
        old_version: ctx.old_version,
        new_version: ctx.new_version,
        clean,
    })
}

fn commit_new_version<R>(repo: &R, ctx: RunContext) -> Result<WorkflowOutcome>
where
    R: Repository + ?Sized,
{
    version_file::write_version(&ctx.version_file, &ctx.new_version)?;
    repo.add_file(&ctx.version_file)?;

    let tag_name = ctx.new_version.tag_name();
    let message = ctx.message.render(&tag_name);
    repo.commit(&message)?;
    tracing::info!(version = %ctx.new_version, "committed version bump");

    if ctx.tag {
        repo.tag(&tag_name)?;
        tracing::info!(tag = %tag_name, "created tag");
    }

    Ok(WorkflowOutcome::Committed {
        tag_name,
        message,
        tagged: ctx.tag,
    })
}
