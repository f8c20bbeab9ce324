//! Domain logic - pure version and message rules independent of git operations

pub mod message;
pub mod version;

pub use message::CommitMessage;
pub use version::{Version, VersionBump, VersionRequest};
