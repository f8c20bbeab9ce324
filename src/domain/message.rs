use crate::error::{GitsemError, Result};

/// Placeholder replaced by the tag name in a commit message template
pub const PLACEHOLDER: &str = "%s";

/// Commit message template (e.g., "%s", "release %s", "bump")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    template: String,
}

impl CommitMessage {
    /// Create a template, rejecting an empty one
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.is_empty() {
            return Err(GitsemError::usage("missing message"));
        }
        Ok(CommitMessage { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the message for a tag name
    /// Example: template="release %s", tag_name="v1.0.0" -> "release v1.0.0"
    pub fn render(&self, tag_name: &str) -> String {
        if self.template.contains(PLACEHOLDER) {
            self.template.replace(PLACEHOLDER, tag_name)
        } else {
            self.template.clone()
        }
    }
}

impl Default for CommitMessage {
    fn default() -> Self {
        CommitMessage {
            template: PLACEHOLDER.to_string(),
        }
    }
}
