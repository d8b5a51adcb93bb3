//! The simulated Git state for one level session.

use serde::{Deserialize, Serialize};

use super::tree::FileNode;

/// Simulated repository state: project tree, current branch, last message.
///
/// An empty `branch` means no repository has been initialized yet; it becomes
/// non-empty once an `init` command is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoState {
    /// Root entries, conventionally a single project directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileNode>,

    /// Current branch name, empty before `init`.
    #[serde(default)]
    pub branch: String,

    /// Description of the last notable action (e.g. last commit message).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RepoState {
    /// Returns true once a repository has been initialized.
    pub fn is_initialized(&self) -> bool {
        !self.branch.is_empty()
    }
}
