//! File tree nodes for the simulated project.

use serde::{Deserialize, Serialize};

/// Whether a node is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// Tracking status of a file in the simulated repository.
///
/// Only meaningful for files; a directory never carries a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Untracked,
    Staged,
    Committed,
    Conflict,
    Modified,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Untracked => write!(f, "untracked"),
            FileStatus::Staged => write!(f, "staged"),
            FileStatus::Committed => write!(f, "committed"),
            FileStatus::Conflict => write!(f, "conflict"),
            FileStatus::Modified => write!(f, "modified"),
        }
    }
}

/// One entry in the simulated project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Entry name, e.g. `cute-cat-1.jpg` or `.git`.
    pub name: String,

    /// File or directory.
    pub kind: NodeKind,

    /// Tracking status. Absent for directories and for synthetic
    /// placeholders that are not yet tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FileStatus>,

    /// Child entries, only meaningful for directories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,

    /// File content, used by conflict-resolution levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileNode {
    /// Creates a file node with the given status.
    pub fn file(name: impl Into<String>, status: Option<FileStatus>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            status,
            children: Vec::new(),
            content: None,
        }
    }

    /// Creates a directory node with the given children.
    pub fn directory(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            status: None,
            children,
            content: None,
        }
    }

    /// Returns true for directory nodes.
    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}
