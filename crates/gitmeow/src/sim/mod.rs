//! Simulated repository state: file tree, branch, and the command reducer.

pub mod reducer;
pub mod state;
pub mod tree;

pub use state::RepoState;
pub use tree::{FileNode, FileStatus, NodeKind};
