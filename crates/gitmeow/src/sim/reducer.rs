//! Pure state transitions for accepted commands.
//!
//! Only `init`, `add`, `commit`, `branch`, and `merge` alter the simulated
//! state. Every other verb is accepted without effect — later levels teach
//! command vocabulary without simulating it, and there is no error outcome
//! here at all.

use crate::command::{Command, CommandKind};
use crate::sim::state::RepoState;
use crate::sim::tree::{FileNode, FileStatus};

/// Default branch name after `git init`.
pub const DEFAULT_BRANCH: &str = "master";

/// Applies one accepted command to the state, returning the next state.
pub fn apply(state: &RepoState, command: &Command) -> RepoState {
    let mut next = state.clone();

    let Some(kind) = command.kind() else {
        return next;
    };

    match kind {
        CommandKind::Init => apply_init(&mut next),
        CommandKind::Add => {
            if let Some(target) = command.first_positional() {
                set_status_by_name(&mut next, target, FileStatus::Staged);
            }
        }
        CommandKind::Commit => {
            promote_staged(&mut next);
            next.message = command
                .flag_value("-m")
                .or_else(|| command.args.get(1).map(String::as_str))
                .map(String::from);
        }
        CommandKind::Branch => {
            if let Some(name) = command.first_positional() {
                next.branch = name.to_string();
            }
        }
        CommandKind::Merge => {
            next.branch = DEFAULT_BRANCH.to_string();
            let merged = command.first_positional().unwrap_or_default();
            next.message = Some(format!("Merged branch {}", merged));
        }
        _ => {}
    }

    next
}

/// Prepends a synthetic `.git` directory to the root directory's children,
/// keeping any existing non-`.git` entries. Idempotent: a second `init` does
/// not produce a duplicate `.git`. Without a root directory this is a no-op.
fn apply_init(state: &mut RepoState) {
    let Some(root) = state.files.iter_mut().find(|n| n.is_directory()) else {
        return;
    };

    let mut children = vec![FileNode::directory(".git", vec![])];
    children.extend(root.children.drain(..).filter(|c| c.name != ".git"));
    root.children = children;

    state.branch = DEFAULT_BRANCH.to_string();
}

/// Sets the status of every file named `target` among the direct children of
/// the top-level entries. The scan is intentionally shallow: nested
/// directories are not descended into.
fn set_status_by_name(state: &mut RepoState, target: &str, status: FileStatus) {
    for root in &mut state.files {
        for child in &mut root.children {
            if !child.is_directory() && child.name == target {
                child.status = Some(status);
            }
        }
    }
}

/// Promotes every staged file (same shallow scope as `add`) to committed.
fn promote_staged(state: &mut RepoState) {
    for root in &mut state.files {
        for child in &mut root.children {
            if child.status == Some(FileStatus::Staged) {
                child.status = Some(FileStatus::Committed);
            }
        }
    }
}
