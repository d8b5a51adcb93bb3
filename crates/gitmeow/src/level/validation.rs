//! Authoring-time validation for level packs.
//!
//! A malformed level cannot fail at runtime — it would just be
//! uncompletable. This validator catches those mistakes when packs are
//! loaded and when the built-in catalog is checked in tests.

use regex::Regex;
use std::sync::LazyLock;

use super::error::{LevelError, Result};
use super::resource::Level;
use crate::sim::tree::FileNode;

// Branch names the simulator accepts: path-like segments without whitespace.
static RE_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$").unwrap());

/// Validator for a set of levels.
pub struct PackValidator {
    /// Collected validation errors.
    errors: Vec<String>,
}

impl PackValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Validates the levels as one pack. Levels are expected sorted by id.
    pub fn validate(&mut self, levels: &[Level]) -> Result<()> {
        self.errors.clear();

        if levels.is_empty() {
            self.errors.push("pack contains no levels".to_string());
        }

        self.validate_id_sequence(levels);
        for level in levels {
            self.validate_level(level);
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(LevelError::Validation(self.errors.join("; ")))
        }
    }

    /// Returns the collected errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Ids must be positive, unique, and contiguous from 1 — the unlock
    /// sequence walks them in order.
    fn validate_id_sequence(&mut self, levels: &[Level]) {
        for (i, level) in levels.iter().enumerate() {
            let expected = (i + 1) as u32;
            if level.id != expected {
                self.errors.push(format!(
                    "level ids must be contiguous from 1: found {} where {} was expected",
                    level.id, expected
                ));
                return;
            }
        }
    }

    fn validate_level(&mut self, level: &Level) {
        let id = level.id;

        if level.title.trim().is_empty() {
            self.errors.push(format!("Level {}: title is required", id));
        }

        if level.required_commands.is_empty() {
            self.errors.push(format!(
                "Level {}: requiredCommands must not be empty",
                id
            ));
        }

        if level.completion.is_degenerate() {
            self.errors.push(format!(
                "Level {}: completion rule must specify at least one of: uses, all, any, not",
                id
            ));
        } else if !level.completion.satisfiable_with(&level.accepted_kinds()) {
            // Only accepted commands enter the history the rule sees, so a
            // rule needing a verb outside requiredCommands can never pass.
            self.errors.push(format!(
                "Level {}: completion rule references verbs not reachable through requiredCommands",
                id
            ));
        }

        self.validate_state(id, "initialState", &level.initial_state.files);
        self.validate_state(id, "targetState", &level.target_state.files);

        for (label, branch) in [
            ("initialState", &level.initial_state.branch),
            ("targetState", &level.target_state.branch),
        ] {
            if !branch.is_empty() && !RE_BRANCH.is_match(branch) {
                self.errors.push(format!(
                    "Level {}: {} has invalid branch name '{}'",
                    id, label, branch
                ));
            }
        }
    }

    fn validate_state(&mut self, id: u32, label: &str, files: &[FileNode]) {
        for node in files {
            self.validate_node(id, label, node);
        }
    }

    fn validate_node(&mut self, id: u32, label: &str, node: &FileNode) {
        if node.name.trim().is_empty() {
            self.errors
                .push(format!("Level {}: {} contains a node with no name", id, label));
        }

        if node.is_directory() {
            if node.status.is_some() {
                self.errors.push(format!(
                    "Level {}: {} directory '{}' must not carry a status",
                    id, label, node.name
                ));
            }
            for child in &node.children {
                self.validate_node(id, label, child);
            }
        } else if !node.children.is_empty() {
            self.errors.push(format!(
                "Level {}: {} file '{}' must not have children",
                id, label, node.name
            ));
        }
    }
}

impl Default for PackValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use crate::level::resource::{CommandPattern, CompletionRule};
    use crate::sim::tree::{FileStatus, NodeKind};
    use crate::sim::RepoState;

    fn minimal_level(id: u32) -> Level {
        Level {
            id,
            title: format!("Level {}", id),
            description: String::new(),
            story: String::new(),
            hint: String::new(),
            initial_state: RepoState {
                files: vec![FileNode::directory("project", vec![])],
                branch: String::new(),
                message: None,
            },
            target_state: RepoState {
                files: vec![FileNode::directory(
                    "project",
                    vec![FileNode::directory(".git", vec![])],
                )],
                branch: "master".to_string(),
                message: None,
            },
            sample_commands: vec![],
            required_commands: vec![CommandPattern::kind(CommandKind::Init)],
            completion: CompletionRule::uses(CommandKind::Init),
        }
    }

    #[test]
    fn test_valid_pack() {
        let levels = vec![minimal_level(1), {
            let mut l = minimal_level(2);
            l.required_commands = vec![CommandPattern::kind(CommandKind::Status)];
            l.completion = CompletionRule::uses(CommandKind::Status);
            l
        }];

        let mut validator = PackValidator::new();
        let result = validator.validate(&levels);
        assert!(result.is_ok(), "Errors: {:?}", validator.errors());
    }

    #[test]
    fn test_empty_pack() {
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[]).is_err());
    }

    #[test]
    fn test_non_contiguous_ids() {
        let levels = vec![minimal_level(1), minimal_level(3)];
        let mut validator = PackValidator::new();
        assert!(validator.validate(&levels).is_err());
        assert!(validator.errors().iter().any(|e| e.contains("contiguous")));
    }

    #[test]
    fn test_ids_must_start_at_one() {
        let levels = vec![minimal_level(2)];
        let mut validator = PackValidator::new();
        assert!(validator.validate(&levels).is_err());
    }

    #[test]
    fn test_empty_title() {
        let mut level = minimal_level(1);
        level.title = "  ".to_string();
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator.errors().iter().any(|e| e.contains("title")));
    }

    #[test]
    fn test_empty_required_commands() {
        let mut level = minimal_level(1);
        level.required_commands = vec![];
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("requiredCommands")));
    }

    #[test]
    fn test_unreachable_completion_rule() {
        let mut level = minimal_level(1);
        // Requires init but completion wants commit: uncompletable.
        level.completion = CompletionRule::uses(CommandKind::Commit);
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("not reachable")));
    }

    #[test]
    fn test_degenerate_completion_rule() {
        let mut level = minimal_level(1);
        level.completion =
            CompletionRule::Compound(crate::level::resource::CompoundCompletion::default());
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("at least one of")));
    }

    #[test]
    fn test_directory_with_status() {
        let mut level = minimal_level(1);
        level.initial_state.files[0].status = Some(FileStatus::Committed);
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("must not carry a status")));
    }

    #[test]
    fn test_file_with_children() {
        let mut level = minimal_level(1);
        level.initial_state.files[0].children = vec![FileNode {
            name: "weird".to_string(),
            kind: NodeKind::File,
            status: None,
            children: vec![FileNode::file("inner", None)],
            content: None,
        }];
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("must not have children")));
    }

    #[test]
    fn test_invalid_branch_name() {
        let mut level = minimal_level(1);
        level.target_state.branch = "bad branch".to_string();
        let mut validator = PackValidator::new();
        assert!(validator.validate(&[level]).is_err());
        assert!(validator
            .errors()
            .iter()
            .any(|e| e.contains("invalid branch name")));
    }

    #[test]
    fn test_branch_with_slash_is_valid() {
        let mut level = minimal_level(1);
        level.target_state.branch = "feature/photo-tags".to_string();
        let mut validator = PackValidator::new();
        let result = validator.validate(&[level]);
        assert!(result.is_ok(), "Errors: {:?}", validator.errors());
    }
}
