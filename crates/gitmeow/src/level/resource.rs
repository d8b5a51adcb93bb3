//! Resource types for level packs.
//!
//! Levels are authored as K8s-style YAML resources (`apiVersion`, `kind`,
//! `metadata`, `spec`), either one `Level` per file or grouped into a
//! `LevelPack`. The built-in catalog ships as a single embedded pack.

use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandKind};
use crate::sim::RepoState;

/// The API version for all gitmeow resources.
pub const API_VERSION: &str = "gitmeow.io/v1";

/// The kind of resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Level,
    LevelPack,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Level => write!(f, "Level"),
            ResourceKind::LevelPack => write!(f, "LevelPack"),
        }
    }
}

/// Resource metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// The unique name of the resource within its kind.
    pub name: String,
}

impl ObjectMeta {
    /// Creates metadata with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A generic resource wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource<T> {
    /// API version, should always be `gitmeow.io/v1`.
    pub api_version: String,

    /// The kind of resource.
    pub kind: ResourceKind,

    /// Resource metadata.
    pub metadata: ObjectMeta,

    /// The resource specification.
    pub spec: T,
}

impl<T> Resource<T> {
    /// Creates a new resource with the given kind and spec.
    pub fn new(kind: ResourceKind, name: impl Into<String>, spec: T) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind,
            metadata: ObjectMeta::new(name),
            spec,
        }
    }

    /// Returns the name of the resource.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Header used to sniff a resource file before full parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHeader {
    pub api_version: String,
    pub kind: ResourceKind,
}

/// Spec of a `LevelPack` resource: an ordered collection of levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPackSpec {
    pub levels: Vec<Level>,
}

/// A required or suggested command, matched against player input.
///
/// A command satisfies the pattern when its verb matches `kind` and the
/// pattern's `args` (possibly empty) match the command's args
/// position-by-position as a prefix. Extra trailing args on the command are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPattern {
    pub kind: CommandKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl CommandPattern {
    /// Creates a pattern matching a kind with any arguments.
    pub fn kind(kind: CommandKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    /// Returns true if the command satisfies this pattern.
    pub fn matches(&self, command: &Command) -> bool {
        if command.kind() != Some(self.kind) {
            return false;
        }
        self.args
            .iter()
            .enumerate()
            .all(|(i, arg)| command.args.get(i) == Some(arg))
    }
}

/// The completion predicate of a level, expressed as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionRule {
    Simple(SimpleCompletion),
    Compound(CompoundCompletion),
}

/// True when any accepted command has the given verb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCompletion {
    pub uses: CommandKind,
}

/// Combines nested rules with all/any/not semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<CompletionRule>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<CompletionRule>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<CompletionRule>>,
}

impl CompletionRule {
    /// Creates a rule requiring one verb.
    pub fn uses(kind: CommandKind) -> Self {
        CompletionRule::Simple(SimpleCompletion { uses: kind })
    }

    /// Creates a rule requiring all of the given verbs.
    pub fn uses_all(kinds: &[CommandKind]) -> Self {
        CompletionRule::Compound(CompoundCompletion {
            all: Some(kinds.iter().copied().map(CompletionRule::uses).collect()),
            ..Default::default()
        })
    }

    /// Evaluates the rule against the accepted command history.
    pub fn evaluate(&self, history: &[Command]) -> bool {
        match self {
            CompletionRule::Simple(simple) => {
                history.iter().any(|c| c.kind() == Some(simple.uses))
            }
            CompletionRule::Compound(compound) => {
                if let Some(all) = &compound.all {
                    return all.iter().all(|rule| rule.evaluate(history));
                }
                if let Some(any) = &compound.any {
                    return any.iter().any(|rule| rule.evaluate(history));
                }
                if let Some(not) = &compound.not {
                    return !not.evaluate(history);
                }
                false
            }
        }
    }

    /// Returns true when the rule can be satisfied using only the given
    /// verbs. Used by the validator to catch levels whose completion rule
    /// references verbs their required commands never accept.
    pub fn satisfiable_with(&self, available: &[CommandKind]) -> bool {
        match self {
            CompletionRule::Simple(simple) => available.contains(&simple.uses),
            CompletionRule::Compound(compound) => {
                if let Some(all) = &compound.all {
                    return all.iter().all(|rule| rule.satisfiable_with(available));
                }
                if let Some(any) = &compound.any {
                    return any.iter().any(|rule| rule.satisfiable_with(available));
                }
                // Absence of a verb is always achievable.
                if compound.not.is_some() {
                    return true;
                }
                false
            }
        }
    }

    /// Returns true for a compound rule that specifies none of all/any/not.
    pub fn is_degenerate(&self) -> bool {
        match self {
            CompletionRule::Simple(_) => false,
            CompletionRule::Compound(compound) => {
                compound.all.is_none() && compound.any.is_none() && compound.not.is_none()
            }
        }
    }
}

/// Static definition of one level. Read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Positive, unique; defines the ordering and unlock sequence.
    pub id: u32,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Narrative text shown by the tutor character.
    #[serde(default)]
    pub story: String,

    /// Hint text shown when the player opens the hint panel.
    #[serde(default)]
    pub hint: String,

    /// State the session starts from.
    pub initial_state: RepoState,

    /// State shown to the player for orientation. Completion is decided by
    /// the completion rule, not by deep equality with this.
    pub target_state: RepoState,

    /// Suggested solution, shown by the UI.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_commands: Vec<CommandPattern>,

    /// Patterns an input command must satisfy to be accepted.
    pub required_commands: Vec<CommandPattern>,

    /// Predicate over the accepted command history.
    pub completion: CompletionRule,
}

impl Level {
    /// Returns true if the command satisfies any required-command pattern.
    pub fn accepts(&self, command: &Command) -> bool {
        self.required_commands.iter().any(|req| req.matches(command))
    }

    /// Returns the verbs accepted by this level's required commands.
    pub fn accepted_kinds(&self) -> Vec<CommandKind> {
        let mut kinds: Vec<CommandKind> =
            self.required_commands.iter().map(|r| r.kind).collect();
        kinds.dedup();
        kinds
    }
}
