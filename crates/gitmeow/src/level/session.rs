//! Per-level session: validates input against the level's required commands,
//! applies the reducer, and decides completion.

use uuid::Uuid;

use super::resource::Level;
use crate::command::{parse_line, Command, ParseOutcome};
use crate::sim::{reducer, RepoState};

/// Result of submitting one input line to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input. Nothing happens.
    Empty,
    /// Not a `git` line. Reported to the player as information; nothing is
    /// recorded and no state changes.
    NotGit,
    /// A git command that satisfies none of the level's required commands.
    /// Counts as an attempt; the simulated state is untouched.
    Rejected(Command),
    /// An accepted command: the reducer ran and the command joined the
    /// history. `completed` is true exactly once, on the submission that
    /// first satisfies the completion rule.
    Accepted {
        command: Command,
        completed: bool,
    },
}

/// One play-through of a level.
///
/// Owns the simulated repository state and the accepted-command history.
/// Created when the level starts, discarded when the session ends or the
/// level is reset.
pub struct LevelSession {
    session_id: String,
    level: Level,
    state: RepoState,
    history: Vec<Command>,
    completed: bool,
}

impl LevelSession {
    /// Starts a session with the state copied from the level definition.
    pub fn new(level: Level) -> Self {
        let state = level.initial_state.clone();
        Self {
            session_id: Uuid::new_v4().to_string(),
            level,
            state,
            history: Vec::new(),
            completed: false,
        }
    }

    /// Submits one input line.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let command = match parse_line(line) {
            ParseOutcome::Empty => return SubmitOutcome::Empty,
            ParseOutcome::NotGit => return SubmitOutcome::NotGit,
            ParseOutcome::Command(cmd) => cmd,
        };

        if !self.level.accepts(&command) {
            return SubmitOutcome::Rejected(command);
        }

        self.state = reducer::apply(&self.state, &command);
        self.history.push(command.clone());

        // The completion signal fires exactly once per session; resubmitting
        // after completion must not re-trigger it.
        let completed = if !self.completed && self.level.completion.evaluate(&self.history) {
            self.completed = true;
            true
        } else {
            false
        };

        SubmitOutcome::Accepted { command, completed }
    }

    /// Resets the session to the level's initial state.
    pub fn reset(&mut self) {
        self.state = self.level.initial_state.clone();
        self.history.clear();
        self.completed = false;
    }

    /// The unique id of this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The current simulated repository state.
    pub fn state(&self) -> &RepoState {
        &self.state
    }

    /// The accepted commands so far, in order.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// True once the completion rule has been satisfied.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;
    use crate::sim::tree::FileStatus;

    fn session_for(id: u32) -> LevelSession {
        let level = LevelCatalog::builtin().get(id).unwrap().clone();
        LevelSession::new(level)
    }

    #[test]
    fn test_level_one_end_to_end() {
        let mut session = session_for(1);
        assert_eq!(session.state().branch, "");

        let outcome = session.submit("git init");

        assert!(matches!(
            outcome,
            SubmitOutcome::Accepted {
                completed: true,
                ..
            }
        ));
        assert!(session.is_completed());
        assert_eq!(session.state().branch, "master");
        let root = &session.state().files[0];
        assert_eq!(root.name, "cat-album");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, ".git");
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut session = session_for(1);

        let first = session.submit("git init");
        let second = session.submit("git init");

        assert!(matches!(
            first,
            SubmitOutcome::Accepted {
                completed: true,
                ..
            }
        ));
        assert!(matches!(
            second,
            SubmitOutcome::Accepted {
                completed: false,
                ..
            }
        ));
        assert!(session.is_completed());
    }

    #[test]
    fn test_rejected_command_leaves_state_untouched() {
        let mut session = session_for(1);
        let before = session.state().clone();

        let outcome = session.submit("git commit -m nope");

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(session.state(), &before);
        assert!(session.history().is_empty());
        assert!(!session.is_completed());
    }

    #[test]
    fn test_non_git_line_is_not_recorded() {
        let mut session = session_for(1);

        assert_eq!(session.submit("ls -la"), SubmitOutcome::NotGit);
        assert_eq!(session.submit(""), SubmitOutcome::Empty);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_add_commit_status_flow() {
        let mut session = session_for(3);

        session.submit("git add cute-cat-1.jpg");
        assert_eq!(
            session.state().files[0].children[1].status,
            Some(FileStatus::Staged)
        );
        assert!(session.is_completed());
    }

    #[test]
    fn test_multi_command_level_requires_all() {
        let mut session = session_for(6);

        let first = session.submit("git branch special-photos");
        assert!(matches!(
            first,
            SubmitOutcome::Accepted {
                completed: false,
                ..
            }
        ));
        assert_eq!(session.state().branch, "special-photos");

        let second = session.submit("git checkout special-photos");
        assert!(matches!(
            second,
            SubmitOutcome::Accepted {
                completed: true,
                ..
            }
        ));
    }

    #[test]
    fn test_multi_command_level_order_independent() {
        let mut session = session_for(6);

        session.submit("git checkout special-photos");
        let outcome = session.submit("git branch special-photos");

        assert!(matches!(
            outcome,
            SubmitOutcome::Accepted {
                completed: true,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_message_reaches_state() {
        let mut session = session_for(4);

        session.submit(r#"git commit -m "msg""#);

        assert_eq!(session.state().message.as_deref(), Some("msg"));
        assert_eq!(
            session.state().files[0].children[1].status,
            Some(FileStatus::Committed)
        );
        assert!(session.is_completed());
    }

    #[test]
    fn test_unknown_verb_is_rejected() {
        let mut session = session_for(1);
        let outcome = session.submit("git frobnicate");
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    }

    #[test]
    fn test_reset_clears_session() {
        let mut session = session_for(1);
        session.submit("git init");
        assert!(session.is_completed());

        session.reset();

        assert!(!session.is_completed());
        assert!(session.history().is_empty());
        assert_eq!(session.state(), &session.level().initial_state);
    }

    #[test]
    fn test_history_keeps_raw_text() {
        let mut session = session_for(1);
        session.submit("git init");
        assert_eq!(session.history()[0].raw, "git init");
    }
}
