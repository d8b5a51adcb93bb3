//! Parser for lines typed into the simulated terminal.
//!
//! Input is split on whitespace with shell-style quote grouping. A line that
//! does not start with the literal token `git` is classified as
//! [`ParseOutcome::NotGit`] — an informational outcome, not an error.

use serde::{Deserialize, Serialize};

/// The git verbs the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    Init,
    Add,
    Commit,
    Branch,
    Merge,
    Push,
    Pull,
    Checkout,
    Status,
    Log,
    Reset,
    Revert,
    Stash,
    Tag,
    Remote,
    Fetch,
    Clone,
    Rebase,
    CherryPick,
    Submodule,
}

impl CommandKind {
    /// Returns all known verbs.
    pub fn all() -> &'static [CommandKind] {
        &[
            CommandKind::Init,
            CommandKind::Add,
            CommandKind::Commit,
            CommandKind::Branch,
            CommandKind::Merge,
            CommandKind::Push,
            CommandKind::Pull,
            CommandKind::Checkout,
            CommandKind::Status,
            CommandKind::Log,
            CommandKind::Reset,
            CommandKind::Revert,
            CommandKind::Stash,
            CommandKind::Tag,
            CommandKind::Remote,
            CommandKind::Fetch,
            CommandKind::Clone,
            CommandKind::Rebase,
            CommandKind::CherryPick,
            CommandKind::Submodule,
        ]
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CommandKind::Init => "init",
            CommandKind::Add => "add",
            CommandKind::Commit => "commit",
            CommandKind::Branch => "branch",
            CommandKind::Merge => "merge",
            CommandKind::Push => "push",
            CommandKind::Pull => "pull",
            CommandKind::Checkout => "checkout",
            CommandKind::Status => "status",
            CommandKind::Log => "log",
            CommandKind::Reset => "reset",
            CommandKind::Revert => "revert",
            CommandKind::Stash => "stash",
            CommandKind::Tag => "tag",
            CommandKind::Remote => "remote",
            CommandKind::Fetch => "fetch",
            CommandKind::Clone => "clone",
            CommandKind::Rebase => "rebase",
            CommandKind::CherryPick => "cherry-pick",
            CommandKind::Submodule => "submodule",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(CommandKind::Init),
            "add" => Ok(CommandKind::Add),
            "commit" => Ok(CommandKind::Commit),
            "branch" => Ok(CommandKind::Branch),
            "merge" => Ok(CommandKind::Merge),
            "push" => Ok(CommandKind::Push),
            "pull" => Ok(CommandKind::Pull),
            "checkout" => Ok(CommandKind::Checkout),
            "status" => Ok(CommandKind::Status),
            "log" => Ok(CommandKind::Log),
            "reset" => Ok(CommandKind::Reset),
            "revert" => Ok(CommandKind::Revert),
            "stash" => Ok(CommandKind::Stash),
            "tag" => Ok(CommandKind::Tag),
            "remote" => Ok(CommandKind::Remote),
            "fetch" => Ok(CommandKind::Fetch),
            "clone" => Ok(CommandKind::Clone),
            "rebase" => Ok(CommandKind::Rebase),
            "cherry-pick" => Ok(CommandKind::CherryPick),
            "submodule" => Ok(CommandKind::Submodule),
            _ => Err(format!("Unknown git verb: {}", s)),
        }
    }
}

/// The verb position of a parsed command.
///
/// Unknown verbs are carried through as their literal token so that
/// requirement matching can fail gracefully instead of the parser erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Known(CommandKind),
    Other(String),
}

impl Verb {
    /// Returns the known kind, if this verb is one.
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            Verb::Known(kind) => Some(*kind),
            Verb::Other(_) => None,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verb::Known(kind) => write!(f, "{}", kind),
            Verb::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One parsed command from the simulated terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The verb after `git`.
    pub verb: Verb,
    /// The literal input line, kept for history display.
    pub raw: String,
    /// Tokens after the verb, in input order, quotes stripped.
    pub args: Vec<String>,
}

impl Command {
    /// Returns the known kind of this command, if the verb is recognized.
    pub fn kind(&self) -> Option<CommandKind> {
        self.verb.kind()
    }

    /// Returns true if an argument equals the given flag (e.g. `-m`).
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Returns the token following the given flag, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let pos = self.args.iter().position(|a| a == flag)?;
        self.args.get(pos + 1).map(String::as_str)
    }

    /// Returns the first argument that is not a flag.
    pub fn first_positional(&self) -> Option<&str> {
        self.args
            .iter()
            .find(|a| !a.starts_with('-'))
            .map(String::as_str)
    }
}

/// Result of parsing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The line was blank.
    Empty,
    /// The line does not start with `git` (or names no verb).
    NotGit,
    /// A structured command.
    Command(Command),
}

/// Parses one input line. Pure function, no side effects.
pub fn parse_line(line: &str) -> ParseOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Empty;
    }

    let tokens = tokenize(trimmed);
    if tokens.first().map(String::as_str) != Some("git") {
        return ParseOutcome::NotGit;
    }
    let Some(verb_token) = tokens.get(1) else {
        return ParseOutcome::NotGit;
    };

    let verb = match verb_token.parse::<CommandKind>() {
        Ok(kind) => Verb::Known(kind),
        Err(_) => Verb::Other(verb_token.clone()),
    };

    ParseOutcome::Command(Command {
        verb,
        raw: trimmed.to_string(),
        args: tokens[2..].to_vec(),
    })
}

/// Splits a line on whitespace, grouping double- or single-quoted segments
/// into a single token with the quotes stripped. An unterminated quote runs
/// to the end of the line.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                    in_token = true;
                } else if ch.is_whitespace() {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                } else {
                    current.push(ch);
                    in_token = true;
                }
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_command(line: &str) -> Command {
        match parse_line(line) {
            ParseOutcome::Command(cmd) => cmd,
            other => panic!("expected a command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_command() {
        let cmd = parse_command("git init");
        assert_eq!(cmd.kind(), Some(CommandKind::Init));
        assert_eq!(cmd.raw, "git init");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_command_with_args() {
        let cmd = parse_command("git add cute-cat-1.jpg");
        assert_eq!(cmd.kind(), Some(CommandKind::Add));
        assert_eq!(cmd.args, vec!["cute-cat-1.jpg"]);
        assert_eq!(cmd.first_positional(), Some("cute-cat-1.jpg"));
    }

    #[test]
    fn test_parse_quoted_message() {
        let cmd = parse_command(r#"git commit -m "add first cat photo""#);
        assert_eq!(cmd.kind(), Some(CommandKind::Commit));
        assert_eq!(cmd.args, vec!["-m", "add first cat photo"]);
        assert_eq!(cmd.flag_value("-m"), Some("add first cat photo"));
    }

    #[test]
    fn test_parse_single_quotes() {
        let cmd = parse_command("git commit -m 'fix title'");
        assert_eq!(cmd.flag_value("-m"), Some("fix title"));
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let cmd = parse_command(r#"git commit -m "half done"#);
        assert_eq!(cmd.args, vec!["-m", "half done"]);
    }

    #[test]
    fn test_unknown_verb_is_carried_through() {
        let cmd = parse_command("git frobnicate now");
        assert_eq!(cmd.kind(), None);
        assert_eq!(cmd.verb, Verb::Other("frobnicate".to_string()));
        assert_eq!(cmd.args, vec!["now"]);
    }

    #[test]
    fn test_non_git_line() {
        assert_eq!(parse_line("ls -la"), ParseOutcome::NotGit);
        assert_eq!(parse_line("github status"), ParseOutcome::NotGit);
    }

    #[test]
    fn test_bare_git_has_no_verb() {
        assert_eq!(parse_line("git"), ParseOutcome::NotGit);
        assert_eq!(parse_line("  git  "), ParseOutcome::NotGit);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_line(""), ParseOutcome::Empty);
        assert_eq!(parse_line("   "), ParseOutcome::Empty);
    }

    #[test]
    fn test_cherry_pick_round_trip() {
        let cmd = parse_command("git cherry-pick abc1234");
        assert_eq!(cmd.kind(), Some(CommandKind::CherryPick));
        assert_eq!(CommandKind::CherryPick.to_string(), "cherry-pick");
        assert_eq!("cherry-pick".parse::<CommandKind>(), Ok(CommandKind::CherryPick));
    }

    #[test]
    fn test_flag_helpers() {
        let cmd = parse_command("git push -u origin master");
        assert!(cmd.has_flag("-u"));
        assert!(!cmd.has_flag("--force"));
        assert_eq!(cmd.flag_value("-u"), Some("origin"));
        assert_eq!(cmd.first_positional(), Some("origin"));
    }

    #[test]
    fn test_flag_at_end_has_no_value() {
        let cmd = parse_command("git commit -m");
        assert_eq!(cmd.flag_value("-m"), None);
    }
}
