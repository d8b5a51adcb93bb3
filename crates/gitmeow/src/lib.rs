pub mod broadcast;
pub mod command;
pub mod db;
pub mod error;
pub mod game;
pub mod level;
pub mod progress;
pub mod sim;

pub use broadcast::{GameEvent, GameEventBroadcaster};
pub use command::{parse_line, Command, CommandKind, ParseOutcome};
pub use error::{GitMeowError, Result};
pub use game::{Game, GameError};
pub use level::{
    Level, LevelCatalog, LevelError, LevelSession, PackLoader, PackValidator, SubmitOutcome,
};
pub use progress::{LevelProgress, Profile, ProgressStore, TimeTracker, ACHIEVEMENTS, STORAGE_KEY};
pub use sim::{FileNode, FileStatus, NodeKind, RepoState};
