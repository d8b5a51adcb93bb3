//! Game event broadcaster for streaming engine activity to a UI shell.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// An engine event a UI shell can react to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A git command was submitted (accepted or not).
    CommandRecorded {
        session_id: String,
        level_id: u32,
        command: String,
        accepted: bool,
        timestamp: DateTime<Utc>,
    },
    /// The active level's completion rule was first satisfied.
    LevelCompleted {
        session_id: String,
        level_id: u32,
        timestamp: DateTime<Utc>,
    },
    /// The hint panel was opened.
    HintUsed {
        level_id: u32,
        timestamp: DateTime<Utc>,
    },
    /// An achievement became unlocked.
    AchievementUnlocked {
        achievement_id: String,
        title: String,
        timestamp: DateTime<Utc>,
    },
}

/// Broadcasts game events to all subscribers.
#[derive(Clone)]
pub struct GameEventBroadcaster {
    sender: Arc<broadcast::Sender<GameEvent>>,
}

impl GameEventBroadcaster {
    /// Creates a broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends an event to all subscribers.
    pub fn send(&self, event: GameEvent) {
        // Ignore errors - no active receivers is fine
        let _ = self.sender.send(event);
    }

    /// Creates a new subscriber for game events.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }
}

impl Default for GameEventBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}
