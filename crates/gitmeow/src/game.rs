//! The cross-level game controller.
//!
//! Owns the catalog, the progress store, the event broadcaster, and the
//! active level session with its time tracker. UI shells drive everything
//! through this type; nothing here is a global.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use crate::broadcast::{GameEvent, GameEventBroadcaster};
use crate::level::{LevelCatalog, LevelSession, SubmitOutcome};
use crate::progress::achievements::AchievementDef;
use crate::progress::time_tracker::DEFAULT_FLUSH_INTERVAL;
use crate::progress::{ProgressStore, TimeTracker};

/// Errors from game control operations.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Level {0} not found")]
    LevelNotFound(u32),

    #[error("Level {id} is locked until level {requires} is completed")]
    LevelLocked { id: u32, requires: u32 },

    #[error("No active level session")]
    NoActiveSession,
}

/// The game engine facade.
pub struct Game {
    catalog: LevelCatalog,
    store: Arc<ProgressStore>,
    events: GameEventBroadcaster,
    session: Option<LevelSession>,
    tracker: Option<TimeTracker>,
    flush_interval: Duration,
}

impl Game {
    /// Creates a game over the given catalog and store.
    pub fn new(catalog: LevelCatalog, store: Arc<ProgressStore>) -> Self {
        Self {
            catalog,
            store,
            events: GameEventBroadcaster::default(),
            session: None,
            tracker: None,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    /// Overrides the time-flush interval (mainly for tests and shells with
    /// their own cadence).
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// The level catalog.
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// The progress store.
    pub fn store(&self) -> &Arc<ProgressStore> {
        &self.store
    }

    /// The event broadcaster; subscribe for UI updates.
    pub fn events(&self) -> &GameEventBroadcaster {
        &self.events
    }

    /// The active session, if a level is being played.
    pub fn session(&self) -> Option<&LevelSession> {
        self.session.as_ref()
    }

    /// Returns true if the level is playable: the first level always is,
    /// every other level requires its predecessor completed.
    pub fn is_unlocked(&self, level_id: u32) -> bool {
        if level_id <= 1 {
            return level_id == 1;
        }
        self.store
            .snapshot()
            .level(level_id - 1)
            .is_some_and(|l| l.completed)
    }

    /// Starts a level session, ending any previous one (with a time flush).
    pub fn start_level(&mut self, level_id: u32) -> Result<&LevelSession, GameError> {
        let level = self
            .catalog
            .get(level_id)
            .ok_or(GameError::LevelNotFound(level_id))?
            .clone();

        if !self.is_unlocked(level_id) {
            return Err(GameError::LevelLocked {
                id: level_id,
                requires: level_id - 1,
            });
        }

        self.end_level();

        self.tracker = Some(TimeTracker::start(
            Arc::clone(&self.store),
            level_id,
            self.flush_interval,
        ));

        log::info!("Started level {} ({})", level_id, level.title);
        Ok(self.session.insert(LevelSession::new(level)))
    }

    /// Submits one input line to the active session and applies the
    /// progress-tracking rules to the outcome.
    pub fn submit(&mut self, line: &str) -> Result<SubmitOutcome, GameError> {
        let session = self.session.as_mut().ok_or(GameError::NoActiveSession)?;
        let level_id = session.level().id;
        let session_id = session.session_id().to_string();

        let outcome = session.submit(line);

        match &outcome {
            SubmitOutcome::Empty | SubmitOutcome::NotGit => {}
            SubmitOutcome::Rejected(command) => {
                self.announce(self.store.record_command(level_id, &command.raw));
                self.events.send(GameEvent::CommandRecorded {
                    session_id,
                    level_id,
                    command: command.raw.clone(),
                    accepted: false,
                    timestamp: Utc::now(),
                });
                self.announce(self.store.increment_attempts(level_id));
            }
            SubmitOutcome::Accepted { command, completed } => {
                self.announce(self.store.record_command(level_id, &command.raw));
                self.events.send(GameEvent::CommandRecorded {
                    session_id: session_id.clone(),
                    level_id,
                    command: command.raw.clone(),
                    accepted: true,
                    timestamp: Utc::now(),
                });

                if *completed {
                    self.announce(self.store.complete_level(level_id));
                    self.events.send(GameEvent::LevelCompleted {
                        session_id,
                        level_id,
                        timestamp: Utc::now(),
                    });
                } else {
                    // A valid command that does not yet finish the level
                    // still counts as an attempt.
                    self.announce(self.store.increment_attempts(level_id));
                }
            }
        }

        Ok(outcome)
    }

    /// Records an opening of the hint panel for the active level.
    pub fn use_hint(&mut self) -> Result<(), GameError> {
        let session = self.session.as_ref().ok_or(GameError::NoActiveSession)?;
        let level_id = session.level().id;

        self.announce(self.store.increment_hints(level_id));
        self.events.send(GameEvent::HintUsed {
            level_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Resets the active session back to the level's initial state. Counters
    /// already recorded for the level are kept.
    pub fn reset_level(&mut self) -> Result<(), GameError> {
        let session = self.session.as_mut().ok_or(GameError::NoActiveSession)?;
        session.reset();
        Ok(())
    }

    /// Ends the active session, flushing remaining played time.
    pub fn end_level(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
        self.session = None;
    }

    fn announce(&self, unlocked: Vec<&'static AchievementDef>) {
        for def in unlocked {
            log::info!("Achievement unlocked: {}", def.id);
            self.events.send(GameEvent::AchievementUnlocked {
                achievement_id: def.id.to_string(),
                title: def.title.to_string(),
                timestamp: Utc::now(),
            });
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.end_level();
    }
}
