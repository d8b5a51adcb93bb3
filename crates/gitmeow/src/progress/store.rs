//! Progress store: in-memory profile cache with persist-on-mutation.
//!
//! Every mutator updates the cached profile, re-evaluates achievement
//! predicates, persists the whole blob, and returns the achievements that
//! became unlocked by that mutation. Persistence failures are logged, never
//! surfaced to the submit path.

use std::sync::RwLock;

use chrono::Utc;

use super::achievements::{self, AchievementDef};
use super::profile::{CommandRecord, Profile, UnlockedAchievement};
use crate::db::{profile_repo, Database};

/// Fixed key the profile blob is stored under.
pub const STORAGE_KEY: &str = "gitmeow-progress";

/// Thread-safe owner of the persisted player profile.
pub struct ProgressStore {
    /// Database handle (clone is cheap — inner `Arc`).
    db: RwLock<Option<Database>>,
    /// The cached profile; source of truth between persists.
    profile: RwLock<Profile>,
}

impl ProgressStore {
    /// Creates a store over a fresh profile.
    pub fn new(profile: Profile) -> Self {
        Self {
            db: RwLock::new(None),
            profile: RwLock::new(profile),
        }
    }

    /// Sets the database connection.
    pub fn set_database(&self, db: Database) {
        let mut guard = match self.db.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Progress store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = Some(db);
    }

    /// Gets a cloned database handle if available.
    fn database(&self) -> Option<Database> {
        let guard = match self.db.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Progress store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clone()
    }

    /// Replaces the cached profile with the persisted blob, if one exists
    /// and parses. A missing or unreadable blob keeps the current profile.
    pub fn load_from_database(&self) {
        let Some(db) = self.database() else {
            return;
        };

        let json = match profile_repo::get(&db, STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to read saved progress: {}", e);
                return;
            }
        };

        match serde_json::from_str::<Profile>(&json) {
            Ok(profile) => {
                *self.profile_write() = profile;
                log::info!("Loaded saved progress from database");
            }
            Err(e) => {
                log::warn!("Saved progress is unreadable, starting fresh: {}", e);
            }
        }
    }

    /// Returns a copy of the current profile.
    pub fn snapshot(&self) -> Profile {
        self.profile_read().clone()
    }

    /// Records a submitted command (accepted or not) for a level.
    pub fn record_command(&self, level_id: u32, command: &str) -> Vec<&'static AchievementDef> {
        self.mutate(|profile| {
            let level = profile.level_mut(level_id);
            level.command_count += 1;
            level.command_history.push(CommandRecord {
                command: command.to_string(),
                timestamp: Utc::now(),
            });
        })
    }

    /// Counts a command that was not useful for completion.
    pub fn increment_attempts(&self, level_id: u32) -> Vec<&'static AchievementDef> {
        self.mutate(|profile| {
            profile.level_mut(level_id).attempts += 1;
        })
    }

    /// Counts an opening of the hint panel.
    pub fn increment_hints(&self, level_id: u32) -> Vec<&'static AchievementDef> {
        self.mutate(|profile| {
            profile.level_mut(level_id).hints += 1;
        })
    }

    /// Adds elapsed seconds to a level and to the running total.
    pub fn add_time_spent(&self, level_id: u32, seconds: u64) -> Vec<&'static AchievementDef> {
        self.mutate(|profile| {
            profile.level_mut(level_id).time_spent += seconds;
            profile.total_time_spent += seconds;
        })
    }

    /// Marks a level completed. Idempotent: a second call for the same
    /// level changes nothing.
    pub fn complete_level(&self, level_id: u32) -> Vec<&'static AchievementDef> {
        self.mutate(|profile| {
            let level = profile.level_mut(level_id);
            if level.completed {
                return;
            }
            level.completed = true;
            level.completed_at = Some(Utc::now());

            if level_id > profile.last_completed_level {
                profile.last_completed_level = level_id;
            }
            let highest = profile.levels.keys().max().copied().unwrap_or(level_id);
            profile.current_level = (level_id + 1).min(highest);
        })
    }

    /// Replaces all progress with the given fresh profile and persists it.
    pub fn reset(&self, fresh: Profile) {
        *self.profile_write() = fresh;
        self.persist();
        log::info!("Progress reset");
    }

    /// Applies a mutation, stamps `last_played_at`, records any newly
    /// satisfied achievements, persists, and returns the new unlocks.
    fn mutate<F>(&self, f: F) -> Vec<&'static AchievementDef>
    where
        F: FnOnce(&mut Profile),
    {
        let newly = {
            let mut profile = self.profile_write();
            f(&mut profile);
            profile.last_played_at = Utc::now();

            let newly = achievements::evaluate(&profile);
            for def in &newly {
                profile.achievements.insert(
                    def.id.to_string(),
                    UnlockedAchievement {
                        id: def.id.to_string(),
                        title: def.title.to_string(),
                        unlocked_at: Utc::now(),
                    },
                );
            }
            newly
        };

        self.persist();
        newly
    }

    /// Writes the whole profile blob to the database, if one is attached.
    fn persist(&self) {
        let Some(db) = self.database() else {
            return;
        };

        let json = match serde_json::to_string(&*self.profile_read()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize progress: {}", e);
                return;
            }
        };

        if let Err(e) = profile_repo::set(&db, STORAGE_KEY, &json) {
            log::error!("Failed to persist progress: {}", e);
        }
    }

    fn profile_read(&self) -> std::sync::RwLockReadGuard<'_, Profile> {
        match self.profile.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Progress store profile lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn profile_write(&self) -> std::sync::RwLockWriteGuard<'_, Profile> {
        match self.profile.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Progress store profile lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
