//! The persisted player profile.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded command with its wall-clock timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    pub command: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-level player progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level_id: u32,

    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Accumulated seconds spent in this level.
    #[serde(default)]
    pub time_spent: u64,

    /// Number of recorded commands.
    #[serde(default)]
    pub command_count: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command_history: Vec<CommandRecord>,

    /// Submitted commands that were not useful for completion.
    #[serde(default)]
    pub attempts: u32,

    /// Times the hint panel was opened.
    #[serde(default)]
    pub hints: u32,
}

impl LevelProgress {
    /// Creates zeroed progress for a level.
    pub fn new(level_id: u32) -> Self {
        Self {
            level_id,
            completed: false,
            completed_at: None,
            time_spent: 0,
            command_count: 0,
            command_history: Vec::new(),
            attempts: 0,
            hints: 0,
        }
    }
}

/// A persisted achievement unlock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: String,
    pub title: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Cross-level player state, serialized as a single JSON blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// The level the player is currently on.
    pub current_level: u32,

    /// Per-level progress, keyed by level id.
    #[serde(default)]
    pub levels: BTreeMap<u32, LevelProgress>,

    /// Unlocked achievements, keyed by achievement id.
    #[serde(default)]
    pub achievements: BTreeMap<String, UnlockedAchievement>,

    /// Highest completed level id, 0 when none.
    #[serde(default)]
    pub last_completed_level: u32,

    /// Sum of time spent across all levels, in seconds.
    #[serde(default)]
    pub total_time_spent: u64,

    pub last_played_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a fresh profile with zeroed progress for the given level ids.
    pub fn with_levels(level_ids: impl IntoIterator<Item = u32>) -> Self {
        let levels = level_ids
            .into_iter()
            .map(|id| (id, LevelProgress::new(id)))
            .collect();
        Self {
            current_level: 1,
            levels,
            achievements: BTreeMap::new(),
            last_completed_level: 0,
            total_time_spent: 0,
            last_played_at: Utc::now(),
        }
    }

    /// Returns the progress for a level, if initialized.
    pub fn level(&self, level_id: u32) -> Option<&LevelProgress> {
        self.levels.get(&level_id)
    }

    /// Returns mutable progress for a level, initializing it if needed.
    pub fn level_mut(&mut self, level_id: u32) -> &mut LevelProgress {
        self.levels
            .entry(level_id)
            .or_insert_with(|| LevelProgress::new(level_id))
    }

    /// Number of completed levels.
    pub fn completed_count(&self) -> usize {
        self.levels.values().filter(|l| l.completed).count()
    }

    /// Returns true if the achievement with the given id is unlocked.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_profile() {
        let profile = Profile::with_levels(1..=3);
        assert_eq!(profile.current_level, 1);
        assert_eq!(profile.levels.len(), 3);
        assert_eq!(profile.completed_count(), 0);
        assert_eq!(profile.last_completed_level, 0);
        assert!(profile.achievements.is_empty());
    }

    #[test]
    fn test_level_mut_initializes_missing() {
        let mut profile = Profile::with_levels([]);
        assert!(profile.level(7).is_none());
        profile.level_mut(7).attempts += 1;
        assert_eq!(profile.level(7).unwrap().attempts, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut profile = Profile::with_levels(1..=2);
        {
            let one = profile.level_mut(1);
            one.completed = true;
            one.completed_at = Some(Utc::now());
            one.command_history.push(CommandRecord {
                command: "git init".to_string(),
                timestamp: Utc::now(),
            });
            one.command_count = 1;
        }
        profile.last_completed_level = 1;
        profile.current_level = 2;

        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();

        assert_eq!(back.current_level, 2);
        assert_eq!(back.last_completed_level, 1);
        assert!(back.level(1).unwrap().completed);
        assert_eq!(back.level(1).unwrap().command_history.len(), 1);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let profile = Profile::with_levels(1..=1);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("currentLevel"));
        assert!(json.contains("lastCompletedLevel"));
        assert!(json.contains("totalTimeSpent"));
        assert!(json.contains("lastPlayedAt"));
    }
}
