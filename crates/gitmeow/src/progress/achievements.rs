//! Achievement definitions and unlock predicates.
//!
//! Definitions are compiled-in static data; only unlock timestamps are
//! persisted (per achievement id in the profile). Predicates are pure
//! functions over the accumulated profile and are re-evaluated after every
//! tracked event; unlocking twice is a no-op handled by the store.

use std::collections::HashSet;

use super::profile::Profile;

/// Achievement ids.
pub mod ids {
    pub const FIRST_INIT: &str = "first-init";
    pub const FIRST_COMMIT: &str = "first-commit";
    pub const SPEED_RUNNER: &str = "speed-runner";
    pub const NO_HINT_MASTER: &str = "no-hint-master";
    pub const PERFECT_LEVEL: &str = "perfect-level";
    pub const COMMAND_MASTER: &str = "command-master";
    pub const ALL_LEVELS: &str = "all-levels";
    pub const CONTINUOUS_LEARNING: &str = "continuous-learning";
}

/// Distinct commands needed for `command-master`.
const COMMAND_MASTER_THRESHOLD: usize = 20;

/// Completing a level within this many seconds earns `speed-runner`.
const SPEED_RUN_SECONDS: u64 = 180;

/// Distinct completion days needed for `continuous-learning`.
const LEARNING_STREAK_DAYS: usize = 3;

/// A compiled-in achievement definition.
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: fn(&Profile) -> bool,
}

/// All achievements, in display order.
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: ids::FIRST_INIT,
        title: "Starting from zero",
        description: "Create your first Git repository",
        icon: "🎉",
        condition: |p| p.level(1).is_some_and(|l| l.completed),
    },
    AchievementDef {
        id: ids::FIRST_COMMIT,
        title: "First commit",
        description: "Make your first commit",
        icon: "📝",
        condition: |p| p.level(4).is_some_and(|l| l.completed),
    },
    AchievementDef {
        id: ids::SPEED_RUNNER,
        title: "Speed runner",
        description: "Complete a level within 3 minutes",
        icon: "⚡",
        condition: |p| {
            p.levels
                .values()
                .any(|l| l.completed && l.time_spent <= SPEED_RUN_SECONDS)
        },
    },
    AchievementDef {
        id: ids::NO_HINT_MASTER,
        title: "No hints needed",
        description: "Complete a level without using any hints",
        icon: "🎯",
        condition: |p| p.levels.values().any(|l| l.completed && l.hints == 0),
    },
    AchievementDef {
        id: ids::PERFECT_LEVEL,
        title: "Flawless",
        description: "Complete a level on a single attempt",
        icon: "💎",
        condition: |p| p.levels.values().any(|l| l.completed && l.attempts == 1),
    },
    AchievementDef {
        id: ids::COMMAND_MASTER,
        title: "Command master",
        description: "Use 20 different Git commands",
        icon: "🎮",
        condition: |p| unique_command_count(p) >= COMMAND_MASTER_THRESHOLD,
    },
    AchievementDef {
        id: ids::ALL_LEVELS,
        title: "Completionist",
        description: "Complete every level",
        icon: "👑",
        condition: |p| !p.levels.is_empty() && p.levels.values().all(|l| l.completed),
    },
    AchievementDef {
        id: ids::CONTINUOUS_LEARNING,
        title: "Continuous learning",
        description: "Complete levels on three different days",
        icon: "📚",
        condition: |p| {
            let days: HashSet<String> = p
                .levels
                .values()
                .filter_map(|l| l.completed_at)
                .map(|at| at.format("%Y-%m-%d").to_string())
                .collect();
            days.len() >= LEARNING_STREAK_DAYS
        },
    },
];

/// Counts distinct command texts across every level's history.
fn unique_command_count(profile: &Profile) -> usize {
    profile
        .levels
        .values()
        .flat_map(|l| l.command_history.iter())
        .map(|record| record.command.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Returns the definition for an achievement id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Returns achievements whose condition now holds but which are not yet
/// unlocked in the profile.
pub fn evaluate(profile: &Profile) -> Vec<&'static AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !profile.has_achievement(a.id) && (a.condition)(profile))
        .collect()
}
