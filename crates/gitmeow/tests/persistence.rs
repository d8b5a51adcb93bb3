//! Progress survives a restart through the SQLite-backed profile blob.

use std::sync::Arc;
use std::time::Duration;

use gitmeow::db::{profile_repo, Database};
use gitmeow::{Game, LevelCatalog, Profile, ProgressStore, STORAGE_KEY};
use tempfile::TempDir;

fn store_for(catalog: &LevelCatalog, db: &Database) -> Arc<ProgressStore> {
    let ids = catalog.levels().iter().map(|l| l.id).collect::<Vec<_>>();
    let store = Arc::new(ProgressStore::new(Profile::with_levels(ids)));
    store.set_database(db.clone());
    store.load_from_database();
    store
}

#[test]
fn progress_round_trips_through_database_file() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("gitmeow.db");

    // First session: complete level 1 and use a hint.
    {
        let db = Database::open(&db_path).unwrap();
        let catalog = LevelCatalog::builtin();
        let store = store_for(&catalog, &db);
        let mut game =
            Game::new(catalog, store).with_flush_interval(Duration::from_secs(3600));

        game.start_level(1).unwrap();
        game.use_hint().unwrap();
        game.submit("git init").unwrap();
        game.end_level();
    }

    // Second session against the same file: state is restored.
    {
        let db = Database::open(&db_path).unwrap();
        let catalog = LevelCatalog::builtin();
        let store = store_for(&catalog, &db);
        let mut game =
            Game::new(catalog, store).with_flush_interval(Duration::from_secs(3600));

        let profile = game.store().snapshot();
        assert!(profile.level(1).unwrap().completed);
        assert_eq!(profile.level(1).unwrap().hints, 1);
        assert_eq!(profile.current_level, 2);

        // The unlock ordering resumes where the player left off.
        assert!(game.is_unlocked(2));
        assert!(game.start_level(2).is_ok());
        assert!(matches!(game.start_level(4), Err(_)));
    }
}

#[test]
fn persisted_blob_lives_under_the_fixed_key() {
    let db = Database::open_in_memory().unwrap();
    let catalog = LevelCatalog::builtin();
    let store = store_for(&catalog, &db);

    store.record_command(1, "git init");

    let blob = profile_repo::get(&db, STORAGE_KEY).unwrap();
    let blob = blob.expect("profile blob persisted");
    let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert!(parsed.get("levels").is_some());
    assert!(parsed.get("lastCompletedLevel").is_some());
    assert!(parsed.get("totalTimeSpent").is_some());
}

#[test]
fn reset_clears_the_saved_blob_content() {
    let db = Database::open_in_memory().unwrap();
    let catalog = LevelCatalog::builtin();
    let store = store_for(&catalog, &db);

    store.complete_level(1);
    let ids = catalog.levels().iter().map(|l| l.id).collect::<Vec<_>>();
    store.reset(Profile::with_levels(ids));

    // Reload into a fresh store: the reset state is what persisted.
    let other = store_for(&catalog, &db);
    assert_eq!(other.snapshot().completed_count(), 0);
}
