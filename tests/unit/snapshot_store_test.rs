//! Tests for the SQLite snapshot store.
//!
//! Every test runs against a fresh in-memory database with migrations applied.

#[path = "../support/mod.rs"]
mod support;

use linkvault::database::{Database, SnapshotStore};
use linkvault::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use linkvault::database::snapshot::DEFAULT_CATEGORIES;
use linkvault::managers::state::BookmarkState;
use rstest::rstest;
use tempfile::TempDir;

use support::{bookmark, category};

fn sample_state() -> BookmarkState {
    let categories = vec![category("c1", "Work"), category("c2", "Personal")];
    let bookmarks = vec![
        bookmark("b3", "Newest", Some("c2"), &categories),
        bookmark("b2", "Middle", None, &categories),
        bookmark("b1", "Oldest", Some("c1"), &categories),
    ];
    BookmarkState::new(bookmarks, categories)
}

#[test]
fn test_load_without_snapshot_is_empty() {
    let db = Database::open_in_memory().unwrap();
    let state = SnapshotStore::new(db.connection()).load("user1").unwrap();
    assert_eq!(state, BookmarkState::default());
}

#[test]
fn test_save_then_load_preserves_order_and_links() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    let state = sample_state();

    store.save("user1", &state).unwrap();
    let loaded = store.load("user1").unwrap();

    let ids: Vec<&str> = loaded.bookmarks.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec!["b3", "b2", "b1"]);
    let names: Vec<&str> = loaded.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Work", "Personal"]);
    assert_eq!(
        loaded.bookmarks[0].category.as_ref().map(|c| c.id.as_str()),
        Some("c2")
    );
    assert!(loaded.bookmarks[1].category.is_none());
}

#[test]
fn test_timestamps_survive_at_second_precision() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    let state = sample_state();

    store.save("user1", &state).unwrap();
    let loaded = store.load("user1").unwrap();

    assert_eq!(
        loaded.bookmarks[0].bookmark.created_at.timestamp(),
        state.bookmarks[0].bookmark.created_at.timestamp()
    );
}

#[rstest]
#[case(None, "")]
#[case(Some("c1"), "")]
#[case(None, "rust")]
#[case(Some("c2"), "news")]
fn test_filter_round_trips(#[case] selected: Option<&str>, #[case] query: &str) {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    let mut state = sample_state();
    state.selected_category = selected.map(str::to_string);
    state.search_query = query.to_string();

    store.save("user1", &state).unwrap();
    let loaded = store.load("user1").unwrap();

    assert_eq!(loaded.selected_category.as_deref(), selected);
    assert_eq!(loaded.search_query, query);
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    store.save("user1", &sample_state()).unwrap();

    let mut smaller = sample_state();
    smaller.bookmarks.truncate(1);
    smaller.categories.truncate(1);
    store.save("user1", &smaller).unwrap();

    let loaded = store.load("user1").unwrap();
    assert_eq!(loaded.bookmarks.len(), 1);
    assert_eq!(loaded.categories.len(), 1);
}

#[test]
fn test_owners_are_isolated() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    store.save("user1", &sample_state()).unwrap();

    let other = store.load("user2").unwrap();

    assert!(other.bookmarks.is_empty());
    assert!(other.categories.is_empty());
}

/// A bookmark whose category was not saved keeps its id but loads unresolved.
#[test]
fn test_dangling_category_reference_loads_unresolved() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    let categories = vec![category("c1", "Work")];
    let state = BookmarkState::new(
        vec![bookmark("b1", "Orphan", Some("gone"), &categories)],
        categories,
    );

    store.save("user1", &state).unwrap();
    let loaded = store.load("user1").unwrap();

    assert_eq!(loaded.bookmarks[0].bookmark.category_id.as_deref(), Some("gone"));
    assert!(loaded.bookmarks[0].category.is_none());
}

#[test]
fn test_seed_default_categories_only_once() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());

    assert_eq!(store.seed_default_categories("user1").unwrap(), DEFAULT_CATEGORIES.len());
    assert_eq!(store.seed_default_categories("user1").unwrap(), 0);

    let loaded = store.load("user1").unwrap();
    let names: Vec<&str> = loaded.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Work", "Personal", "Dev Tools"]);
    assert!(loaded.categories.iter().all(|c| c.user_id == "user1"));
}

#[test]
fn test_seed_skips_owner_with_categories() {
    let db = Database::open_in_memory().unwrap();
    let store = SnapshotStore::new(db.connection());
    store.save("user1", &sample_state()).unwrap();

    assert_eq!(store.seed_default_categories("user1").unwrap(), 0);
    assert_eq!(store.load("user1").unwrap().categories.len(), 2);
}

#[test]
fn test_snapshot_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linkvault.db");

    {
        let db = Database::open(&path).unwrap();
        SnapshotStore::new(db.connection()).save("user1", &sample_state()).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let loaded = SnapshotStore::new(db.connection()).load("user1").unwrap();
    assert_eq!(loaded.bookmarks.len(), 3);
}

#[test]
fn test_migrations_reach_current_version_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linkvault.db");

    {
        let db = Database::open(&path).unwrap();
        assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
    }

    let db = Database::open(&path).unwrap();
    let applied: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, CURRENT_SCHEMA_VERSION as i64);
}
