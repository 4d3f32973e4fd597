//! Linkvault database layer.
//!
//! Keeps a SQLite snapshot of local bookmark state between sessions.
//!
//! # Usage
//!
//! ```no_run
//! use linkvault::database::{Database, SnapshotStore};
//! use linkvault::managers::state::BookmarkState;
//!
//! let db = Database::open("linkvault.db").expect("failed to open database");
//! let store = SnapshotStore::new(db.connection());
//! store.save("local-user", &BookmarkState::default()).expect("failed to save");
//! let state = store.load("local-user").expect("failed to load");
//! ```

pub mod connection;
pub mod migrations;
pub mod snapshot;

pub use connection::Database;
pub use snapshot::SnapshotStore;
