//! Local snapshot of the engine's state.
//!
//! Stores the full bookmark/category collections and the active filter for one
//! owner, so fallback state survives a restart. Loading a snapshot never
//! contacts the remote service.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::managers::state::BookmarkState;
use crate::types::bookmark::{Bookmark, BookmarkWithCategory};
use crate::types::category::Category;
use crate::types::errors::StoreError;

/// Categories inserted for an owner that has none yet.
pub const DEFAULT_CATEGORIES: [(&str, &str); 3] = [
    ("Work", "#3b82f6"),
    ("Personal", "#10b981"),
    ("Dev Tools", "#f59e0b"),
];

/// Snapshot store borrowing an open connection.
pub struct SnapshotStore<'a> {
    conn: &'a Connection,
}

impl<'a> SnapshotStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_time(value: String) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })
    }

    fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
            user_id: row.get(3)?,
            created_at: Self::parse_time(row.get(4)?)?,
            updated_at: Self::parse_time(row.get(5)?)?,
        })
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            favicon: row.get(4)?,
            category_id: row.get(5)?,
            user_id: row.get(6)?,
            created_at: Self::parse_time(row.get(7)?)?,
            updated_at: Self::parse_time(row.get(8)?)?,
        })
    }

    fn map_row_error(err: rusqlite::Error) -> StoreError {
        match err {
            rusqlite::Error::FromSqlConversionFailure(_, _, e) => {
                StoreError::SerializationError(e.to_string())
            }
            other => StoreError::DatabaseError(other.to_string()),
        }
    }

    /// Replaces the stored snapshot for `owner` with `state`, in one transaction.
    pub fn save(&self, owner: &str, state: &BookmarkState) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM bookmarks WHERE owner = ?1", params![owner])?;
        tx.execute("DELETE FROM categories WHERE owner = ?1", params![owner])?;

        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO categories (id, owner, name, color, user_id, position, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (position, c) in state.categories.iter().enumerate() {
                insert.execute(params![
                    c.id,
                    owner,
                    c.name,
                    c.color,
                    c.user_id,
                    position as i64,
                    c.created_at.to_rfc3339(),
                    c.updated_at.to_rfc3339(),
                ])?;
            }
        }

        {
            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO bookmarks \
                 (id, owner, title, url, description, favicon, category_id, user_id, position, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for (position, entry) in state.bookmarks.iter().enumerate() {
                let b = &entry.bookmark;
                insert.execute(params![
                    b.id,
                    owner,
                    b.title,
                    b.url,
                    b.description,
                    b.favicon,
                    b.category_id,
                    b.user_id,
                    position as i64,
                    b.created_at.to_rfc3339(),
                    b.updated_at.to_rfc3339(),
                ])?;
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO view_filter (owner, selected_category, search_query) VALUES (?1, ?2, ?3)",
            params![owner, state.selected_category, state.search_query],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Loads the snapshot for `owner`, bookmarks in their saved (newest-first) order.
    ///
    /// Category projections are re-resolved against the loaded categories.
    pub fn load(&self, owner: &str) -> Result<BookmarkState, StoreError> {
        let categories = self.load_categories(owner)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, title, url, description, favicon, category_id, user_id, created_at, updated_at \
             FROM bookmarks WHERE owner = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![owner], Self::row_to_bookmark)?;

        let mut bookmarks = Vec::new();
        for row in rows {
            let bookmark = row.map_err(Self::map_row_error)?;
            bookmarks.push(BookmarkWithCategory::resolve(bookmark, &categories));
        }

        let (selected_category, search_query) = self
            .conn
            .query_row(
                "SELECT selected_category, search_query FROM view_filter WHERE owner = ?1",
                params![owner],
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, String>(1)?)),
            )
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok((None, String::new())),
                other => Err(other),
            })?;

        Ok(BookmarkState {
            bookmarks,
            categories,
            selected_category,
            search_query,
        })
    }

    fn load_categories(&self, owner: &str) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, user_id, created_at, updated_at \
             FROM categories WHERE owner = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![owner], Self::row_to_category)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(Self::map_row_error)?);
        }
        Ok(results)
    }

    /// Inserts [`DEFAULT_CATEGORIES`] if `owner` has no categories.
    ///
    /// Returns the number of categories inserted.
    pub fn seed_default_categories(&self, owner: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE owner = ?1",
            params![owner],
            |row| row.get(0),
        )?;
        if count > 0 {
            return Ok(0);
        }

        let now = Utc::now().to_rfc3339();
        for (position, (name, color)) in DEFAULT_CATEGORIES.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO categories (id, owner, name, color, user_id, position, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    uuid::Uuid::new_v4().to_string(),
                    owner,
                    name,
                    color,
                    owner,
                    position as i64,
                    now,
                    now
                ],
            )?;
        }
        Ok(DEFAULT_CATEGORIES.len())
    }
}
