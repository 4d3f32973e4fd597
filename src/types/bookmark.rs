use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Represents a saved bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bookmark joined with its resolved category.
///
/// The `category` field is a projection of `bookmark.category_id` against the
/// current category collection. It is `None` both for uncategorized bookmarks
/// and for dangling references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkWithCategory {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl BookmarkWithCategory {
    /// Joins `bookmark` with the matching entry of `categories`, if any.
    pub fn resolve(bookmark: Bookmark, categories: &[Category]) -> Self {
        let category = resolve_category(bookmark.category_id.as_deref(), categories);
        Self { bookmark, category }
    }

    pub fn id(&self) -> &str {
        &self.bookmark.id
    }

    /// Drops the category link and its projection together.
    pub fn unlink_category(&mut self) {
        self.bookmark.category_id = None;
        self.category = None;
    }
}

/// Looks up `category_id` in `categories`.
pub fn resolve_category(category_id: Option<&str>, categories: &[Category]) -> Option<Category> {
    let id = category_id?;
    categories.iter().find(|c| c.id == id).cloned()
}

/// Input for creating a bookmark. Title and URL are expected to be trimmed
/// and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl NewBookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: None,
            category_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

/// Full replacement of a bookmark's editable fields.
///
/// Same shape as [`NewBookmark`]: absent optionals clear the stored value.
pub type BookmarkUpdate = NewBookmark;
