//! In-memory state owned by the reconciliation engine.
//!
//! All transitions are synchronous methods on `&mut BookmarkState`, so each
//! one is applied completely before any other operation can observe it.

use serde::{Deserialize, Serialize};

use crate::managers::filter::is_visible;
use crate::types::bookmark::{resolve_category, BookmarkWithCategory};
use crate::types::category::Category;

/// Bookmarks (newest first), categories (insertion order) and the active filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkState {
    pub bookmarks: Vec<BookmarkWithCategory>,
    pub categories: Vec<Category>,
    pub selected_category: Option<String>,
    pub search_query: String,
}

impl BookmarkState {
    pub fn new(bookmarks: Vec<BookmarkWithCategory>, categories: Vec<Category>) -> Self {
        Self {
            bookmarks,
            categories,
            ..Self::default()
        }
    }

    pub fn find_bookmark(&self, id: &str) -> Option<&BookmarkWithCategory> {
        self.bookmarks.iter().find(|b| b.id() == id)
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn prepend_bookmark(&mut self, bookmark: BookmarkWithCategory) {
        self.bookmarks.insert(0, bookmark);
    }

    /// Removes the bookmark with `id`. Returns whether anything was removed.
    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id() != id);
        self.bookmarks.len() != before
    }

    /// Replaces the bookmark with `id` in place. Returns whether it existed.
    pub fn replace_bookmark(&mut self, id: &str, bookmark: BookmarkWithCategory) -> bool {
        match self.bookmarks.iter_mut().find(|b| b.id() == id) {
            Some(slot) => {
                *slot = bookmark;
                true
            }
            None => false,
        }
    }

    pub fn push_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Removes a category and everything that points at it: bookmarks are
    /// unlinked (not deleted) and a filter on it is cleared.
    ///
    /// Returns the number of bookmarks that were unlinked.
    pub fn remove_category_cascade(&mut self, id: &str) -> usize {
        self.categories.retain(|c| c.id != id);

        let mut unlinked = 0;
        for bookmark in self
            .bookmarks
            .iter_mut()
            .filter(|b| b.bookmark.category_id.as_deref() == Some(id))
        {
            bookmark.unlink_category();
            unlinked += 1;
        }

        if self.selected_category.as_deref() == Some(id) {
            self.selected_category = None;
        }
        unlinked
    }

    /// Swaps in freshly fetched collections, filling in category projections
    /// the server left out. The active filter is cleared if its category is gone.
    pub fn replace_collections(
        &mut self,
        categories: Vec<Category>,
        bookmarks: Vec<BookmarkWithCategory>,
    ) {
        self.bookmarks = bookmarks
            .into_iter()
            .map(|mut b| {
                if b.category.is_none() {
                    b.category = resolve_category(b.bookmark.category_id.as_deref(), &categories);
                }
                b
            })
            .collect();
        self.categories = categories;

        if let Some(selected) = self.selected_category.as_deref() {
            if self.find_category(selected).is_none() {
                self.selected_category = None;
            }
        }
    }

    /// Bookmarks passing the current search and category filter.
    pub fn visible(&self) -> Vec<&BookmarkWithCategory> {
        let selected = self.selected_category.as_deref();
        self.bookmarks
            .iter()
            .filter(|b| is_visible(&b.bookmark, &self.search_query, selected))
            .collect()
    }

    pub fn has_active_filter(&self) -> bool {
        !self.search_query.is_empty() || self.selected_category.is_some()
    }
}
