//! Visibility predicate for the bookmark list.
//!
//! Pure functions, evaluated against the full collection on every query.

use crate::types::bookmark::Bookmark;

/// True if `query` is empty or is a case-insensitive substring of the title,
/// URL or description. A missing description never matches.
pub fn matches_search(bookmark: &Bookmark, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    bookmark.title.to_lowercase().contains(&needle)
        || bookmark.url.to_lowercase().contains(&needle)
        || bookmark
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// True if no category is selected, or the bookmark's category id equals it.
pub fn matches_category(bookmark: &Bookmark, selected_category_id: Option<&str>) -> bool {
    match selected_category_id {
        None => true,
        Some(selected) => bookmark.category_id.as_deref() == Some(selected),
    }
}

pub fn is_visible(bookmark: &Bookmark, query: &str, selected_category_id: Option<&str>) -> bool {
    matches_search(bookmark, query) && matches_category(bookmark, selected_category_id)
}
