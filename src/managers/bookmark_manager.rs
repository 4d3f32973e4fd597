//! Bookmark Manager for Linkvault.
//!
//! Implements `BookmarkManagerTrait`, the reconciliation engine between user
//! actions, the remote bookmark API and local state. Every mutating command
//! tries the remote service first and falls back to an equivalent local
//! change when the call fails, so commands never fail from the caller's
//! point of view.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::managers::reconcile::{remote_or_fallback, Reconciled};
use crate::managers::state::BookmarkState;
use crate::services::api_service::RemoteBookmarkService;
use crate::services::auth::TokenProvider;
use crate::services::link_utils::{favicon_fallback_url, title_from_url};
use crate::types::api::{BookmarkQuery, PageMetadata};
use crate::types::bookmark::{Bookmark, BookmarkUpdate, BookmarkWithCategory, NewBookmark};
use crate::types::category::{Category, NewCategory};
use crate::types::errors::RemoteError;

/// Trait defining the reconciliation engine's commands.
#[async_trait]
pub trait BookmarkManagerTrait {
    /// Adds a bookmark. Title and URL must already be trimmed and non-empty.
    async fn add_bookmark(&mut self, input: NewBookmark) -> BookmarkWithCategory;
    /// Removes a bookmark locally regardless of the remote outcome.
    async fn delete_bookmark(&mut self, id: &str);
    async fn add_category(&mut self, input: NewCategory) -> Category;
    /// Removes a category, unlinks its bookmarks and clears a filter on it.
    async fn delete_category(&mut self, id: &str);
    /// Replaces a bookmark's editable fields. Unknown ids are a no-op.
    async fn save_bookmark(&mut self, id: &str, updates: BookmarkUpdate);
    /// Replaces local collections with the remote ones. Returns `false` and
    /// keeps local state if either fetch fails.
    async fn sync_from_remote(&mut self) -> bool;
    /// Title suggestion for a URL: remote page metadata, else the host name.
    async fn suggest_title(&self, url: &str) -> Option<String>;
    /// Favicon for a URL: remote lookup, else the fallback favicon service.
    async fn fetch_favicon(&self, url: &str) -> Option<String>;
}

/// Reconciliation engine owning the session's bookmarks, categories and filter.
pub struct BookmarkManager {
    remote: Arc<dyn RemoteBookmarkService>,
    auth: Arc<dyn TokenProvider>,
    user_id: String,
    state: BookmarkState,
}

impl BookmarkManager {
    /// Creates a manager with empty local state.
    pub fn new(
        remote: Arc<dyn RemoteBookmarkService>,
        auth: Arc<dyn TokenProvider>,
        user_id: impl Into<String>,
    ) -> Self {
        Self::with_state(remote, auth, user_id, BookmarkState::default())
    }

    /// Creates a manager starting from previously saved state.
    pub fn with_state(
        remote: Arc<dyn RemoteBookmarkService>,
        auth: Arc<dyn TokenProvider>,
        user_id: impl Into<String>,
        state: BookmarkState,
    ) -> Self {
        Self {
            remote,
            auth,
            user_id: user_id.into(),
            state,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn state(&self) -> &BookmarkState {
        &self.state
    }

    /// Replaces the whole local state, e.g. with a reloaded snapshot.
    pub fn restore(&mut self, state: BookmarkState) {
        self.state = state;
    }

    pub fn bookmarks(&self) -> &[BookmarkWithCategory] {
        &self.state.bookmarks
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn find_bookmark(&self, id: &str) -> Option<&BookmarkWithCategory> {
        self.state.find_bookmark(id)
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.state.find_category(id)
    }

    /// Bookmarks passing the current search query and category filter.
    pub fn visible_bookmarks(&self) -> Vec<&BookmarkWithCategory> {
        self.state.visible()
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.state.selected_category.as_deref()
    }

    /// Sets the category filter; `None` shows all bookmarks.
    pub fn select_category(&mut self, category_id: Option<String>) {
        self.state.selected_category = category_id;
    }

    pub fn has_active_filter(&self) -> bool {
        self.state.has_active_filter()
    }

    fn local_bookmark(&self, input: NewBookmark) -> BookmarkWithCategory {
        let now = Utc::now();
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            url: input.url,
            description: input.description,
            favicon: None,
            category_id: input.category_id,
            user_id: self.user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        // A category id that is not known locally stays set but unresolved.
        BookmarkWithCategory::resolve(bookmark, &self.state.categories)
    }

    fn local_category(&self, input: NewCategory) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            color: input.color,
            user_id: self.user_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn merged_bookmark(&self, id: &str, updates: BookmarkUpdate) -> Option<BookmarkWithCategory> {
        let existing = self.state.find_bookmark(id)?;
        let bookmark = Bookmark {
            title: updates.title,
            url: updates.url,
            description: updates.description,
            category_id: updates.category_id,
            updated_at: Utc::now(),
            ..existing.bookmark.clone()
        };
        Some(BookmarkWithCategory::resolve(bookmark, &self.state.categories))
    }
}

#[async_trait]
impl BookmarkManagerTrait for BookmarkManager {
    async fn add_bookmark(&mut self, input: NewBookmark) -> BookmarkWithCategory {
        let token = self.auth.token().await;
        let bookmark = remote_or_fallback(
            "add_bookmark",
            self.remote.create_bookmark(token.as_ref(), &input),
            || self.local_bookmark(input.clone()),
        )
        .await
        .into_inner();

        self.state.prepend_bookmark(bookmark.clone());
        bookmark
    }

    async fn delete_bookmark(&mut self, id: &str) {
        let token = self.auth.token().await;
        remote_or_fallback(
            "delete_bookmark",
            self.remote.delete_bookmark(token.as_ref(), id),
            || (),
        )
        .await;

        self.state.remove_bookmark(id);
    }

    async fn add_category(&mut self, input: NewCategory) -> Category {
        let token = self.auth.token().await;
        let category = remote_or_fallback(
            "add_category",
            self.remote.create_category(token.as_ref(), &input),
            || self.local_category(input.clone()),
        )
        .await
        .into_inner();

        self.state.push_category(category.clone());
        category
    }

    async fn delete_category(&mut self, id: &str) {
        let token = self.auth.token().await;
        remote_or_fallback(
            "delete_category",
            self.remote.delete_category(token.as_ref(), id),
            || (),
        )
        .await;

        let unlinked = self.state.remove_category_cascade(id);
        info!(category_id = id, unlinked, "category removed");
    }

    async fn save_bookmark(&mut self, id: &str, updates: BookmarkUpdate) {
        let token = self.auth.token().await;
        let remote = self.remote.update_bookmark(token.as_ref(), id, &updates);
        let updated = remote_or_fallback(
            "save_bookmark",
            async { remote.await.map(Some) },
            || self.merged_bookmark(id, updates.clone()),
        )
        .await
        .into_inner();

        if let Some(bookmark) = updated {
            self.state.replace_bookmark(id, bookmark);
        }
    }

    async fn sync_from_remote(&mut self) -> bool {
        let token = self.auth.token().await;
        let remote = self.remote.as_ref();
        let token = token.as_ref();
        let fetched = remote_or_fallback(
            "sync_from_remote",
            async {
                let categories = remote.list_categories(token).await?;
                let bookmarks = remote
                    .list_bookmarks(token, &BookmarkQuery::default())
                    .await?;
                Ok::<_, RemoteError>(Some((categories, bookmarks)))
            },
            || None,
        )
        .await
        .into_inner();

        match fetched {
            Some((categories, bookmarks)) => {
                info!(
                    categories = categories.len(),
                    bookmarks = bookmarks.len(),
                    "loaded remote state"
                );
                self.state.replace_collections(categories, bookmarks);
                true
            }
            None => false,
        }
    }

    async fn suggest_title(&self, url: &str) -> Option<String> {
        let token = self.auth.token().await;
        let remote = remote_or_fallback(
            "suggest_title",
            self.remote.metadata(token.as_ref(), url),
            PageMetadata::default,
        )
        .await;

        let title = match remote {
            Reconciled::Remote(meta) => meta.title.filter(|t| !t.trim().is_empty()),
            Reconciled::Local(_) => None,
        };
        title.or_else(|| title_from_url(url))
    }

    async fn fetch_favicon(&self, url: &str) -> Option<String> {
        let token = self.auth.token().await;
        let remote = self.remote.favicon(token.as_ref(), url);
        remote_or_fallback(
            "fetch_favicon",
            async { remote.await.map(|info| Some(info.favicon)) },
            || None,
        )
        .await
        .into_inner()
        .filter(|f| !f.trim().is_empty())
        .or_else(|| favicon_fallback_url(url))
    }
}
