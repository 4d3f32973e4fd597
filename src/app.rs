//! App Core for Linkvault.
//!
//! Wires settings, the remote API client, the token provider, the
//! reconciliation engine and the snapshot database together.

use std::sync::Arc;

use tracing::{info, warn};

use crate::database::{Database, SnapshotStore};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::services::api_service::{ApiService, RemoteBookmarkService};
use crate::services::auth::{StaticTokenProvider, TokenProvider};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::StoreError;
use crate::types::settings::ClientSettings;

/// Central application struct.
pub struct App {
    pub settings: ClientSettings,
    pub db: Database,
    pub bookmarks: BookmarkManager,
}

impl App {
    /// Loads settings (file, then environment) and builds the app from them.
    pub fn from_config(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut engine = SettingsEngine::new(config_path);
        engine.load()?;
        engine.apply_env_overrides()?;
        info!(config = engine.get_config_path(), "settings loaded");
        Self::new(engine.get_settings().clone())
    }

    /// Builds the app against the HTTP API described by `settings`.
    pub fn new(settings: ClientSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let remote = Arc::new(ApiService::from_settings(&settings)?);
        let auth = Arc::new(StaticTokenProvider::new(settings.auth_token.clone()));
        let db = Database::open(&settings.database_path)?;
        Self::with_parts(settings, db, remote, auth)
    }

    /// Builds the app from explicit collaborators. The engine starts from the
    /// stored snapshot for `settings.user_id`.
    pub fn with_parts(
        settings: ClientSettings,
        db: Database,
        remote: Arc<dyn RemoteBookmarkService>,
        auth: Arc<dyn TokenProvider>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let state = SnapshotStore::new(db.connection()).load(&settings.user_id)?;
        let bookmarks = BookmarkManager::with_state(remote, auth, settings.user_id.clone(), state);
        Ok(Self {
            settings,
            db,
            bookmarks,
        })
    }

    /// Startup sequence: pull remote state; if that fails and the local
    /// snapshot has no categories, seed the defaults.
    pub async fn startup(&mut self) -> Result<(), StoreError> {
        if self.bookmarks.sync_from_remote().await {
            info!("started with remote state");
            return self.persist();
        }

        if self.bookmarks.categories().is_empty() {
            let store = SnapshotStore::new(self.db.connection());
            let seeded = store.seed_default_categories(&self.settings.user_id)?;
            if seeded > 0 {
                info!(seeded, "seeded default categories");
                let state = store.load(&self.settings.user_id)?;
                self.bookmarks.restore(state);
            }
        }
        warn!(
            bookmarks = self.bookmarks.bookmarks().len(),
            "remote unavailable, started with local snapshot"
        );
        Ok(())
    }

    /// Writes the engine's current state to the snapshot database.
    pub fn persist(&self) -> Result<(), StoreError> {
        SnapshotStore::new(self.db.connection()).save(&self.settings.user_id, self.bookmarks.state())
    }
}
