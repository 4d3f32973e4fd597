// Linkvault Settings Engine
// Loads client settings from a JSON file, then layers environment overrides on top.
// A missing file yields defaults; a malformed file is an error.

use std::env;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::types::errors::SettingsError;
use crate::types::settings::ClientSettings;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "LINKVAULT_CONFIG";
/// Config file used when `LINKVAULT_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "linkvault.json";

pub const API_URL_ENV: &str = "LINKVAULT_API_URL";
pub const USER_ID_ENV: &str = "LINKVAULT_USER_ID";
pub const API_TOKEN_ENV: &str = "LINKVAULT_API_TOKEN";
pub const DATABASE_PATH_ENV: &str = "LINKVAULT_DB";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClientSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ClientSettings;
    fn get_config_path(&self) -> &str;
}

/// Settings engine backed by a JSON file on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ClientSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `None`, the path comes from `LINKVAULT_CONFIG`,
    /// falling back to `linkvault.json` in the working directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        Self {
            config_path,
            settings: ClientSettings::default(),
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides using `lookup` to resolve variable names.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(API_URL_ENV) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SettingsError::InvalidValue(format!(
                    "{} must be an http(s) URL, got '{}'",
                    API_URL_ENV, url
                )));
            }
            info!("{} set, using API base {}", API_URL_ENV, url);
            self.settings.api_base_url = url;
        }
        if let Some(user_id) = get(USER_ID_ENV) {
            self.settings.user_id = user_id;
        }
        if let Some(token) = get(API_TOKEN_ENV) {
            self.settings.auth_token = Some(token);
        }
        if let Some(path) = get(DATABASE_PATH_ENV) {
            self.settings.database_path = path;
        }
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// Fields missing from the file take their default values.
    fn load(&mut self) -> Result<ClientSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            warn!("Config file {} not found, using defaults", self.config_path);
            self.settings = ClientSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ClientSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
