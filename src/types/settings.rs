use serde::{Deserialize, Serialize};

/// Default API base address, used when neither the config file nor the
/// environment provide one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Owner id stamped on locally synthesized entities.
    pub user_id: String,
    /// Bearer token sent to the API. Absent means unauthenticated requests.
    pub auth_token: Option<String>,
    /// Per-request timeout. Absent means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub database_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: "local-user".to_string(),
            auth_token: None,
            request_timeout_secs: None,
            database_path: "linkvault.db".to_string(),
        }
    }
}
