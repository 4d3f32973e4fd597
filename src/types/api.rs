use serde::{Deserialize, Serialize};

use super::errors::RemoteError;

/// Uniform response envelope returned by the bookmark API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload. `success: false` or a missing `data` field is a rejection.
    pub fn into_data(self) -> Result<T, RemoteError> {
        if !self.success {
            return Err(RemoteError::Rejected(
                self.error.unwrap_or_else(|| "success: false".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| RemoteError::Rejected("missing data".to_string()))
    }

    /// Checks only the `success` flag, for endpoints whose payload is ignored.
    pub fn into_ack(self) -> Result<(), RemoteError> {
        if self.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(
                self.error.unwrap_or_else(|| "success: false".to_string()),
            ))
        }
    }
}

/// Optional server-side filters for `GET /bookmarks`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl BookmarkQuery {
    /// Query pairs to append; empty values are skipped.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.category_id.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("categoryId", id));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search));
        }
        pairs
    }
}

/// Page metadata returned by `GET /utils/metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

/// Result of `GET /utils/favicon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaviconInfo {
    pub favicon: String,
}
