//! Remote bookmark API client.
//!
//! Implements `RemoteBookmarkService` over `reqwest`. Every request carries
//! `Content-Type: application/json` and, when a token is available,
//! `Authorization: Bearer <token>`. Non-2xx statuses and `success: false`
//! envelopes are both returned as errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::services::auth::BearerToken;
use crate::types::api::{ApiEnvelope, BookmarkQuery, FaviconInfo, PageMetadata};
use crate::types::bookmark::{BookmarkUpdate, BookmarkWithCategory, NewBookmark};
use crate::types::category::{Category, NewCategory};
use crate::types::errors::RemoteError;
use crate::types::settings::ClientSettings;

/// Operations exposed by the remote bookmark API.
#[async_trait]
pub trait RemoteBookmarkService: Send + Sync {
    async fn list_bookmarks(
        &self,
        token: Option<&BearerToken>,
        query: &BookmarkQuery,
    ) -> Result<Vec<BookmarkWithCategory>, RemoteError>;
    async fn create_bookmark(
        &self,
        token: Option<&BearerToken>,
        input: &NewBookmark,
    ) -> Result<BookmarkWithCategory, RemoteError>;
    async fn update_bookmark(
        &self,
        token: Option<&BearerToken>,
        id: &str,
        updates: &BookmarkUpdate,
    ) -> Result<BookmarkWithCategory, RemoteError>;
    async fn delete_bookmark(&self, token: Option<&BearerToken>, id: &str) -> Result<(), RemoteError>;
    async fn list_categories(&self, token: Option<&BearerToken>) -> Result<Vec<Category>, RemoteError>;
    async fn create_category(
        &self,
        token: Option<&BearerToken>,
        input: &NewCategory,
    ) -> Result<Category, RemoteError>;
    async fn delete_category(&self, token: Option<&BearerToken>, id: &str) -> Result<(), RemoteError>;
    async fn favicon(&self, token: Option<&BearerToken>, url: &str) -> Result<FaviconInfo, RemoteError>;
    async fn metadata(&self, token: Option<&BearerToken>, url: &str) -> Result<PageMetadata, RemoteError>;
}

/// HTTP client for the bookmark API.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiService {
    /// Creates a client for `base_url`. `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        let base_url =
            Url::parse(base_url).map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RemoteError::from)?;

        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RemoteError> {
        Self::new(
            &settings.api_base_url,
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{segments...}?{query}`. Segments are percent-encoded.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RemoteError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        token: Option<&BearerToken>,
    ) -> Result<ApiEnvelope<T>, RemoteError> {
        debug!(%method, %url, authenticated = token.is_some(), "API request");

        let mut req = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.bearer_auth(token.as_str());
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await.map_err(|e| {
            debug!(error = %e, "API request failed");
            RemoteError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "API request failed");
            return Err(RemoteError::Status(status.as_u16()));
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    fn encode<B: serde::Serialize>(body: &B) -> Result<Value, RemoteError> {
        serde_json::to_value(body).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteBookmarkService for ApiService {
    async fn list_bookmarks(
        &self,
        token: Option<&BearerToken>,
        query: &BookmarkQuery,
    ) -> Result<Vec<BookmarkWithCategory>, RemoteError> {
        let url = self.endpoint_url(&["bookmarks"], &query.pairs())?;
        self.request(Method::GET, url, None, token).await?.into_data()
    }

    async fn create_bookmark(
        &self,
        token: Option<&BearerToken>,
        input: &NewBookmark,
    ) -> Result<BookmarkWithCategory, RemoteError> {
        let url = self.endpoint_url(&["bookmarks"], &[])?;
        let body = Self::encode(input)?;
        self.request(Method::POST, url, Some(body), token).await?.into_data()
    }

    async fn update_bookmark(
        &self,
        token: Option<&BearerToken>,
        id: &str,
        updates: &BookmarkUpdate,
    ) -> Result<BookmarkWithCategory, RemoteError> {
        let url = self.endpoint_url(&["bookmarks", id], &[])?;
        let body = Self::encode(updates)?;
        self.request(Method::PUT, url, Some(body), token).await?.into_data()
    }

    async fn delete_bookmark(&self, token: Option<&BearerToken>, id: &str) -> Result<(), RemoteError> {
        let url = self.endpoint_url(&["bookmarks", id], &[])?;
        self.request::<Value>(Method::DELETE, url, None, token)
            .await?
            .into_ack()
    }

    async fn list_categories(&self, token: Option<&BearerToken>) -> Result<Vec<Category>, RemoteError> {
        let url = self.endpoint_url(&["categories"], &[])?;
        self.request(Method::GET, url, None, token).await?.into_data()
    }

    async fn create_category(
        &self,
        token: Option<&BearerToken>,
        input: &NewCategory,
    ) -> Result<Category, RemoteError> {
        let url = self.endpoint_url(&["categories"], &[])?;
        let body = Self::encode(input)?;
        self.request(Method::POST, url, Some(body), token).await?.into_data()
    }

    async fn delete_category(&self, token: Option<&BearerToken>, id: &str) -> Result<(), RemoteError> {
        let url = self.endpoint_url(&["categories", id], &[])?;
        self.request::<Value>(Method::DELETE, url, None, token)
            .await?
            .into_ack()
    }

    async fn favicon(&self, token: Option<&BearerToken>, url: &str) -> Result<FaviconInfo, RemoteError> {
        let endpoint = self.endpoint_url(&["utils", "favicon"], &[("url", url)])?;
        self.request(Method::GET, endpoint, None, token).await?.into_data()
    }

    async fn metadata(&self, token: Option<&BearerToken>, url: &str) -> Result<PageMetadata, RemoteError> {
        let endpoint = self.endpoint_url(&["utils", "metadata"], &[("url", url)])?;
        self.request(Method::GET, endpoint, None, token).await?.into_data()
    }
}
