//! Auth token provider for the bookmark API.
//!
//! The engine asks for a token before every remote call. A provider that has
//! no token returns `None`; requests are then sent without an
//! `Authorization` header.

use async_trait::async_trait;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A bearer token that is wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Supplies the current session token on demand.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<BearerToken>;
}

/// Token provider holding a fixed, possibly absent, token.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<BearerToken>,
}

impl StaticTokenProvider {
    /// Blank tokens count as absent.
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(BearerToken::new);
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Option<BearerToken> {
        self.token.clone()
    }
}
