//! Remote-first, local-fallback policy shared by every engine operation.

use std::future::Future;

use tracing::{debug, warn};

use crate::types::errors::RemoteError;

/// Which side produced a reconciled value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled<T> {
    /// The remote service accepted the call and returned this value.
    Remote(T),
    /// The remote call failed; this value was synthesized locally.
    Local(T),
}

impl<T> Reconciled<T> {
    pub fn into_inner(self) -> T {
        match self {
            Reconciled::Remote(v) | Reconciled::Local(v) => v,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Reconciled::Remote(_))
    }
}

/// Awaits `remote`; on any error logs a warning and returns `fallback()` instead.
///
/// No error escapes and nothing is retried.
pub async fn remote_or_fallback<T, Fut, F>(operation: &str, remote: Fut, fallback: F) -> Reconciled<T>
where
    Fut: Future<Output = Result<T, RemoteError>>,
    F: FnOnce() -> T,
{
    match remote.await {
        Ok(value) => {
            debug!(operation, "remote call succeeded");
            Reconciled::Remote(value)
        }
        Err(err) => {
            warn!(operation, error = %err, "External API failed, using local state");
            Reconciled::Local(fallback())
        }
    }
}
