use std::fmt;

// === RemoteError ===

/// Errors raised while talking to the remote bookmark API.
///
/// The reconciliation engine never surfaces these to callers; it logs them
/// and falls back to local state.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The envelope reported `success: false` or carried no data.
    Rejected(String),
    /// The response body could not be decoded.
    Decode(String),
    /// The request URL could not be built.
    InvalidUrl(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "API network error: {}", msg),
            RemoteError::Status(code) => write!(f, "API Error: {}", code),
            RemoteError::Rejected(msg) => write!(f, "API rejected request: {}", msg),
            RemoteError::Decode(msg) => write!(f, "API decode error: {}", msg),
            RemoteError::InvalidUrl(url) => write!(f, "Invalid API URL: {}", url),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RemoteError::Status(status.as_u16())
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

// === SettingsError ===

/// Errors related to client configuration.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// A setting carries an unusable value.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === StoreError ===

/// Errors related to the local snapshot store.
#[derive(Debug)]
pub enum StoreError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored row could not be converted back into an entity.
    SerializationError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DatabaseError(msg) => write!(f, "Snapshot database error: {}", msg),
            StoreError::SerializationError(msg) => {
                write!(f, "Snapshot serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}
