use thiserror::Error;

/// Failure of a session operation or of the bootstrap request.
///
/// Kept `Clone + PartialEq` so it can be stored inside reactive signals and
/// compared by memos.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Rejected locally before anything was sent
    #[error("{0}")]
    Validation(String),
    /// Server answered 401; the stored credential has been dropped
    #[error("Please log in again")]
    Unauthorized,
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// Persistent credential storage is unavailable
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Returned by [`crate::context::try_use_session`] when no
/// `SessionProvider` is mounted above the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session context requested outside of <SessionProvider>")]
pub struct MissingSessionProvider;
