use thiserror::Error;

/// Canonical error type for collaborator operations (directory, index).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unexpected internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable details for debugging purposes.
        message: String,
    },

    /// I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Creates an `Internal` variant.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenient result alias for collaborator operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Tagged outcome of a remote peer call.
///
/// The resolution engine branches on the tag instead of inspecting error
/// classes: `NotFound` means the peer answered and the resource does not
/// exist there, `Unavailable` covers transport failures, timeouts, and
/// malformed responses.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Peer answered; the requested resource does not exist there.
    #[error("peer confirmed the resource does not exist")]
    NotFound,

    /// Peer could not be queried or returned an unusable response.
    #[error("{0}")]
    Unavailable(String),
}
