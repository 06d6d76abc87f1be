use thiserror::Error;

use fedsearch_core::CoreError;

/// Status taxonomy produced by the resolution engine.
///
/// Every variant maps to one HTTP status; the display string is the
/// human-readable message the transport layer puts on the wire.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target id is a tombstoned resource. Checked before any
    /// escalation, caching, or live call.
    #[error("Resource is gone: {0}")]
    Gone(String),

    /// Mother was asked for the descriptor and the lookup failed.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// No directory entry and no mother to ask.
    #[error("Unknown resource identifier: {0}")]
    Unknown(String),

    /// The local index failed at query time.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The live call against the resolved resource failed.
    #[error("Resource {id} unavailable: {cause}")]
    ResourceUnavailable { id: String, cause: String },

    /// A collaborator broke its contract.
    #[error("internal error: {0}")]
    Internal(#[from] CoreError),
}

impl ResolveError {
    /// HTTP status code for this outcome.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Gone(_) => 410,
            Self::NotFound(_) | Self::Unknown(_) => 404,
            Self::ServiceUnavailable(_) | Self::ResourceUnavailable { .. } => 503,
            Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ResolveError::Gone("x".into()).status(), 410);
        assert_eq!(ResolveError::NotFound("x".into()).status(), 404);
        assert_eq!(ResolveError::Unknown("x".into()).status(), 404);
        assert_eq!(
            ResolveError::ServiceUnavailable("down".into()).status(),
            503
        );
        assert_eq!(
            ResolveError::ResourceUnavailable {
                id: "x".into(),
                cause: "timeout".into()
            }
            .status(),
            503
        );
    }

    #[test]
    fn test_distinct_404_messages() {
        let via_mother = ResolveError::NotFound("wiki".into()).to_string();
        let no_mother = ResolveError::Unknown("wiki".into()).to_string();
        assert_eq!(via_mother, "Resource not found: wiki");
        assert_eq!(no_mother, "Unknown resource identifier: wiki");
        assert_ne!(via_mother, no_mother);
    }
}
