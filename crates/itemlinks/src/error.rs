//! Error types for the link layer.
//!
//! Nothing here is surfaced to the player: reconciliation and click
//! handling turn these into silent skips. They exist so lookups can be
//! written with `?` and so hosts get a typed error from configuration
//! loading.

use linkdom::DocumentError;
use thiserror::Error;

/// Errors raised by the link layer.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Settings or world data failed to parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A link references an object the world no longer knows.
    #[error("no such object: {0}")]
    UnknownObject(String),
    /// A move would put an object inside itself.
    #[error("cannot move {object} into {location}: it would contain itself")]
    CyclicContainment {
        /// The object being moved.
        object: String,
        /// The requested holder.
        location: String,
    },
    /// A document lookup failed.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result alias for link-layer operations.
pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use linkdom::ElementId;

    #[test]
    fn messages() {
        assert_eq!(
            LinkError::UnknownObject("lamp".into()).to_string(),
            "no such object: lamp"
        );
        let err: LinkError = DocumentError::UnknownElement(ElementId::new(3)).into();
        assert_eq!(err.to_string(), "no element #3");
    }

    #[test]
    fn json_errors_convert() {
        let err: LinkError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LinkError::Json(_)));
    }
}
