use thiserror::Error;
use vitrine_assets::ValidationError;
use vitrine_store::{StorageError, StoreError};
use vitrine_types::{DocumentId, EntityKind, TypeError};

/// Errors from repository operations.
///
/// Absence is not an error for reads: `get` returns `Ok(None)`. Each error
/// is scoped to the operation that raised it; nothing is retried.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The upload was refused before any I/O.
    #[error("invalid upload: {0}")]
    Validation(#[from] ValidationError),

    /// The entity fields were refused before any write.
    #[error("invalid fields: {0}")]
    InvalidFields(TypeError),

    /// The asset store failed; no document was written by this operation.
    #[error("asset storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The document store failed. After a successful upload this leaves the
    /// asset orphaned unless cleanup is enabled.
    #[error("document store failed: {0}")]
    Store(#[from] StoreError),

    /// `update` targeted an id that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: DocumentId },

    /// A stored document could not be decoded as the expected kind.
    #[error("malformed {kind} document {id}: {reason}")]
    Malformed {
        kind: EntityKind,
        id: DocumentId,
        reason: String,
    },
}

impl RepoError {
    /// `true` when the caller can fix the input and retry: a refused upload
    /// or invalid fields.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidFields(_))
    }

    /// Message suitable for an admin notification: the specific reason for
    /// validation failures, a generic one otherwise.
    pub fn user_message(&self) -> String {
        if self.is_validation() {
            self.to_string()
        } else {
            "save failed".to_string()
        }
    }
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_keep_their_reason() {
        let err = RepoError::from(ValidationError::TooLarge { size: 10, max: 5 });
        assert!(err.is_validation());
        assert!(err.user_message().contains("too large"));
    }

    #[test]
    fn other_errors_are_generic_for_users() {
        let err = RepoError::from(StoreError::Unavailable("offline".into()));
        assert!(!err.is_validation());
        assert_eq!(err.user_message(), "save failed");
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn not_found_display() {
        let err = RepoError::NotFound {
            kind: EntityKind::Project,
            id: DocumentId::new("p1"),
        };
        assert_eq!(err.to_string(), "project not found: p1");
    }
}
