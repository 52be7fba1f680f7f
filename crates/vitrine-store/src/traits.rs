use async_trait::async_trait;
use bytes::Bytes;
use vitrine_types::{Document, DocumentId};

use crate::error::{StorageError, StorageResult, StoreResult};
use crate::query::{Query, StoredDocument};

/// Schemaless document collections.
///
/// All implementations must satisfy these invariants:
/// - `insert` assigns a fresh id; callers never choose ids.
/// - `get` returns `Ok(None)` for an absent id; absence is not an error.
/// - `delete` returns `Ok(false)` for an absent id.
/// - `query` applies the filter inside the store and returns documents in
///   the requested order, keeping insertion order among ties.
/// - Failures are propagated, never retried or swallowed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its newly assigned id.
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId>;

    /// Point lookup by id.
    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>>;

    /// Delete by id. Returns `true` if the document existed.
    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<bool>;

    /// Overwrite the document stored at `id`, keeping the id and its
    /// position in store order. Returns `false` (and writes nothing) if the
    /// id is absent.
    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        document: Document,
    ) -> StoreResult<bool>;

    /// Filtered, ordered query over one collection.
    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>>;
}

/// Where an uploaded asset ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAsset {
    /// Store-relative path the bytes were written to.
    pub path: String,
    /// Retrievable URL referencing the asset.
    pub url: String,
}

/// Durable binary storage addressed by path.
///
/// No retry, checksum, or resumable upload is offered: a failed `put`
/// surfaces as a [`StorageError`] and leaves nothing behind.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` at `path`, returning a retrievable URL.
    async fn put(&self, path: &str, bytes: Bytes) -> StorageResult<StoredAsset>;

    /// Remove the asset at `path`. Returns `true` if it existed.
    async fn delete(&self, path: &str) -> StorageResult<bool>;

    /// Map a URL handed out by this store back to its path.
    ///
    /// Returns `None` for URLs this store did not produce.
    fn path_for_url(&self, url: &str) -> Option<String>;
}

/// Check that an asset path is relative and stays inside the store root.
pub fn validate_asset_path(path: &str) -> StorageResult<()> {
    let invalid = |reason: &str| StorageError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.trim().is_empty() {
        return Err(invalid("path must not be empty"));
    }
    if path.starts_with('/') || path.starts_with('\\') || path.contains(':') {
        return Err(invalid("path must be relative"));
    }
    if path.contains('\\') {
        return Err(invalid("path must use '/' separators"));
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(invalid("path must not contain empty segments"));
        }
        if segment == "." || segment == ".." {
            return Err(invalid("path must not contain '.' or '..' segments"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_accepted() {
        assert!(validate_asset_path("clients/1700000000000-abc.png").is_ok());
        assert!(validate_asset_path("logo.svg").is_ok());
    }

    #[test]
    fn escaping_paths_are_rejected() {
        for bad in ["", "/etc/passwd", "../up.png", "a/../b", "a//b", "C:\\x", "a\\b", "a/./b", "dir/"] {
            assert!(validate_asset_path(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn traits_are_object_safe() {
        fn _docs(_: &dyn DocumentStore) {}
        fn _assets(_: &dyn AssetStore) {}
    }
}
