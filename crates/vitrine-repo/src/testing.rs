//! Fault-injecting store wrappers for repository tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use vitrine_store::{
    AssetStore, DocumentStore, InMemoryAssetStore, InMemoryDocumentStore, Query, StorageError,
    StorageResult, StoreError, StoreResult, StoredAsset, StoredDocument,
};
use vitrine_types::{Document, DocumentId};

/// Document store whose writes can be made to fail on demand.
#[derive(Default)]
pub struct FlakyDocumentStore {
    pub inner: InMemoryDocumentStore,
    pub fail_inserts: AtomicBool,
    pub fail_replaces: AtomicBool,
    pub inserts: AtomicUsize,
}

impl FlakyDocumentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DocumentStore for FlakyDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert refused".into()));
        }
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(collection, document).await
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        self.inner.delete(collection, id).await
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        document: Document,
    ) -> StoreResult<bool> {
        if self.fail_replaces.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("replace refused".into()));
        }
        self.inner.replace(collection, id, document).await
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        self.inner.query(collection, query).await
    }
}

/// Asset store whose uploads or deletions can be made to fail on demand.
#[derive(Default)]
pub struct FlakyAssetStore {
    pub inner: InMemoryAssetStore,
    pub fail_puts: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub puts: AtomicUsize,
}

impl FlakyAssetStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl AssetStore for FlakyAssetStore {
    async fn put(&self, path: &str, bytes: Bytes) -> StorageResult<StoredAsset> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("permission denied".into()));
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(path, bytes).await
    }

    async fn delete(&self, path: &str) -> StorageResult<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("delete refused".into()));
        }
        self.inner.delete(path).await
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        self.inner.path_for_url(url)
    }
}
