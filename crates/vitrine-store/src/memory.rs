use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use vitrine_types::{Document, DocumentId};

use crate::error::{StorageResult, StoreResult};
use crate::query::{Query, StoredDocument};
use crate::traits::{validate_asset_path, AssetStore, DocumentStore, StoredAsset};

/// URL scheme and prefix of assets held by [`InMemoryAssetStore`].
pub const MEMORY_URL_PREFIX: &str = "memory://assets/";

/// In-memory document store.
///
/// Intended for tests and embedding. Each collection is a `Vec` kept in
/// insertion order behind a `RwLock`; documents are cloned on read/write.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if no collection holds any document.
    pub fn is_empty(&self) -> bool {
        self.collections
            .read()
            .expect("lock poisoned")
            .values()
            .all(Vec::is_empty)
    }

    /// Remove every document from every collection.
    pub fn clear(&self) {
        self.collections.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::generate();
        let mut map = self.collections.write().expect("lock poisoned");
        map.entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data: document,
            });
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| &d.id == id))
            .map(|d| d.data.clone()))
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let mut map = self.collections.write().expect("lock poisoned");
        let Some(docs) = map.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter().position(|d| &d.id == id) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        document: Document,
    ) -> StoreResult<bool> {
        let mut map = self.collections.write().expect("lock poisoned");
        let slot = map
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| &d.id == id));
        match slot {
            Some(existing) => {
                existing.data = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map
            .get(collection)
            .map(|docs| query.evaluate(docs))
            .unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.collections.read().expect("lock poisoned");
        let count: usize = map.values().map(Vec::len).sum();
        f.debug_struct("InMemoryDocumentStore")
            .field("collections", &map.len())
            .field("document_count", &count)
            .finish()
    }
}

/// In-memory asset store handing out `memory://assets/<path>` URLs.
pub struct InMemoryAssetStore {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryAssetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Bytes stored at `path`.
    pub fn read(&self, path: &str) -> Option<Bytes> {
        self.blobs.read().expect("lock poisoned").get(path).cloned()
    }

    /// Resolve a URL produced by this store to the stored bytes.
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        self.path_for_url(url).and_then(|path| self.read(&path))
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of stored paths.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .blobs
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn put(&self, path: &str, bytes: Bytes) -> StorageResult<StoredAsset> {
        validate_asset_path(path)?;
        self.blobs
            .write()
            .expect("lock poisoned")
            .insert(path.to_string(), bytes);
        Ok(StoredAsset {
            path: path.to_string(),
            url: format!("{MEMORY_URL_PREFIX}{path}"),
        })
    }

    async fn delete(&self, path: &str) -> StorageResult<bool> {
        Ok(self
            .blobs
            .write()
            .expect("lock poisoned")
            .remove(path)
            .is_some())
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(MEMORY_URL_PREFIX)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }
}

impl std::fmt::Debug for InMemoryAssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAssetStore")
            .field("asset_count", &self.len())
            .finish()
    }
}
