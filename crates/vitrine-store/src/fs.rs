//! On-disk backends.
//!
//! [`JsonFileDocumentStore`] keeps each collection in `<root>/<collection>.json`
//! as a JSON array in insertion order. Every write rewrites the whole file
//! through a temporary sibling and an atomic rename, with writers serialized
//! by an async mutex. This suits the low write volume of an admin back office.
//!
//! [`LocalAssetStore`] writes each asset to `<root>/<path>` and hands out
//! `<base_url>/<path>` URLs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::debug;
use vitrine_types::{Document, DocumentId};

use crate::error::{StorageResult, StoreError, StoreResult};
use crate::query::{Query, StoredDocument};
use crate::traits::{validate_asset_path, AssetStore, DocumentStore, StoredAsset};

/// Document store persisting one JSON file per collection.
#[derive(Debug)]
pub struct JsonFileDocumentStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileDocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> StoreResult<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(format!("{collection}.json")))
    }

    async fn load(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let path = self.collection_path(collection)?;
        match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice(&raw).map_err(|e| {
                StoreError::Serialization(format!("{}: {e}", path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, collection: &str, documents: &[StoredDocument]) -> StoreResult<()> {
        let path = self.collection_path(collection)?;
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_vec_pretty(documents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(collection, documents = documents.len(), "collection file written");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.load(collection).await?;
        let id = DocumentId::generate();
        documents.push(StoredDocument {
            id: id.clone(),
            data: document,
        });
        self.save(collection, &documents).await?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let documents = self.load(collection).await?;
        Ok(documents.into_iter().find(|d| &d.id == id).map(|d| d.data))
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.load(collection).await?;
        let before = documents.len();
        documents.retain(|d| &d.id != id);
        if documents.len() == before {
            return Ok(false);
        }
        self.save(collection, &documents).await?;
        Ok(true)
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        document: Document,
    ) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.load(collection).await?;
        let Some(existing) = documents.iter_mut().find(|d| &d.id == id) else {
            return Ok(false);
        };
        existing.data = document;
        self.save(collection, &documents).await?;
        Ok(true)
    }

    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let documents = self.load(collection).await?;
        Ok(query.evaluate(&documents))
    }
}

/// Asset store writing files below a root directory.
#[derive(Clone, Debug)]
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    /// `base_url` is the public prefix the root directory is served under,
    /// e.g. `https://cdn.example.com/uploads`.
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read back the bytes stored at `path`.
    pub async fn read(&self, path: &str) -> StorageResult<Option<Bytes>> {
        validate_asset_path(path)?;
        match tokio::fs::read(self.root.join(path)).await {
            Ok(raw) => Ok(Some(Bytes::from(raw))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, path: &str, bytes: Bytes) -> StorageResult<StoredAsset> {
        validate_asset_path(path)?;
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        debug!(path, bytes = bytes.len(), "asset written");
        Ok(StoredAsset {
            path: path.to_string(),
            url: self.url_for(path),
        })
    }

    async fn delete(&self, path: &str) -> StorageResult<bool> {
        validate_asset_path(path)?;
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        let path = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        validate_asset_path(path).ok()?;
        Some(path.to_string())
    }
}
