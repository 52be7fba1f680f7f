//! Storage backends for Vitrine content.
//!
//! Two collaborators sit behind the content repositories:
//!
//! - a [`DocumentStore`]: schemaless collections of documents addressed by
//!   store-assigned ids, queried with an optional equality filter and a
//!   mandatory "created_at, newest first" ordering;
//! - an [`AssetStore`]: durable binary storage addressed by path, returning a
//!   retrievable URL for each stored file.
//!
//! # Backends
//!
//! - [`InMemoryDocumentStore`] / [`InMemoryAssetStore`] -- lock-guarded maps
//!   for tests and embedding
//! - [`JsonFileDocumentStore`] -- one JSON file per collection on disk
//! - [`LocalAssetStore`] -- files under a root directory, served from a
//!   configurable base URL
//!
//! # Design Rules
//!
//! 1. Ids are assigned by the store, never by the caller.
//! 2. Deleting an absent document or asset is not an error; it reports `false`.
//! 3. Query filters are applied by the store before ordering, never as a
//!    post-filter over a truncated result.
//! 4. Ties in the ordering field keep the store's insertion order.
//! 5. No operation spans both stores; there are no cross-store transactions.

pub mod error;
pub mod fs;
pub mod memory;
pub mod query;
pub mod traits;

pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use fs::{JsonFileDocumentStore, LocalAssetStore};
pub use memory::{InMemoryAssetStore, InMemoryDocumentStore, MEMORY_URL_PREFIX};
pub use query::{OrderBy, Query, SortDirection, StoredDocument};
pub use traits::{validate_asset_path, AssetStore, DocumentStore, StoredAsset};
