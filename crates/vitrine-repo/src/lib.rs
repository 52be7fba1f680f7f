//! Content repositories for Vitrine.
//!
//! An [`EntityRepository`] composes asset validation, asset naming, an
//! [`AssetStore`](vitrine_store::AssetStore), and a
//! [`DocumentStore`](vitrine_store::DocumentStore) into the five operations
//! the admin back office needs for one record kind: `create`, `get`,
//! `list`, `update`, and `delete`. [`ContentCatalog`] bundles one repository
//! per kind over a shared pair of store handles.
//!
//! # Write semantics
//!
//! - `create` validates fields and the upload before any I/O, uploads the
//!   asset, then inserts the document. The two writes are not transactional.
//! - `update` in [`UpdateMode::Replace`] deletes the old document and
//!   inserts a new one, so the entity's id changes. [`UpdateMode::InPlace`]
//!   patches the stored document and keeps the id.
//! - `delete` removes the document only; the asset stays in storage.
//! - With [`RepositoryConfig::cleanup_orphaned_assets`] set, an asset whose
//!   document write failed is deleted again on a best-effort basis.

pub mod catalog;
pub mod config;
pub mod error;
pub mod repository;

#[cfg(test)]
mod testing;

pub use catalog::ContentCatalog;
pub use config::{RepositoryConfig, UpdateMode};
pub use error::{RepoError, RepoResult};
pub use repository::EntityRepository;
