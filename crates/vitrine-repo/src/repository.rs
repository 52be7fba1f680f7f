use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};
use vitrine_assets::{AssetNamer, AssetUpload, AssetValidator};
use vitrine_store::{AssetStore, DocumentStore, Query, StoredAsset};
use vitrine_types::{Document, DocumentId, EntityFields, EntityKind, Record};

use crate::config::{RepositoryConfig, UpdateMode};
use crate::error::{RepoError, RepoResult};

/// Repository for one entity kind.
///
/// Store handles are injected, so the same repository runs against the
/// in-memory backends in tests and the durable ones in production. Calls on
/// the same id are not serialized: concurrent `update`s in
/// [`UpdateMode::Replace`] can each delete and re-insert, leaving more than
/// one successor document.
pub struct EntityRepository<F> {
    documents: Arc<dyn DocumentStore>,
    assets: Arc<dyn AssetStore>,
    validator: AssetValidator,
    namer: AssetNamer,
    config: RepositoryConfig,
    _fields: PhantomData<fn() -> F>,
}

impl<F: EntityFields> EntityRepository<F> {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        assets: Arc<dyn AssetStore>,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            documents,
            assets,
            validator: AssetValidator::new(config.asset_policy.clone()),
            namer: AssetNamer::new(),
            config,
            _fields: PhantomData,
        }
    }

    pub fn kind(&self) -> EntityKind {
        F::KIND
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn collection(&self) -> &'static str {
        F::KIND.collection()
    }

    // ---- Create ----

    /// Validate, upload the asset, then insert the document.
    ///
    /// Nothing is written when the fields or the upload are invalid. If the
    /// insert fails after the upload succeeded, the asset stays orphaned
    /// unless `cleanup_orphaned_assets` is set.
    pub async fn create(&self, fields: F, upload: AssetUpload) -> RepoResult<Record<F>> {
        self.check_fields(&fields)?;
        self.check_upload(&upload)?;

        let asset = self.upload(&upload).await?;
        let record = self
            .insert(fields, &asset.url, vitrine_types::now(), Some(&asset))
            .await?;
        debug!(
            kind = %F::KIND,
            id = %record.id,
            asset = %asset.path,
            "entity created"
        );
        Ok(record)
    }

    // ---- Read ----

    /// Point lookup. An absent id yields `Ok(None)`.
    pub async fn get(&self, id: &DocumentId) -> RepoResult<Option<Record<F>>> {
        let document = self
            .documents
            .get(self.collection(), id)
            .await
            .map_err(|e| {
                warn!(kind = %F::KIND, id = %id, error = %e, "get failed");
                e
            })?;
        document.map(|doc| self.decode(id.clone(), doc)).transpose()
    }

    /// All records, newest first, optionally narrowed by the kind's filter.
    ///
    /// The filter is handed to the store as part of the query.
    pub async fn list(&self, filter: Option<F::Filter>) -> RepoResult<Vec<Record<F>>> {
        let mut query = Query::newest_first();
        if let Some(filter) = filter.as_ref() {
            query = query.with_filter(F::filter_clause(filter));
        }
        let stored = self
            .documents
            .query(self.collection(), &query)
            .await
            .map_err(|e| {
                warn!(kind = %F::KIND, error = %e, "list failed");
                e
            })?;
        stored
            .into_iter()
            .map(|doc| self.decode(doc.id, doc.data))
            .collect()
    }

    // ---- Delete ----

    /// Remove the document. The referenced asset is left in storage, and an
    /// absent id is forwarded to the store without a prior existence check.
    pub async fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        let existed = self
            .documents
            .delete(self.collection(), id)
            .await
            .map_err(|e| {
                error!(kind = %F::KIND, id = %id, error = %e, "delete failed");
                e
            })?;
        debug!(kind = %F::KIND, id = %id, existed, "entity deleted");
        Ok(())
    }

    // ---- Update ----

    /// Apply `patch` (and optionally a new asset) to the record at `id`.
    ///
    /// Returns the record as stored afterwards. Under
    /// [`UpdateMode::Replace`] its id differs from `id`; under
    /// [`UpdateMode::InPlace`] it is the same.
    pub async fn update(
        &self,
        id: &DocumentId,
        patch: F::Patch,
        upload: Option<AssetUpload>,
    ) -> RepoResult<Record<F>> {
        if let Some(upload) = upload.as_ref() {
            self.check_upload(upload)?;
        }

        let existing = self.get(id).await?.ok_or_else(|| RepoError::NotFound {
            kind: F::KIND,
            id: id.clone(),
        })?;

        let mut fields = existing.fields.clone();
        fields.apply(patch);
        self.check_fields(&fields)?;

        match self.config.update_mode {
            UpdateMode::Replace => self.recreate(existing, fields, upload).await,
            UpdateMode::InPlace => self.patch_in_place(existing, fields, upload).await,
        }
    }

    /// Delete-then-insert. The delete is not rolled back if anything after
    /// it fails.
    async fn recreate(
        &self,
        existing: Record<F>,
        fields: F,
        upload: Option<AssetUpload>,
    ) -> RepoResult<Record<F>> {
        self.documents
            .delete(self.collection(), &existing.id)
            .await
            .map_err(|e| {
                error!(kind = %F::KIND, id = %existing.id, error = %e, "update: delete failed");
                e
            })?;

        let record = match upload {
            Some(upload) => {
                let asset = self.upload(&upload).await.map_err(|e| {
                    error!(
                        kind = %F::KIND,
                        previous_id = %existing.id,
                        "update: upload failed after delete; entity removed"
                    );
                    e
                })?;
                self.insert(fields, &asset.url, vitrine_types::now(), Some(&asset))
                    .await?
            }
            None => {
                self.insert(fields, &existing.asset_url, existing.created_at, None)
                    .await?
            }
        };

        debug!(
            kind = %F::KIND,
            previous_id = %existing.id,
            id = %record.id,
            "entity recreated"
        );
        Ok(record)
    }

    /// Overwrite under the stable id.
    async fn patch_in_place(
        &self,
        existing: Record<F>,
        fields: F,
        upload: Option<AssetUpload>,
    ) -> RepoResult<Record<F>> {
        let new_asset = match upload {
            Some(upload) => Some(self.upload(&upload).await?),
            None => None,
        };
        let asset_url = new_asset
            .as_ref()
            .map_or_else(|| existing.asset_url.clone(), |a| a.url.clone());

        let document = self.encode(&fields, &asset_url, &existing.created_at)?;
        let replaced = match self
            .documents
            .replace(self.collection(), &existing.id, document)
            .await
        {
            Ok(replaced) => replaced,
            Err(e) => {
                error!(kind = %F::KIND, id = %existing.id, error = %e, "update: replace failed");
                if let Some(asset) = new_asset.as_ref() {
                    self.discard_orphan(asset).await;
                }
                return Err(e.into());
            }
        };

        if !replaced {
            warn!(kind = %F::KIND, id = %existing.id, "update: document vanished before replace");
            if let Some(asset) = new_asset.as_ref() {
                self.discard_orphan(asset).await;
            }
            return Err(RepoError::NotFound {
                kind: F::KIND,
                id: existing.id,
            });
        }

        if new_asset.is_some() && self.config.cleanup_orphaned_assets {
            self.discard_superseded(&existing.asset_url).await;
        }

        debug!(kind = %F::KIND, id = %existing.id, "entity updated in place");
        Ok(Record {
            id: existing.id,
            created_at: existing.created_at,
            asset_url,
            fields,
        })
    }

    // ---- Helpers ----

    fn check_fields(&self, fields: &F) -> RepoResult<()> {
        fields.validate().map_err(|e| {
            warn!(kind = %F::KIND, error = %e, "fields rejected");
            RepoError::InvalidFields(e)
        })
    }

    fn check_upload(&self, upload: &AssetUpload) -> RepoResult<()> {
        self.validator.validate(upload).map_err(|e| {
            warn!(
                kind = %F::KIND,
                file = %upload.file_name,
                error = %e,
                "upload rejected"
            );
            RepoError::Validation(e)
        })
    }

    async fn upload(&self, upload: &AssetUpload) -> RepoResult<StoredAsset> {
        let path = self.namer.storage_path(F::KIND, upload);
        self.assets
            .put(&path, upload.bytes.clone())
            .await
            .map_err(|e| {
                error!(kind = %F::KIND, path = %path, error = %e, "asset upload failed");
                RepoError::Storage(e)
            })
    }

    async fn insert(
        &self,
        fields: F,
        asset_url: &str,
        created_at: DateTime<Utc>,
        uploaded: Option<&StoredAsset>,
    ) -> RepoResult<Record<F>> {
        let document = self.encode(&fields, asset_url, &created_at)?;
        match self.documents.insert(self.collection(), document).await {
            Ok(id) => Ok(Record {
                id,
                created_at,
                asset_url: asset_url.to_string(),
                fields,
            }),
            Err(e) => {
                error!(kind = %F::KIND, error = %e, "document insert failed");
                if let Some(asset) = uploaded {
                    self.discard_orphan(asset).await;
                }
                Err(e.into())
            }
        }
    }

    /// Compensation for an upload whose document was never written.
    async fn discard_orphan(&self, asset: &StoredAsset) {
        if !self.config.cleanup_orphaned_assets {
            warn!(kind = %F::KIND, path = %asset.path, "asset left orphaned");
            return;
        }
        match self.assets.delete(&asset.path).await {
            Ok(_) => debug!(kind = %F::KIND, path = %asset.path, "orphaned asset removed"),
            Err(e) => error!(
                kind = %F::KIND,
                path = %asset.path,
                error = %e,
                "orphaned asset cleanup failed"
            ),
        }
    }

    /// Best-effort removal of an asset a new upload replaced.
    async fn discard_superseded(&self, url: &str) {
        let Some(path) = self.assets.path_for_url(url) else {
            debug!(kind = %F::KIND, url, "superseded asset not owned by this store");
            return;
        };
        if let Err(e) = self.assets.delete(&path).await {
            error!(kind = %F::KIND, path = %path, error = %e, "superseded asset cleanup failed");
        }
    }

    fn encode(
        &self,
        fields: &F,
        asset_url: &str,
        created_at: &DateTime<Utc>,
    ) -> RepoResult<Document> {
        Record::build_document(fields, asset_url, created_at).map_err(RepoError::InvalidFields)
    }

    fn decode(&self, id: DocumentId, document: Document) -> RepoResult<Record<F>> {
        Record::from_document(id.clone(), document).map_err(|e| {
            warn!(kind = %F::KIND, id = %id, error = %e, "stored document rejected");
            RepoError::Malformed {
                kind: F::KIND,
                id,
                reason: e.to_string(),
            }
        })
    }
}

impl<F> Clone for EntityRepository<F> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            assets: Arc::clone(&self.assets),
            validator: self.validator.clone(),
            namer: self.namer.clone(),
            config: self.config.clone(),
            _fields: PhantomData,
        }
    }
}

impl<F: EntityFields> fmt::Debug for EntityRepository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("kind", &F::KIND)
            .field("config", &self.config)
            .finish()
    }
}
