use std::sync::Arc;

use vitrine_store::{AssetStore, DocumentStore, InMemoryAssetStore, InMemoryDocumentStore};
use vitrine_types::{ClientFields, ExpertFields, ProjectFields, TestimonialFields};

use crate::config::RepositoryConfig;
use crate::repository::EntityRepository;

/// One repository per content kind, all sharing the same store handles.
#[derive(Clone, Debug)]
pub struct ContentCatalog {
    pub clients: EntityRepository<ClientFields>,
    pub experts: EntityRepository<ExpertFields>,
    pub projects: EntityRepository<ProjectFields>,
    pub testimonials: EntityRepository<TestimonialFields>,
}

impl ContentCatalog {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        assets: Arc<dyn AssetStore>,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            clients: EntityRepository::new(documents.clone(), assets.clone(), config.clone()),
            experts: EntityRepository::new(documents.clone(), assets.clone(), config.clone()),
            projects: EntityRepository::new(documents.clone(), assets.clone(), config.clone()),
            testimonials: EntityRepository::new(documents, assets, config),
        }
    }

    /// A catalog over fresh in-memory stores.
    pub fn in_memory(config: RepositoryConfig) -> Self {
        Self::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryAssetStore::new()),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_assets::AssetUpload;
    use vitrine_types::PartnerCategory;

    fn upload() -> AssetUpload {
        AssetUpload::new("photo.jpeg", "image/jpeg", vec![1u8; 8])
    }

    #[tokio::test]
    async fn kinds_share_stores_but_not_collections() {
        let documents = Arc::new(InMemoryDocumentStore::new());
        let assets = Arc::new(InMemoryAssetStore::new());
        let catalog = ContentCatalog::new(
            documents.clone(),
            assets.clone(),
            RepositoryConfig::default(),
        );

        let client = catalog
            .clients
            .create(
                ClientFields {
                    name: "Initech".into(),
                    website: "https://initech.example".into(),
                    category: PartnerCategory::Client,
                },
                upload(),
            )
            .await
            .unwrap();
        catalog
            .testimonials
            .create(
                TestimonialFields {
                    name: "Bill".into(),
                    role: "VP".into(),
                    company: "Initech".into(),
                    content: "Great TPS reports.".into(),
                },
                upload(),
            )
            .await
            .unwrap();

        assert_eq!(documents.len("clients"), 1);
        assert_eq!(documents.len("testimonials"), 1);
        assert_eq!(assets.len(), 2);
        assert!(catalog.experts.get(&client.id).await.unwrap().is_none());
        assert!(catalog.projects.list(None).await.unwrap().is_empty());
    }

    #[test]
    fn in_memory_applies_config_to_every_kind() {
        let catalog = ContentCatalog::in_memory(RepositoryConfig::consistent());
        assert!(catalog.clients.config().cleanup_orphaned_assets);
        assert!(catalog.testimonials.config().cleanup_orphaned_assets);
    }
}
