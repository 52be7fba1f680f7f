use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use vitrine_repo::{ContentCatalog, RepositoryConfig};
use vitrine_store::{JsonFileDocumentStore, LocalAssetStore};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "vitrine.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root for `documents/` (one JSON file per collection) and `assets/`.
    pub data_dir: PathBuf,
    /// Public URL the `assets/` directory is served under.
    pub public_base_url: String,
    pub repository: RepositoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("vitrine-data"),
            public_base_url: "http://localhost:8080/uploads".into(),
            repository: RepositoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `path`, or `./vitrine.toml` if it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir.join("assets")
    }

    /// Open the on-disk stores and build the catalog over them.
    pub async fn open_catalog(&self) -> anyhow::Result<ContentCatalog> {
        let documents = JsonFileDocumentStore::open(self.documents_dir())
            .await
            .with_context(|| format!("opening {}", self.documents_dir().display()))?;
        let assets = LocalAssetStore::new(self.assets_dir(), self.public_base_url.clone());
        tracing::debug!(data_dir = %self.data_dir.display(), "stores opened");
        Ok(ContentCatalog::new(
            Arc::new(documents),
            Arc::new(assets),
            self.repository.clone(),
        ))
    }
}
