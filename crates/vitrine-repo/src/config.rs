use serde::{Deserialize, Serialize};
use vitrine_assets::AssetPolicy;

/// How `update` writes the changed record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Delete the stored document, then insert a new one. The record gets a
    /// new id; without a new file it keeps its asset URL and `created_at`.
    /// The two steps are not atomic.
    #[default]
    Replace,
    /// Overwrite the stored document under its existing id, keeping
    /// `created_at`. The asset changes only when a new file is supplied.
    InPlace,
}

/// Configuration shared by the content repositories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Upload limits.
    pub asset_policy: AssetPolicy,
    /// Write strategy for `update`.
    pub update_mode: UpdateMode,
    /// Delete an uploaded asset again when the document write that should
    /// reference it fails, and (in [`UpdateMode::InPlace`]) delete the asset
    /// a new upload superseded. Cleanup is best effort; failures are logged.
    pub cleanup_orphaned_assets: bool,
}

impl RepositoryConfig {
    /// Stable ids and compensating asset cleanup.
    pub fn consistent() -> Self {
        Self {
            update_mode: UpdateMode::InPlace,
            cleanup_orphaned_assets: true,
            ..Default::default()
        }
    }
}
