use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::upload::AssetUpload;

/// Largest accepted upload: 5 MiB.
pub const DEFAULT_MAX_ASSET_BYTES: u64 = 5 * 1024 * 1024;

/// Content types accepted by default: the web image formats used on the site.
const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/svg+xml"];

/// Limits applied to every upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPolicy {
    /// Maximum size in bytes (inclusive).
    pub max_bytes: u64,
    /// Allowed MIME types, compared case-insensitively.
    pub allowed_types: Vec<String>,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_ASSET_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Checks an upload's declared type and size.
///
/// Synchronous and side-effect free; callers run it before any network or
/// disk access so a rejected upload never reaches storage.
#[derive(Clone, Debug, Default)]
pub struct AssetValidator {
    policy: AssetPolicy,
}

impl AssetValidator {
    pub fn new(policy: AssetPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AssetPolicy {
        &self.policy
    }

    /// Validate an upload. The type is checked before the size.
    pub fn validate(&self, upload: &AssetUpload) -> Result<(), ValidationError> {
        let declared = essence(&upload.content_type);
        let allowed = self
            .policy
            .allowed_types
            .iter()
            .any(|t| essence(t) == declared);
        if !allowed {
            return Err(ValidationError::UnsupportedType {
                content_type: upload.content_type.clone(),
                allowed: self.policy.allowed_types.join(", "),
            });
        }

        let size = upload.size();
        if size > self.policy.max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                max: self.policy.max_bytes,
            });
        }

        Ok(())
    }
}

/// Lowercased type/subtype with parameters stripped; `image/jpg` is folded
/// into `image/jpeg`.
fn essence(content_type: &str) -> String {
    let bare = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if bare == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        bare
    }
}
