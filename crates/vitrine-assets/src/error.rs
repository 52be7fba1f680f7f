use thiserror::Error;

/// Reasons an upload is refused before it reaches storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The declared content type is not on the allow-list.
    #[error("unsupported file type `{content_type}`; allowed: {allowed}")]
    UnsupportedType {
        content_type: String,
        allowed: String,
    },

    /// The file is larger than the policy permits.
    #[error("file too large: {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },
}

impl ValidationError {
    /// `true` for [`ValidationError::UnsupportedType`].
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }

    /// `true` for [`ValidationError::TooLarge`].
    pub fn is_size_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}
