use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored document.
///
/// Ids are assigned by the document store at insertion time and are never
/// chosen by callers. The value is opaque: backends may use any non-empty
/// string, the built-in ones use a UUID v7 in simple (hyphen-less) form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh time-ordered id (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().simple().to_string())
    }

    /// Wrap an id previously handed out by a store.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.short_id())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DocumentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(!a.as_str().contains('-'));
    }

    #[test]
    fn short_id_truncates() {
        let id = DocumentId::new("abcdefghijkl");
        assert_eq!(id.short_id(), "abcdefgh");
        assert_eq!(format!("{id:?}"), "DocumentId(abcdefgh)");

        let short = DocumentId::new("abc");
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = DocumentId::new("doc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-1\"");
        let back: DocumentId = serde_json::from_str("\"doc-1\"").unwrap();
        assert_eq!(back, id);
    }
}
