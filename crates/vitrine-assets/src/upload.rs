use bytes::Bytes;

/// A file submitted alongside an entity's fields.
///
/// `content_type` is whatever the submitting client declared; it is not
/// sniffed from the bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl AssetUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased extension of the original file name, if it has a usable one.
    ///
    /// Only ASCII alphanumerics are kept so the extension is always safe to
    /// embed in a storage path.
    pub fn extension(&self) -> Option<String> {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name);
        let (stem, ext) = base.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        let cleaned: String = ext
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> AssetUpload {
        AssetUpload::new(name, "image/png", vec![0u8; 3])
    }

    #[test]
    fn size_counts_bytes() {
        assert_eq!(named("a.png").size(), 3);
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(named("Logo.PNG").extension().as_deref(), Some("png"));
        assert_eq!(named("archive.tar.gz").extension().as_deref(), Some("gz"));
    }

    #[test]
    fn extension_ignores_directories_and_dotfiles() {
        assert_eq!(named("dir.v2/logo").extension(), None);
        assert_eq!(named(".hidden").extension(), None);
        assert_eq!(named("C:\\images\\team.jpeg").extension().as_deref(), Some("jpeg"));
    }

    #[test]
    fn extension_strips_unsafe_characters() {
        assert_eq!(named("x.p/n").extension(), None);
        assert_eq!(named("x.sv g").extension().as_deref(), Some("svg"));
        assert_eq!(named("x.").extension(), None);
    }
}
