use chrono::Utc;
use rand::Rng;
use vitrine_types::EntityKind;

use crate::upload::AssetUpload;

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const DEFAULT_TOKEN_LEN: usize = 8;

/// Derives storage keys for uploads.
///
/// A key is `{unix_millis}-{token}.{ext}`. The random token is what keeps
/// two uploads of the same file within the same millisecond apart; the file
/// contents play no part, so duplicates are stored twice.
#[derive(Clone, Debug)]
pub struct AssetNamer {
    token_len: usize,
}

impl Default for AssetNamer {
    fn default() -> Self {
        Self {
            token_len: DEFAULT_TOKEN_LEN,
        }
    }
}

impl AssetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A namer with a custom token length (at least one character).
    pub fn with_token_len(token_len: usize) -> Self {
        Self {
            token_len: token_len.max(1),
        }
    }

    /// Unique key for `upload`, without a directory prefix.
    pub fn name(&self, upload: &AssetUpload) -> String {
        let millis = Utc::now().timestamp_millis();
        let token = self.token();
        match upload.extension() {
            Some(ext) => format!("{millis}-{token}.{ext}"),
            None => format!("{millis}-{token}"),
        }
    }

    /// Full storage path: the kind's collection as directory, then the key.
    pub fn storage_path(&self, kind: EntityKind, upload: &AssetUpload) -> String {
        format!("{}/{}", kind.collection(), self.name(upload))
    }

    fn token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.token_len)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect()
    }
}
