use std::path::Path;

/// Fallback for unknown extensions; never on the image allow-list.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a content type from a file extension, the way a browser declares
/// one for a file input.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => OCTET_STREAM,
    }
}
