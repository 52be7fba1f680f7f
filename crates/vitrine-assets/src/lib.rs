//! Asset handling for Vitrine uploads.
//!
//! Every entity owns exactly one image asset. Before an upload reaches the
//! asset store it passes through two pure steps:
//!
//! 1. [`AssetValidator`] checks the declared content type and size against
//!    an [`AssetPolicy`]. Invalid uploads are rejected before any I/O.
//! 2. [`AssetNamer`] derives a unique storage key from the original file
//!    name (timestamp + random token + extension). Contents are never
//!    inspected, so identical files uploaded twice get two keys.

pub mod error;
pub mod mime;
pub mod namer;
pub mod upload;
pub mod validator;

pub use error::ValidationError;
pub use mime::content_type_for_path;
pub use namer::AssetNamer;
pub use upload::AssetUpload;
pub use validator::{AssetPolicy, AssetValidator, DEFAULT_MAX_ASSET_BYTES};
