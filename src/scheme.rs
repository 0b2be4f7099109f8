//! Local validation and object naming for scheme-image uploads.
//!
//! Everything here runs before any network call: a rejected file never
//! produces a request.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Maximum accepted scheme image size (10 MiB).
pub const MAX_SCHEME_BYTES: u64 = 10 * 1024 * 1024;

/// Object name prefix in the storage bucket.
pub const OBJECT_PREFIX: &str = "scheme";

/// Client-side rejection of an upload candidate. The display message is the
/// user-facing notice text (Russian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchemeRejection {
    #[error("Пожалуйста, выберите изображение")]
    NotAnImage,
    #[error("Размер файла не должен превышать 10 МБ")]
    TooLarge,
}

/// Validate an upload candidate by MIME type and size.
///
/// The MIME type must begin with `image/` and the size must not exceed
/// [`MAX_SCHEME_BYTES`]. Checked in that order, so an oversized non-image
/// reports the type rejection first.
pub fn validate_upload(mime: &str, size: u64) -> Result<(), SchemeRejection> {
    if !mime.starts_with("image/") {
        return Err(SchemeRejection::NotAnImage);
    }
    if size > MAX_SCHEME_BYTES {
        return Err(SchemeRejection::TooLarge);
    }
    Ok(())
}

/// Guess the MIME type of a local file from its extension.
///
/// A desktop file picker only yields a path, so unlike the browser there is
/// no MIME type attached to the file; unknown extensions return `None` and
/// are rejected as non-images.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Build a collision-resistant storage object name for an upload:
/// a fixed prefix, the upload timestamp in milliseconds, and the original
/// file extension.
pub fn object_name(original_name: &str, at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis();
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{OBJECT_PREFIX}-{millis}.{ext}"),
        _ => format!("{OBJECT_PREFIX}-{millis}"),
    }
}
