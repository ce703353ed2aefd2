//! Upload validation — a pure predicate over (MIME type, byte size).
//!
//! Runs before any byte of file content is decoded: a candidate is judged on
//! its declared MIME type and size alone. Rejection reasons are the exact
//! user-facing messages the editor shows.

use thiserror::Error;

/// Uploads above this size are rejected outright.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// MIME type does not start with `image/`.
    #[error("File must be an image (jpg, png)")]
    NotAnImage { mime: String },
    /// Declared size exceeds [`MAX_UPLOAD_BYTES`].
    #[error("Image must be under 10MB")]
    TooLarge { size_bytes: u64 },
}

/// Accept or reject an upload candidate. No side effects.
pub fn validate_upload(mime: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size_bytes });
    }
    Ok(())
}
