//! EXIF-stripping normalizer.
//!
//! Re-decodes an upload into a flat raster at its native dimensions and
//! re-encodes it as a fresh PNG. Only pixel data survives the round trip, so
//! embedded metadata — EXIF orientation, GPS position, camera serials — is
//! discarded wholesale rather than scrubbed field by field.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The upload could not be decoded (corrupt or unsupported data).
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// The decoded raster could not be re-encoded as PNG.
    #[error("failed to re-encode image: {0}")]
    Encode(#[source] image::ImageError),
}

impl NormalizeError {
    /// The single message shown to users for either failure path. The
    /// variants stay distinguishable for diagnostics.
    pub fn user_message(&self) -> &'static str {
        "Failed to load image"
    }
}

/// A normalized photo: the renderable raster plus its metadata-free encoding.
#[derive(Debug)]
pub struct NormalizedPhoto {
    /// Decoded raster at native pixel dimensions, ready for composition.
    pub image: DynamicImage,
    /// Fresh PNG encoding of the raster, carrying no source metadata.
    pub png: Vec<u8>,
}

/// Decode an upload and re-encode it as a metadata-free PNG.
///
/// Recoverable: a failure leaves no partial state behind and the caller's
/// session stays interactable.
pub fn strip_metadata(bytes: &[u8]) -> Result<NormalizedPhoto, NormalizeError> {
    let image = image::load_from_memory(bytes).map_err(NormalizeError::Decode)?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(NormalizeError::Encode)?;

    Ok(NormalizedPhoto { image, png })
}
