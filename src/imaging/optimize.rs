//! Export size optimizer — a planned degradation search, not a retry loop.
//!
//! Re-encodes the composited surface at decreasing quality until the result
//! fits the upload budget. The scan is greedy and linear on purpose: quality
//! starts at 0.9 and steps down by exactly 0.1 to a floor of exactly 0.5,
//! so behavior is deterministic across implementations. If even the floor
//! encoding is over budget, that encoding is returned anyway — the optimizer
//! never fails solely because of size.
//!
//! Quality maps onto PNG compression effort: the encoder has no lossy
//! quality knob, so lower quality buys a harder-working (smaller) encode.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use thiserror::Error;

/// Upload budget the optimizer aims for.
pub const SIZE_BUDGET_BYTES: usize = 3 * 1024 * 1024;
/// First quality attempted.
pub const QUALITY_START: f64 = 0.9;
/// Lowest quality ever encoded.
pub const QUALITY_FLOOR: f64 = 0.5;
/// Decrement between attempts.
pub const QUALITY_STEP: f64 = 0.1;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("failed to encode surface at quality {quality:.1}: {source}")]
    Encode {
        quality: f64,
        #[source]
        source: image::ImageError,
    },
}

/// Re-encode `surface` until it fits [`SIZE_BUDGET_BYTES`], best-effort.
pub fn optimize(surface: &RgbaImage) -> Result<Vec<u8>, OptimizeError> {
    optimize_with(|quality| {
        encode_at_quality(surface, quality).map_err(|source| OptimizeError::Encode {
            quality,
            source,
        })
    })
}

/// The quality scan, generic over the encoder so the search itself is
/// testable without pixel work.
///
/// Calls `encode` at 0.9, 0.8, ... 0.5 and returns the first result within
/// budget; the floor encoding is returned even when over budget. Quality is
/// tracked in integer tenths internally so float drift can never skip a
/// step or dip below the floor.
pub fn optimize_with<E>(
    mut encode: impl FnMut(f64) -> Result<Vec<u8>, E>,
) -> Result<Vec<u8>, E> {
    let start_tenths = (QUALITY_START * 10.0).round() as u32;
    let floor_tenths = (QUALITY_FLOOR * 10.0).round() as u32;

    for tenths in (floor_tenths..=start_tenths).rev() {
        let blob = encode(tenths as f64 / 10.0)?;
        if blob.len() <= SIZE_BUDGET_BYTES || tenths == floor_tenths {
            return Ok(blob);
        }
    }
    unreachable!("floor iteration always returns");
}

/// PNG has no lossy quality setting; map the quality scan onto compression
/// effort so each step is deterministic and monotone in effort.
fn compression_for(quality: f64) -> CompressionType {
    if quality >= 0.8 {
        CompressionType::Fast
    } else if quality >= 0.6 {
        CompressionType::Default
    } else {
        CompressionType::Best
    }
}

fn encode_at_quality(surface: &RgbaImage, quality: f64) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, compression_for(quality), FilterType::Adaptive)
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )?;
    Ok(out)
}
