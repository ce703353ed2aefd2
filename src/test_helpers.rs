//! Shared test utilities for the moldura test suite.
//!
//! All fixtures are synthetic: photos are deterministic gradients built with
//! `RgbImage::from_fn`, overlays are generated per template. No binary
//! fixture files to keep in sync.

use crate::templates::Template;
use image::{DynamicImage, ImageFormat, Rgba, RgbImage, RgbaImage};
use std::io::Cursor;

// =========================================================================
// Photos
// =========================================================================

/// A deterministic gradient photo. Adjacent pixels differ, so translation
/// and cropping bugs show up as pixel mismatches.
pub fn test_photo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// [`test_photo`] encoded as JPEG, for upload-path tests.
pub fn photo_jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&test_photo(width, height), ImageFormat::Jpeg)
}

/// [`test_photo`] encoded as PNG, for upload-path tests.
pub fn photo_png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&test_photo(width, height), ImageFormat::Png)
}

// =========================================================================
// Overlays
// =========================================================================

/// Opaque frame color used by [`overlay_with_window`], distinct from any
/// color [`test_photo`] produces (its blue channel is always 128).
pub const FRAME_COLOR: Rgba<u8> = Rgba([10, 20, 30, 255]);

/// A canvas-sized overlay: opaque [`FRAME_COLOR`] everywhere except a fully
/// transparent window over the safe zone, like the real promotional frames.
pub fn overlay_with_window(template: &Template) -> DynamicImage {
    let zone = &template.safe_zone;
    let image = RgbaImage::from_fn(template.canvas_width, template.canvas_height, |x, y| {
        let inside = x >= zone.x
            && x < zone.x + zone.width
            && y >= zone.y
            && y < zone.y + zone.height;
        if inside { Rgba([0, 0, 0, 0]) } else { FRAME_COLOR }
    });
    DynamicImage::ImageRgba8(image)
}

/// A fully transparent canvas-sized overlay, for tests that inspect the
/// photo layer alone.
pub fn transparent_overlay(template: &Template) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::new(
        template.canvas_width,
        template.canvas_height,
    ))
}

/// [`overlay_with_window`] encoded as PNG, as an editor would load it.
pub fn overlay_png_bytes(template: &Template) -> Vec<u8> {
    encode(&overlay_with_window(template), ImageFormat::Png)
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}
