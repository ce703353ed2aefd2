//! The compositor: flattens user photo + overlay into the output raster.
//!
//! [`compose`] is a pure function over a caller-supplied surface. Drawing
//! order:
//!
//! 1. Reset the surface to the template's canvas dimensions (clears prior
//!    content — the surface may be reused across compositions).
//! 2. Clip to the safe zone: the user image can only touch pixels inside it.
//! 3. Cover-fit the user image to the zone ([`calculate_cover_fit`]).
//! 4. Multiply the fit by the caller-clamped zoom factor.
//! 5. Center on the zone centroid, then translate by the pan offset.
//! 6. Draw the user image with that placement, clipped.
//! 7. Drop the clip.
//! 8. Draw the overlay at full canvas size on top — its transparent window
//!    lets the photo show through.
//! 9. Encode the surface as PNG.
//!
//! With no user image, steps 2–7 are skipped and the overlay alone is
//! rendered — the placeholder preview shown before any upload.
//!
//! [`calculate_cover_fit`]: super::calculations::calculate_cover_fit

use super::calculations::calculate_placement;
use crate::templates::Template;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    /// Drawing failed — degenerate geometry or an unusable surface.
    #[error("failed to render composition: {0}")]
    Render(String),
    /// The finished surface could not be encoded as PNG.
    #[error("failed to encode composition: {0}")]
    Encode(#[source] image::ImageError),
}

/// Composite `user` (if any) and `overlay` onto `surface` per `template`,
/// returning the PNG encoding of the result.
///
/// Idempotent and side-effect-free apart from mutating `surface`. `scale`
/// is expected pre-clamped to the editor's zoom range; `offset` is in
/// canvas pixels and (0, 0) for zoom-only editors.
pub fn compose(
    surface: &mut RgbaImage,
    user: Option<&DynamicImage>,
    overlay: &DynamicImage,
    template: &Template,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
) -> Result<Vec<u8>, ComposeError> {
    debug_assert!(template.safe_zone_in_bounds());

    let (canvas_w, canvas_h) = (template.canvas_width, template.canvas_height);
    if canvas_w == 0 || canvas_h == 0 {
        return Err(ComposeError::Render("canvas has zero dimension".into()));
    }
    reset_surface(surface, canvas_w, canvas_h);

    if let Some(user) = user {
        draw_user_clipped(surface, user, template, scale, (offset_x, offset_y))?;
    }

    draw_overlay(surface, overlay);
    encode_png(surface).map_err(ComposeError::Encode)
}

/// Resize the surface to the canvas dimensions, clearing any prior content.
fn reset_surface(surface: &mut RgbaImage, width: u32, height: u32) {
    if surface.dimensions() != (width, height) {
        *surface = RgbaImage::new(width, height);
    } else {
        for pixel in surface.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Steps 2–6: draw the user image, confined to the safe-zone clip.
fn draw_user_clipped(
    surface: &mut RgbaImage,
    user: &DynamicImage,
    template: &Template,
    scale: f64,
    offset: (f64, f64),
) -> Result<(), ComposeError> {
    let zone = &template.safe_zone;
    let placement = calculate_placement(zone, (user.width(), user.height()), scale, offset);

    // The clip is the intersection of the placement rect with the safe zone;
    // at scale >= 1 the cover fit guarantees it equals the whole zone.
    let clip_x0 = placement.x.max(zone.x as f64);
    let clip_y0 = placement.y.max(zone.y as f64);
    let clip_x1 = (placement.x + placement.width).min((zone.x + zone.width) as f64);
    let clip_y1 = (placement.y + placement.height).min((zone.y + zone.height) as f64);
    if clip_x1 <= clip_x0 || clip_y1 <= clip_y0 {
        // Panned fully out of the zone — nothing of the photo is visible.
        return Ok(());
    }

    let draw_w = placement.width.round() as u32;
    let draw_h = placement.height.round() as u32;
    if draw_w == 0 || draw_h == 0 {
        return Err(ComposeError::Render(format!(
            "degenerate draw size {:.2}x{:.2}",
            placement.width, placement.height
        )));
    }

    let scaled = user.resize_exact(draw_w, draw_h, FilterType::Lanczos3);

    // Window of the scaled image that falls inside the clip.
    let src_x = ((clip_x0 - placement.x).round().max(0.0) as u32).min(draw_w - 1);
    let src_y = ((clip_y0 - placement.y).round().max(0.0) as u32).min(draw_h - 1);
    let vis_w = ((clip_x1 - clip_x0).round() as u32).min(draw_w - src_x);
    let vis_h = ((clip_y1 - clip_y0).round() as u32).min(draw_h - src_y);
    if vis_w == 0 || vis_h == 0 {
        return Ok(());
    }

    let visible = scaled.crop_imm(src_x, src_y, vis_w, vis_h);
    imageops::overlay(
        surface,
        &visible,
        clip_x0.round() as i64,
        clip_y0.round() as i64,
    );
    Ok(())
}

/// Step 8: the overlay covers the full canvas, drawn above the photo.
fn draw_overlay(surface: &mut RgbaImage, overlay: &DynamicImage) {
    let (w, h) = surface.dimensions();
    if overlay.dimensions() == (w, h) {
        imageops::overlay(surface, overlay, 0, 0);
    } else {
        let sized = overlay.resize_exact(w, h, FilterType::Lanczos3);
        imageops::overlay(surface, &sized, 0, 0);
    }
}

fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        surface.as_raw(),
        surface.width(),
        surface.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}
