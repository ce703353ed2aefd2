//! Pure placement math for the compositor.
//!
//! Everything here is a pure function over numbers — no I/O, no pixels — so
//! the geometry that drives composition is unit-testable in isolation.

use crate::templates::SafeZone;

/// Lower bound of the user-controlled zoom factor.
pub const SCALE_MIN: f64 = 0.5;
/// Upper bound of the user-controlled zoom factor.
pub const SCALE_MAX: f64 = 3.0;
/// Increment applied by the zoom in/out buttons.
pub const ZOOM_STEP: f64 = 0.1;

/// Clamp a zoom factor to the supported range.
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(SCALE_MIN, SCALE_MAX)
}

/// Calculate "cover" dimensions: fill the zone while preserving the source
/// aspect ratio, letting the longer dimension overflow.
///
/// Let `r = source.w / source.h`. If the zone is wider than the source
/// (relative to heights), the fit matches the zone width and the height
/// overflows; otherwise the fit matches the zone height and the width
/// overflows. Either way the zone is fully covered with no letterboxing —
/// the excess is cropped by the safe-zone clip.
///
/// # Examples
/// ```
/// # use moldura::imaging::calculate_cover_fit;
/// // 4:3 landscape into the 810x922 feed zone: the zone is taller, so
/// // the fit pins height and width overflows.
/// let (w, h) = calculate_cover_fit((4000, 3000), (810, 922));
/// assert_eq!(h, 922.0);
/// assert!(w > 810.0);
/// ```
pub fn calculate_cover_fit(source: (u32, u32), zone: (u32, u32)) -> (f64, f64) {
    let aspect = source.0 as f64 / source.1 as f64;
    let (zone_w, zone_h) = (zone.0 as f64, zone.1 as f64);

    if zone_w / zone_h > aspect {
        // Zone is wider than the source: match width, let height overflow
        let w = zone_w;
        (w, w / aspect)
    } else {
        // Zone is taller than the source: match height, let width overflow
        let h = zone_h;
        (h * aspect, h)
    }
}

/// Where and how large the user image is drawn, in canvas pixels.
///
/// Coordinates are fractional — rasterization rounds at the last moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Compute the draw rectangle for a source image inside a safe zone.
///
/// Cover fit, multiplied by `scale`, centered on the zone centroid, then
/// translated by `offset` (canvas pixels). The caller clamps `scale` to
/// [`SCALE_MIN`]..=[`SCALE_MAX`]; offset is (0, 0) for zoom-only editors.
pub fn calculate_placement(
    zone: &SafeZone,
    source: (u32, u32),
    scale: f64,
    offset: (f64, f64),
) -> Placement {
    let (fit_w, fit_h) = calculate_cover_fit(source, (zone.width, zone.height));
    let draw_w = fit_w * scale;
    let draw_h = fit_h * scale;
    let (center_x, center_y) = zone.center();

    Placement {
        x: center_x - draw_w / 2.0 + offset.0,
        y: center_y - draw_h / 2.0 + offset.1,
        width: draw_w,
        height: draw_h,
    }
}

/// Convert an on-screen pointer delta to canvas pixels.
///
/// The preview element is typically scaled down from the true canvas
/// resolution, so raw pointer deltas are rescaled by the ratio
/// `canvas_dimension / displayed_dimension` per axis before being applied
/// to the pan offset: `canvas_delta = screen_delta / ratio`.
pub fn drag_to_canvas(delta: (f64, f64), canvas: (u32, u32), display: (f64, f64)) -> (f64, f64) {
    let ratio_x = canvas.0 as f64 / display.0;
    let ratio_y = canvas.1 as f64 / display.1;
    (delta.0 / ratio_x, delta.1 / ratio_y)
}
