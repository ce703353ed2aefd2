//! Image processing — pure Rust, no system libraries or external processes.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode (JPEG, PNG)** | `image::load_from_memory` |
//! | **Metadata strip** | decode → re-encode PNG ([`normalize`]) |
//! | **Resample** | Lanczos3 via `image::imageops` |
//! | **Composite** | safe-zone clip + alpha blend ([`compositor`]) |
//! | **Size optimize** | quality scan over PNG compression ([`optimize`]) |
//!
//! The module is split into:
//! - **Calculations**: pure placement math (unit testable without pixels)
//! - **Normalize**: EXIF-stripping decode/re-encode
//! - **Compositor**: flattening photo + overlay onto the canvas
//! - **Optimize**: the export size budget scan

pub mod calculations;
pub mod compositor;
pub mod normalize;
pub mod optimize;

pub use calculations::{
    Placement, SCALE_MAX, SCALE_MIN, ZOOM_STEP, calculate_cover_fit, calculate_placement,
    clamp_scale, drag_to_canvas,
};
pub use compositor::{ComposeError, compose};
pub use normalize::{NormalizeError, NormalizedPhoto, strip_metadata};
pub use optimize::{OptimizeError, SIZE_BUDGET_BYTES, optimize, optimize_with};
