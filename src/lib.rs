//! # Moldura
//!
//! Composites a user photo into a promotional overlay frame and exports an
//! upload-ready PNG. Each template defines an output canvas, a rectangular
//! safe zone, and an overlay graphic with a transparent window over that
//! zone; the photo is cover-fitted into the zone, optionally zoomed and
//! panned, clipped, and flattened under the overlay.
//!
//! # Architecture: State In One Place, Pixels In Another
//!
//! The crate splits into an interaction layer that owns all mutable state
//! and a processing layer of pure functions over pixels:
//!
//! ```text
//! 1. Validate    mime + size    →  accept/reject     (no pixel work)
//! 2. Normalize   upload bytes   →  clean raster       (EXIF stripped)
//! 3. Compose     state + assets →  flattened canvas   (clip + overlay)
//! 4. Optimize    canvas         →  PNG ≤ 3 MiB        (quality scan)
//! 5. Deliver     artifact       →  share or save      (explicit fallback)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Determinism**: the same state always composites to the same bytes,
//!   so previews are reproducible and testable by pixel inspection.
//! - **Stale-proofing**: every composition carries a sequence number; a
//!   slow render can never overwrite a newer preview.
//! - **Testability**: placement math, the quality scan, and the delivery
//!   strategy are each pure functions exercised without a display or a
//!   real share sheet.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`templates`] | Static registry of canvas geometry and safe zones |
//! | [`validate`] | Upload gate — MIME and size checks before any decode |
//! | [`imaging`] | Pure image operations: placement math, normalize, compose, optimize |
//! | [`editor`] | The interaction controller — owns state, drives recomposition |
//! | [`delivery`] | Share-or-save artifact delivery with deterministic fallback |
//! | [`config`] | `moldura.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## PNG-Only Output
//!
//! Exports are always PNG regardless of the upload format. Overlay frames
//! need alpha, PNG round-trips the flattened canvas losslessly, and
//! re-encoding drops EXIF (including GPS) as a side effect. The size
//! optimizer maps its quality scan onto PNG compression effort, since the
//! format has no lossy quality knob.
//!
//! ## Safe-Zone Clipping Over Trust
//!
//! The overlay's transparent window *should* mask the photo, but the
//! compositor clips to the safe zone anyway. A mispainted asset can then
//! never leak user pixels outside the window, and templates whose overlay
//! is fully transparent still behave.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) for
//! everything: decode, resample, composite, encode. No system libraries,
//! no external processes; the binary is self-contained.
//!
//! ## Recenter-On-Zoom, Not Anchor-On-Zoom
//!
//! Zoom always recenters on the safe-zone centroid plus the pan offset.
//! The offset is in canvas pixels, so zooming does not drift the pan the
//! way screen-space offsets would.

pub mod config;
pub mod delivery;
pub mod editor;
pub mod imaging;
pub mod templates;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
