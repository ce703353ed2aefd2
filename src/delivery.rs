//! Artifact delivery — an explicit two-step strategy.
//!
//! Rather than burying the fallback in a catch-all, the strategy is
//! explicit: attempt capability A (a [`ShareTarget`], when one is present
//! and willing); on unavailability or any share failure, deterministically
//! execute fallback B (a direct file save under the output directory with
//! the template's fixed filename). The user always ends with a completed
//! action; share failures are never surfaced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A finished export: PNG bytes plus the filename they should ship under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub png: Vec<u8>,
}

/// Rejection from a share target. Swallowed by the fallback, kept for
/// diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("share rejected: {0}")]
pub struct ShareError(pub String);

/// A platform share capability (e.g. a native share sheet).
pub trait ShareTarget {
    /// Whether this target is willing to take an artifact of this type.
    fn can_share(&self, artifact: &ExportArtifact) -> bool;

    /// Hand the artifact to the platform. May fail even after a positive
    /// [`can_share`](Self::can_share) answer (e.g. the user dismissed it).
    fn share(&self, artifact: &ExportArtifact) -> Result<(), ShareError>;
}

/// How the artifact ultimately reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    /// The share target accepted the artifact.
    Shared,
    /// Fallback path: the artifact was written to disk.
    Saved(PathBuf),
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("failed to save artifact: {0}")]
    Io(#[from] io::Error),
}

/// Deliver an artifact: share when possible, save otherwise.
pub fn deliver(
    artifact: &ExportArtifact,
    share: Option<&dyn ShareTarget>,
    output_dir: &Path,
) -> Result<Delivered, DeliveryError> {
    if let Some(target) = share {
        if target.can_share(artifact) && target.share(artifact).is_ok() {
            return Ok(Delivered::Shared);
        }
    }

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&artifact.filename);
    fs::write(&path, &artifact.png)?;
    Ok(Delivered::Saved(path))
}
