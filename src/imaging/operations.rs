//! High-level image operations.
//!
//! [`Edit`] names one whole-image adjustment with its parameters already
//! range-checked; [`apply_edit`] routes it to the matching transform. The
//! storage helpers wrap an [`ImageBackend`] with the checks the editor needs
//! before a file can become a history base.

use super::backend::{BackendError, ImageBackend};
use super::params::{Brightness, Contrast};
use super::transforms;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A whole-image edit, as pushed onto the history while idle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Brightness(Brightness),
    Contrast(Contrast),
    Grayscale,
    Invert,
    ColorFilter(Rgb<u8>),
    Flip,
    Rotate,
}

/// Compute the result of `edit` against `src`.
pub fn apply_edit(src: &RgbImage, edit: Edit) -> RgbImage {
    match edit {
        Edit::Brightness(delta) => transforms::brightness(src, delta),
        Edit::Contrast(delta) => transforms::contrast(src, delta),
        Edit::Grayscale => transforms::grayscale(src),
        Edit::Invert => transforms::invert(src),
        Edit::ColorFilter(color) => transforms::color_filter(src, color),
        Edit::Flip => transforms::flip(src),
        Edit::Rotate => transforms::rotate(src),
    }
}

/// Load the seed snapshot for an editing session.
///
/// The header is read first: an image with no pixels is rejected before any
/// decoding happens.
pub fn load_snapshot(backend: &impl ImageBackend, path: &Path) -> Result<RgbImage> {
    let dims = backend.identify(path)?;
    if dims.width == 0 || dims.height == 0 {
        return Err(BackendError::Decode {
            path: path.display().to_string(),
            reason: "image has no pixels".to_string(),
        });
    }
    debug!(path = %path.display(), width = dims.width, height = dims.height, "decoding");
    backend.load(path)
}

/// Write the current snapshot, creating the parent directory if needed.
pub fn save_snapshot(backend: &impl ImageBackend, image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    backend.save(image, path)
}
