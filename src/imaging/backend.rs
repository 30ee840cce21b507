//! Image storage backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers everything the editor needs from storage:
//! identify, load the seed snapshot, and save the edited result. Pixel edits
//! never go through a backend; they are pure functions in
//! [`transforms`](super::transforms).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image storage backends.
///
/// `load` always yields 8-bit RGB: alpha and higher bit depths are dropped on
/// the way in, because every snapshot in the history shares that format.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image into an RGB snapshot.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError>;
}
