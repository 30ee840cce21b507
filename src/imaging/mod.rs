//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Load / save** | `image` crate codecs via [`RustBackend`] |
//! | **Adjustments** | per-pixel rules, rows filled in parallel with `rayon` |
//! | **Flip / rotate / crop** | `image::imageops` |
//! | **Crop preview** | translucent wash composited outside the selection |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry and compositing (unit testable)
//! - **Parameters**: Range-checked inputs for each transform
//! - **Transforms**: The pixel operations themselves (pure, never fail)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`Edit`] dispatch plus load/save helpers

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod transforms;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{clamp_crop_rect, default_crop_rect};
pub use operations::{Edit, apply_edit, load_snapshot, save_snapshot};
pub use params::{Brightness, Contrast, CropRect, Shade};
pub use rust_backend::RustBackend;
