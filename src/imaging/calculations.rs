//! Pure calculation functions for crop geometry and compositing.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::CropRect;

/// Default crop rectangle for a freshly started crop session.
///
/// Centered, half the width and half the height of the image:
/// `x = w/4, y = h/4, width = w/2, height = h/2` (integer division).
///
/// # Examples
/// ```
/// # use vox_edit::imaging::{CropRect, default_crop_rect};
/// assert_eq!(default_crop_rect((8, 8)), CropRect::new(2, 2, 4, 4));
/// assert_eq!(default_crop_rect((9, 5)), CropRect::new(2, 1, 4, 2));
/// ```
pub fn default_crop_rect(dims: (u32, u32)) -> CropRect {
    let (w, h) = dims;
    CropRect::new(w / 4, h / 4, w / 2, h / 2)
}

/// Fit a crop rectangle inside an image of the given dimensions.
///
/// Width and height are shrunk when `x + width` or `y + height` overflow the
/// image. An origin past the last column/row is pulled back onto it, and a zero
/// extent is raised to 1, so the result always selects at least one pixel of
/// a non-empty image.
///
/// # Examples
/// ```
/// # use vox_edit::imaging::{CropRect, clamp_crop_rect};
/// // Overflowing width shrinks to fit
/// assert_eq!(clamp_crop_rect(CropRect::new(6, 0, 10, 4), (8, 8)), CropRect::new(6, 0, 2, 4));
/// ```
pub fn clamp_crop_rect(rect: CropRect, dims: (u32, u32)) -> CropRect {
    let (w, h) = dims;
    let (x, width) = clamp_span(rect.x, rect.width, w);
    let (y, height) = clamp_span(rect.y, rect.height, h);
    CropRect::new(x, y, width, height)
}

/// Clamp a 1-D `(start, len)` span to `[0, limit)`.
fn clamp_span(start: u32, len: u32, limit: u32) -> (u32, u32) {
    if limit == 0 {
        return (0, 0);
    }
    let start = start.min(limit - 1);
    let len = len.clamp(1, limit - start);
    (start, len)
}

/// Composite `color` at `alpha` (0–255) over a channel value, rounding to nearest.
///
/// `out = (src * (255 - alpha) + color * alpha) / 255`
pub fn blend_channel(src: u8, color: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let mixed = u32::from(src) * (255 - a) + u32::from(color) * a;
    ((mixed + 127) / 255) as u8
}
