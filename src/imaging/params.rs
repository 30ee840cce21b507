//! Parameter types for pixel transforms.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the command interpreter (which decides which edit to run) and
//! [`transforms`](super::transforms) (which does the pixel work). Range
//! checking happens here, once, on construction: every transform receives
//! values that are already inside their declared bounds.
//!
//! ## Types
//!
//! - [`Brightness`]: Additive channel offset, clamped to −255..=255.
//! - [`Contrast`]: Contrast delta, clamped to −100..=100.
//! - [`CropRect`]: Integer rectangle used by crop sessions, previews and the final crop.
//! - [`Shade`]: Translucent wash painted outside the crop rectangle in previews.

use image::Rgb;

/// Brightness offset added to every channel (−255 to 255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness(i32);

impl Brightness {
    pub const MIN: i32 = -255;
    pub const MAX: i32 = 255;

    pub fn new(delta: i32) -> Self {
        Self(delta.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

/// Contrast delta (−100 to 100). `0` leaves the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast(f64);

impl Contrast {
    pub const MIN: f64 = -100.0;
    pub const MAX: f64 = 100.0;

    /// NaN collapses to the neutral value.
    pub fn new(delta: f64) -> Self {
        if delta.is_nan() {
            return Self(0.0);
        }
        Self(delta.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Multiplier applied around mid-grey: `((100 + delta) / 100)²`.
    pub fn factor(self) -> f64 {
        let f = (100.0 + self.0) / 100.0;
        f * f
    }
}

/// Integer rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `(px, py)` lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, px: u32, py: u32) -> bool {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        px >= self.x && py >= self.y && u64::from(px) < right && u64::from(py) < bottom
    }
}

/// Wash composited over the area outside the crop rectangle in previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shade {
    pub color: Rgb<u8>,
    /// Opacity, 0 (invisible) to 255 (solid).
    pub alpha: u8,
}

impl Default for Shade {
    /// Semi-opaque white (alpha 150).
    fn default() -> Self {
        Self {
            color: Rgb([255, 255, 255]),
            alpha: 150,
        }
    }
}
