//! Pixel transforms: every edit the interpreter can apply.
//!
//! Each function borrows a source buffer and returns a freshly allocated one;
//! the source is never modified, so snapshots already in the history stay
//! intact. Out-of-range parameters are clamped by the [`params`](super::params)
//! types before they get here, and crop rectangles are fitted to the image, so
//! nothing in this module can fail.
//!
//! | Operation | Per-channel rule / implementation |
//! |---|---|
//! | [`brightness`] | `c + delta`, negatives become 1, capped at 255 |
//! | [`contrast`] | `clamp(((c/255 − 0.5) · factor + 0.5) · 255, 0, 255)` |
//! | [`grayscale`] | `0.299R + 0.587G + 0.114B`, truncated |
//! | [`invert`] | `255 − c` |
//! | [`color_filter`] | `clamp(c − (255 − k), 0, 255)` |
//! | [`flip`] | `imageops::flip_horizontal` |
//! | [`rotate`] | `imageops::rotate90` (clockwise) |
//! | [`crop`] | `imageops::crop_imm` on the fitted rectangle |
//! | [`crop_overlay`] | translucent wash outside the rectangle |
//!
//! Per-pixel operations split the output into rows and fill them in parallel
//! with rayon. Each row is written by exactly one worker from the matching
//! source row, so the output is identical to a sequential pass.

use super::calculations::{blend_channel, clamp_crop_rect};
use super::params::{Brightness, Contrast, CropRect, Shade};
use image::{Rgb, RgbImage, imageops};
use rayon::prelude::*;

/// Build a new image by mapping every pixel of `src` through `f`.
///
/// `f` receives `(x, y, [r, g, b])` and returns the output pixel.
fn map_pixels<F>(src: &RgbImage, f: F) -> RgbImage
where
    F: Fn(u32, u32, [u8; 3]) -> [u8; 3] + Sync,
{
    let (width, height) = src.dimensions();
    let mut out = RgbImage::new(width, height);
    let stride = width as usize * 3;
    if stride == 0 || height == 0 {
        return out;
    }

    let src_raw = src.as_raw();
    out.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src_raw[y * stride..(y + 1) * stride];
            for (x, (px_out, px_in)) in row_out
                .chunks_exact_mut(3)
                .zip(row_in.chunks_exact(3))
                .enumerate()
            {
                let mapped = f(x as u32, y as u32, [px_in[0], px_in[1], px_in[2]]);
                px_out.copy_from_slice(&mapped);
            }
        });
    out
}

/// Apply the same channel function to R, G and B independently.
fn map_channels<F>(src: &RgbImage, f: F) -> RgbImage
where
    F: Fn(u8) -> u8 + Sync,
{
    map_pixels(src, |_, _, [r, g, b]| [f(r), f(g), f(b)])
}

/// Add a constant to every channel.
///
/// Negative sums floor at **1**, not 0. An exact sum of 0 stays 0. Results
/// above 255 saturate.
pub fn brightness(src: &RgbImage, delta: Brightness) -> RgbImage {
    let d = delta.value();
    map_channels(src, |c| match i32::from(c) + d {
        v if v < 0 => 1,
        v => v.min(255) as u8,
    })
}

/// Stretch (positive delta) or flatten (negative delta) channels around mid-grey.
pub fn contrast(src: &RgbImage, delta: Contrast) -> RgbImage {
    let factor = delta.factor();
    map_channels(src, |c| {
        let p = ((f64::from(c) / 255.0 - 0.5) * factor + 0.5) * 255.0;
        p.clamp(0.0, 255.0) as u8
    })
}

/// Replace every pixel with its BT.601 luma.
pub fn grayscale(src: &RgbImage) -> RgbImage {
    map_pixels(src, |_, _, [r, g, b]| {
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        let gray = luma as u8;
        [gray, gray, gray]
    })
}

/// Photographic negative.
pub fn invert(src: &RgbImage) -> RgbImage {
    map_channels(src, |c| 255 - c)
}

/// Subtractive tint toward `color`.
///
/// Each channel loses `255 − k` where `k` is the matching channel of the tint,
/// so a white filter is a no-op and a black filter produces black.
pub fn color_filter(src: &RgbImage, color: Rgb<u8>) -> RgbImage {
    let [kr, kg, kb] = color.0;
    let tint = |c: u8, k: u8| (i32::from(c) - (255 - i32::from(k))).clamp(0, 255) as u8;
    map_pixels(src, |_, _, [r, g, b]| [tint(r, kr), tint(g, kg), tint(b, kb)])
}

/// Mirror left to right.
pub fn flip(src: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(src)
}

/// Rotate a quarter turn clockwise. Output dimensions are swapped.
pub fn rotate(src: &RgbImage) -> RgbImage {
    imageops::rotate90(src)
}

/// Cut out `rect`, after fitting it inside `src`.
///
/// The output dimensions always equal the fitted rectangle and never exceed
/// the source dimensions.
pub fn crop(src: &RgbImage, rect: CropRect) -> RgbImage {
    let fitted = clamp_crop_rect(rect, src.dimensions());
    imageops::crop_imm(src, fitted.x, fitted.y, fitted.width, fitted.height).to_image()
}

/// Preview a crop selection: pixels outside `rect` are washed with `shade`.
///
/// The rectangle is fitted the same way as in [`crop`], so the clear area is
/// exactly what confirming the crop keeps. Pixels inside keep their exact
/// source values.
pub fn crop_overlay(src: &RgbImage, rect: CropRect, shade: Shade) -> RgbImage {
    let rect = clamp_crop_rect(rect, src.dimensions());
    let [sr, sg, sb] = shade.color.0;
    let alpha = shade.alpha;
    map_pixels(src, |x, y, px| {
        if rect.contains(x, y) {
            px
        } else {
            [
                blend_channel(px[0], sr, alpha),
                blend_channel(px[1], sg, alpha),
                blend_channel(px[2], sb, alpha),
            ]
        }
    })
}
