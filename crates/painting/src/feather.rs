//! Alpha feathering for mask placement
//!
//! [`blur_alpha`] softens the edge of an alpha-coverage mask with a separable
//! box blur that only touches the alpha channel. [`place_alpha_mask`] uses it
//! to drop a filled shape mask onto a layer: feather, tint, composite.

use tracing::debug;

use crate::color::with_alpha;
use crate::surface::CpuSurface;
use crate::types::{BlendMode, PixelRect, Rgb8};

#[inline]
fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Sum of `value(clamp(i))` over `i` in `-radius..=radius`.
///
/// Samples past either end repeat the edge value, so the cost is bounded by
/// `len` rather than `radius`.
fn clamped_window_start(len: usize, radius: u64, value: impl Fn(usize) -> u128) -> u128 {
    let last = len - 1;
    let mut sum = (radius as u128 + 1) * value(0);
    for i in 1..=(radius.min(last as u64) as usize) {
        sum += value(i);
    }
    if radius > last as u64 {
        sum += (radius - last as u64) as u128 * value(last);
    }
    sum
}

/// Box-blur the alpha channel in place with a `(2·radius+1)²` window.
///
/// Both passes use running sums with edge samples clamped to the nearest
/// valid row/column. The horizontal pass keeps raw sums; the vertical pass
/// divides once by the full window area. RGB is left untouched.
pub fn blur_alpha(surface: &mut CpuSurface, radius: u32) {
    let width = surface.width as usize;
    let height = surface.height as usize;
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let r = radius as i64;
    let window = 2 * radius as u128 + 1;
    let area = window * window;

    // Horizontal pass: per-pixel window sums, at most 255·(2r+1)
    let mut horizontal = vec![0u64; width * height];
    {
        let pixels = surface.pixels();
        for y in 0..height {
            let row = y * width;
            let alpha = |x: i64| pixels[row + clamp_index(x, width)][3] as u64;
            let mut sum = clamped_window_start(width, radius as u64, |x| pixels[row + x][3] as u128) as u64;
            for x in 0..width {
                horizontal[row + x] = sum;
                let xi = x as i64;
                sum = sum + alpha(xi + r + 1) - alpha(xi - r);
            }
        }
    }

    // Vertical pass over the horizontal sums
    let pixels = surface.pixels_mut();
    for x in 0..width {
        let column = |y: i64| horizontal[clamp_index(y, height) * width + x] as u128;
        let mut sum = clamped_window_start(height, radius as u64, |y| horizontal[y * width + x] as u128);
        for y in 0..height {
            pixels[y * width + x][3] = ((sum + area / 2) / area) as u8;
            let yi = y as i64;
            sum = sum + column(yi + r + 1) - column(yi - r);
        }
    }

    debug!("blur_alpha: {}x{} radius={}", width, height, radius);
}

/// Feather an alpha-coverage mask, tint it and composite it onto `target`
/// with its top-left corner at `(x, y)`.
///
/// Only the mask's alpha is used. The mask is copied, so the caller's buffer
/// is left as is. Returns the affected region of `target`.
#[allow(clippy::too_many_arguments)]
pub fn place_alpha_mask(
    target: &mut CpuSurface,
    mask: &CpuSurface,
    x: i64,
    y: i64,
    color: Rgb8,
    opacity: f32,
    blend_mode: BlendMode,
    feather_radius: u32,
) -> Option<PixelRect> {
    if !(opacity > 0.0) {
        return None;
    }
    let mut shape = mask.clone();
    blur_alpha(&mut shape, feather_radius);

    let mut bounds: Option<PixelRect> = None;
    for sy in 0..shape.height {
        let ty = y + sy as i64;
        if ty < 0 || ty >= target.height as i64 {
            continue;
        }
        for sx in 0..shape.width {
            let tx = x + sx as i64;
            if tx < 0 || tx >= target.width as i64 {
                continue;
            }
            let coverage = shape.pixels()[shape.index_of(sx, sy)][3];
            if coverage == 0 {
                continue;
            }
            target.composite_pixel(
                tx as u32,
                ty as u32,
                with_alpha(color, coverage),
                blend_mode,
                opacity,
            );
            bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(tx as u32, ty as u32)));
        }
    }
    bounds
}
