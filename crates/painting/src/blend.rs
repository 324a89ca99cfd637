//! Per-pixel compositing with blend modes
//!
//! Colors are straight-alpha RGBA8. Separable modes follow the usual
//! compositing model: the blend function is mixed in proportionally to the
//! backdrop alpha, then the result is placed over the backdrop.

use crate::color::unit_to_u8;
use crate::types::{BlendMode, Rgba8};

/// Composite `top` over `base` with the given blend mode and opacity
pub fn blend_rgba(base: Rgba8, top: Rgba8, mode: BlendMode, opacity: f32) -> Rgba8 {
    // Fully transparent top pixel or no opacity (NaN included): nothing to blend
    if top[3] == 0 || !(opacity > 0.0) {
        return base;
    }

    // Normal, full opacity, opaque top: plain overwrite
    if mode == BlendMode::Normal && opacity >= 1.0 && top[3] == 255 {
        return top;
    }

    let opacity = opacity.clamp(0.0, 1.0);
    let base_a = base[3] as f32 / 255.0;
    let top_a = (top[3] as f32 / 255.0) * opacity;

    if mode == BlendMode::Erase {
        let remaining = base_a * (1.0 - top_a);
        if remaining <= 0.0 {
            return [0, 0, 0, 0];
        }
        return [base[0], base[1], base[2], unit_to_u8(remaining)];
    }

    let out_a = top_a + base_a * (1.0 - top_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let cb = base[c] as f32 / 255.0;
        let cs = top[c] as f32 / 255.0;
        let mixed = (1.0 - base_a) * cs + base_a * blend_channel(mode, cb, cs);
        let value = (mixed * top_a + cb * base_a * (1.0 - top_a)) / out_a;
        out[c] = unit_to_u8(value);
    }
    out[3] = unit_to_u8(out_a);
    out
}

/// Separable blend function B(backdrop, source) for one channel in 0..1
#[inline]
pub fn blend_channel(mode: BlendMode, base: f32, top: f32) -> f32 {
    match mode {
        BlendMode::Normal | BlendMode::Erase => top,
        BlendMode::Multiply => base * top,
        BlendMode::Screen => 1.0 - (1.0 - base) * (1.0 - top),
        BlendMode::Overlay => {
            if base < 0.5 {
                2.0 * base * top
            } else {
                1.0 - 2.0 * (1.0 - base) * (1.0 - top)
            }
        }
        BlendMode::Darken => base.min(top),
        BlendMode::Lighten => base.max(top),
        BlendMode::Difference => (base - top).abs(),
    }
}
