//! Dab rasterization: stamp compositing and hard-edged pencil primitives
//!
//! Integer coordinates address pixel centers, so a one-pixel pencil at
//! `(5.0, 5.0)` lands exactly on pixel (5, 5). Every primitive writes each
//! covered pixel once, clips to the surface, and returns the bounding box of
//! the pixels it touched (None if nothing was inside the surface).

use glam::Vec2;
use tracing::debug;

use crate::color::with_alpha;
use crate::stamp::Stamp;
use crate::surface::CpuSurface;
use crate::types::{PixelRect, Rgb8};

/// Integer pixel span `[x0, x1) × [y0, y1)` covering a float box, clipped to the surface
fn clip_span(surface: &CpuSurface, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let x0 = min.x.floor().max(0.0);
    let y0 = min.y.floor().max(0.0);
    let x1 = (max.x.ceil() + 1.0).min(surface.width as f32);
    let y1 = (max.y.ceil() + 1.0).min(surface.height as f32);
    if !(x0 < x1 && y0 < y1) {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Composite a stamp centered at `center`, tinted with `color`.
///
/// Stamp alpha is coverage; `opacity` plays the role of a global alpha.
pub fn composite_stamp(
    surface: &mut CpuSurface,
    stamp: &Stamp,
    center: Vec2,
    color: Rgb8,
    opacity: f32,
) -> Option<PixelRect> {
    if !(opacity > 0.0) || !center.is_finite() {
        return None;
    }
    let size = stamp.size() as i64;
    let origin_x = (center.x - stamp.size() as f32 / 2.0 + 0.5).round() as i64;
    let origin_y = (center.y - stamp.size() as f32 / 2.0 + 0.5).round() as i64;
    let tint = with_alpha(color, 255);

    let mut bounds: Option<PixelRect> = None;
    for sy in 0..size {
        let py = origin_y + sy;
        if py < 0 || py >= surface.height as i64 {
            continue;
        }
        for sx in 0..size {
            let px = origin_x + sx;
            if px < 0 || px >= surface.width as i64 {
                continue;
            }
            let coverage = stamp.alpha_at(sx as u32, sy as u32);
            if coverage <= 0.0 {
                continue;
            }
            surface.blend_pixel(px as u32, py as u32, tint, coverage * opacity);
            bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(px as u32, py as u32)));
        }
    }

    debug!(
        "composite_stamp: center=({:.1}, {:.1}), size={}, opacity={:.2} -> {:?}",
        center.x,
        center.y,
        stamp.size(),
        opacity,
        bounds
    );
    bounds
}

/// Hard-edged filled circle of the given diameter
pub fn fill_circle(
    surface: &mut CpuSurface,
    center: Vec2,
    diameter: f32,
    color: Rgb8,
    opacity: f32,
) -> Option<PixelRect> {
    if !(diameter > 0.0) || !(opacity > 0.0) {
        return None;
    }
    let radius = diameter / 2.0;
    let (x0, y0, x1, y1) = clip_span(surface, center - radius, center + radius)?;
    let radius_sq = radius * radius;
    let tint = with_alpha(color, 255);

    let mut bounds = None;
    for py in y0..y1 {
        for px in x0..x1 {
            let offset = Vec2::new(px as f32, py as f32) - center;
            if offset.length_squared() > radius_sq {
                continue;
            }
            surface.blend_pixel(px, py, tint, opacity);
            bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(px, py)));
        }
    }
    bounds
}

/// Hard-edged axis-aligned square of the given side
pub fn fill_square(
    surface: &mut CpuSurface,
    center: Vec2,
    side: f32,
    color: Rgb8,
    opacity: f32,
) -> Option<PixelRect> {
    if !(side > 0.0) || !(opacity > 0.0) {
        return None;
    }
    let half = side / 2.0;
    let (x0, y0, x1, y1) = clip_span(surface, center - half, center + half)?;
    let tint = with_alpha(color, 255);

    let mut bounds = None;
    for py in y0..y1 {
        let dy = py as f32 - center.y;
        if dy < -half || dy >= half {
            continue;
        }
        for px in x0..x1 {
            let dx = px as f32 - center.x;
            if dx < -half || dx >= half {
                continue;
            }
            surface.blend_pixel(px, py, tint, opacity);
            bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(px, py)));
        }
    }
    bounds
}

/// Line segment with round caps (a capsule) of the given width
pub fn stroke_segment(
    surface: &mut CpuSurface,
    from: Vec2,
    to: Vec2,
    width: f32,
    color: Rgb8,
    opacity: f32,
) -> Option<PixelRect> {
    if !(width > 0.0) || !(opacity > 0.0) || !from.is_finite() || !to.is_finite() {
        return None;
    }
    let radius = (width / 2.0).max(0.5);
    let (x0, y0, x1, y1) = clip_span(surface, from.min(to) - radius, from.max(to) + radius)?;
    let radius_sq = radius * radius;
    let tint = with_alpha(color, 255);

    let mut bounds = None;
    for py in y0..y1 {
        for px in x0..x1 {
            let p = Vec2::new(px as f32, py as f32);
            if distance_sq_to_segment(p, from, to) > radius_sq {
                continue;
            }
            surface.blend_pixel(px, py, tint, opacity);
            bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(px, py)));
        }
    }
    bounds
}

/// Squared distance from `p` to the segment `a`-`b`
#[inline]
pub fn distance_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}
