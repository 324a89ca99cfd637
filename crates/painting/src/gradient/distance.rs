//! Unconstrained gradient by distance from an origin

use glam::Vec2;
use tracing::debug;

use super::GradientStops;
use crate::color::with_alpha;
use crate::surface::CpuSurface;
use crate::types::PixelRect;

/// Paint every pixel with the stop color for its distance from `origin`.
///
/// Distances are normalized by the farthest corner pixel, so the corner
/// opposite the origin receives the last stop exactly. Pixels are written
/// opaque. Returns None for an empty surface.
pub fn distance_gradient_fill(
    surface: &mut CpuSurface,
    origin: Vec2,
    stops: &GradientStops,
) -> Option<PixelRect> {
    if surface.width == 0 || surface.height == 0 {
        return None;
    }

    let right = (surface.width - 1) as f32;
    let bottom = (surface.height - 1) as f32;
    let max_distance = [
        Vec2::new(0.0, 0.0),
        Vec2::new(right, 0.0),
        Vec2::new(0.0, bottom),
        Vec2::new(right, bottom),
    ]
    .iter()
    .map(|corner| corner.distance(origin))
    .fold(0.0f32, f32::max);

    debug!(
        "distance_gradient_fill: origin=({:.1}, {:.1}), max_distance={:.2}, {} stops",
        origin.x,
        origin.y,
        max_distance,
        stops.as_slice().len()
    );

    let width = surface.width;
    let pixels = surface.pixels_mut();
    for (index, pixel) in pixels.iter_mut().enumerate() {
        let p = Vec2::new((index as u32 % width) as f32, (index as u32 / width) as f32);
        let t = if max_distance > 0.0 {
            (p.distance(origin) / max_distance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        *pixel = with_alpha(stops.sample(t), 255);
    }

    Some(surface.bounds())
}
