//! Tolerance flood fill

use tracing::debug;

use super::mask::{compute_region_mask, seed_pixel};
use super::FillOutcome;
use crate::color::{with_alpha, within_tolerance};
use crate::error::PaintError;
use crate::surface::CpuSurface;
use crate::types::Rgb8;

/// Fill the region connected to `(x, y)` with an opaque color.
///
/// If the seed already matches the fill color within `tolerance` nothing is
/// painted and `Unchanged` is returned.
pub fn flood_fill(
    surface: &mut CpuSurface,
    x: f32,
    y: f32,
    color: Rgb8,
    tolerance: f32,
) -> Result<FillOutcome, PaintError> {
    let (seed_x, seed_y) = seed_pixel(surface, x, y)?;
    let fill = with_alpha(color, 255);
    let target = surface.pixels()[surface.index_of(seed_x, seed_y)];

    if within_tolerance(target, fill, tolerance) {
        debug!(
            "flood_fill: seed ({}, {}) already matches {:?}, nothing to do",
            seed_x, seed_y, fill
        );
        return Ok(FillOutcome::Unchanged);
    }

    // Painted pixels are never revisited, so the reachable set computed on the
    // unpainted surface is exactly the set this fill mutates.
    let mask = compute_region_mask(surface, x, y, tolerance)?;
    let pixels = surface.pixels_mut();
    for (index, inside) in mask.as_slice().iter().enumerate() {
        if *inside {
            pixels[index] = fill;
        }
    }

    Ok(FillOutcome::Filled {
        pixels: mask.len(),
        bounds: mask.bounds(),
    })
}
