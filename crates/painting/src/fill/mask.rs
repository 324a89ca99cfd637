//! Region masks: pixels reachable from a seed under the tolerance rule

use tracing::debug;

use crate::color::within_tolerance;
use crate::error::PaintError;
use crate::surface::CpuSurface;
use crate::types::{PixelRect, Rgba8};

/// Boolean reachability raster produced by one fill call
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
    /// Color of the seed pixel every member was compared against
    target: Rgba8,
    seed: (u32, u32),
    count: usize,
    bounds: PixelRect,
}

impl RegionMask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The matched target color
    pub fn target(&self) -> Rgba8 {
        self.target
    }

    /// Seed pixel coordinates
    pub fn seed(&self) -> (u32, u32) {
        self.seed
    }

    /// Whether a pixel belongs to the region; false outside the surface
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Number of pixels in the region
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bounding box of the region
    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Row-major membership flags
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate member pixel coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, inside)| **inside)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

/// Resolve a floating-point seed to a pixel, or `OutOfBounds`
pub(crate) fn seed_pixel(surface: &CpuSurface, x: f32, y: f32) -> Result<(u32, u32), PaintError> {
    let fx = x.floor();
    let fy = y.floor();
    if !fx.is_finite() || !fy.is_finite() || !surface.contains(fx as i64, fy as i64) {
        return Err(PaintError::OutOfBounds { x, y });
    }
    Ok((fx as u32, fy as u32))
}

/// Compute the region reachable from `(x, y)`.
///
/// Explicit-stack 4-connected traversal: a popped pixel is skipped if already
/// visited or if it does not match the seed color within `tolerance`;
/// otherwise it joins the region and its unvisited neighbours are pushed.
/// Flood fill paints exactly the pixels this returns.
pub fn compute_region_mask(
    surface: &CpuSurface,
    x: f32,
    y: f32,
    tolerance: f32,
) -> Result<RegionMask, PaintError> {
    let (seed_x, seed_y) = seed_pixel(surface, x, y)?;
    let width = surface.width as usize;
    let height = surface.height as usize;
    let pixels = surface.pixels();
    let seed_index = surface.index_of(seed_x, seed_y);
    let target = pixels[seed_index];

    let mut visited = vec![false; width * height];
    let mut bits = vec![false; width * height];
    let mut count = 0usize;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed_x, seed_y, seed_x, seed_y);

    let mut stack: Vec<usize> = Vec::with_capacity(4096);
    stack.push(seed_index);

    while let Some(index) = stack.pop() {
        if visited[index] {
            continue;
        }
        visited[index] = true;
        if !within_tolerance(pixels[index], target, tolerance) {
            continue;
        }

        bits[index] = true;
        count += 1;

        let px = index % width;
        let py = index / width;
        min_x = min_x.min(px as u32);
        max_x = max_x.max(px as u32);
        min_y = min_y.min(py as u32);
        max_y = max_y.max(py as u32);

        // Left, right, up, down
        if px > 0 && !visited[index - 1] {
            stack.push(index - 1);
        }
        if px + 1 < width && !visited[index + 1] {
            stack.push(index + 1);
        }
        if py > 0 && !visited[index - width] {
            stack.push(index - width);
        }
        if py + 1 < height && !visited[index + width] {
            stack.push(index + width);
        }
    }

    let bounds = PixelRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1);
    debug!(
        "compute_region_mask: seed=({}, {}), tolerance={:.1}, {} pixels in {:?}",
        seed_x, seed_y, tolerance, count, bounds
    );

    Ok(RegionMask {
        width: surface.width,
        height: surface.height,
        bits,
        target,
        seed: (seed_x, seed_y),
        count,
        bounds,
    })
}
