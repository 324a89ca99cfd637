//! Soft brush stamps and their cache
//!
//! A stamp is a square alpha raster holding one dab of the brush tip. Stamps
//! are keyed by `(shape, rounded size, hardness, rotation)` and reused for
//! every sample with the same key. The whole cache is dropped when any
//! shape-affecting brush setting changes.

use std::collections::HashMap;

use glam::Vec2;
use tracing::debug;

use crate::brush::{BrushSettings, ShapeSignature};
use crate::constants::{MAX_HARDNESS, ROTATION_KEY_SCALE};
use crate::types::BrushShape;

/// Cache key for a stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StampKey {
    pub shape: BrushShape,
    /// Diameter rounded to whole pixels
    pub size: u32,
    pub hardness: u8,
    /// Rotation in hundredths of a degree (always 0 for circles)
    pub rotation: i32,
}

impl StampKey {
    /// Key for a sample of the given effective diameter.
    /// Returns None when the diameter rounds to zero.
    pub fn for_sample(settings: &BrushSettings, effective_size: f32) -> Option<Self> {
        let size = effective_size.round();
        if !size.is_finite() || size < 1.0 {
            return None;
        }
        Some(Self {
            shape: settings.shape,
            size: size as u32,
            hardness: settings.hardness.min(MAX_HARDNESS),
            rotation: settings.rotation_key(),
        })
    }

    /// Rotation in radians
    pub fn rotation_radians(&self) -> f32 {
        (self.rotation as f32 / ROTATION_KEY_SCALE).to_radians()
    }
}

/// A size×size alpha raster for one brush dab
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    size: u32,
    /// Row-major coverage in 0.0..=1.0
    alpha: Vec<f32>,
}

impl Stamp {
    /// Rasterize a stamp for the given key
    pub fn build(key: &StampKey) -> Self {
        let size = key.size.max(1);
        let radius = size as f32 / 2.0;
        let center = Vec2::splat(radius);
        let hardness = key.hardness as f32 / MAX_HARDNESS as f32;
        let (sin, cos) = key.rotation_radians().sin_cos();

        let mut alpha = Vec::with_capacity((size * size) as usize);
        for py in 0..size {
            for px in 0..size {
                let offset = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                let inside = match key.shape {
                    BrushShape::Circle => offset.length() <= radius,
                    BrushShape::Square => {
                        // Rotate the sample point into the square's frame
                        let local = Vec2::new(
                            offset.x * cos + offset.y * sin,
                            -offset.x * sin + offset.y * cos,
                        );
                        local.x.abs() <= radius && local.y.abs() <= radius
                    }
                };
                let value = if !inside {
                    0.0
                } else if key.hardness >= MAX_HARDNESS {
                    1.0
                } else {
                    radial_falloff(offset.length() / radius, hardness)
                };
                alpha.push(value);
            }
        }

        Self { size, alpha }
    }

    /// Side length in pixels
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Coverage at a stamp-local pixel, 0.0 outside the raster
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> f32 {
        if x >= self.size || y >= self.size {
            return 0.0;
        }
        self.alpha[(y * self.size + x) as usize]
    }

    /// Row-major coverage values
    pub fn alpha(&self) -> &[f32] {
        &self.alpha
    }
}

/// Radial alpha ramp.
///
/// `distance_normalized` is 0 at the center and 1 at the outer radius; alpha
/// stays at 1.0 up to `hardness` and then falls linearly to 0.0 at the edge.
#[inline]
pub fn radial_falloff(distance_normalized: f32, hardness: f32) -> f32 {
    let t = distance_normalized.max(0.0);
    if t >= 1.0 {
        return 0.0;
    }
    let inner = hardness.clamp(0.0, 1.0);
    if t <= inner {
        1.0
    } else {
        1.0 - (t - inner) / (1.0 - inner)
    }
}

/// Memoized stamps with wholesale invalidation
#[derive(Debug, Default)]
pub struct StampCache {
    stamps: HashMap<StampKey, Stamp>,
    /// Shape settings the cached stamps were built under
    signature: Option<ShapeSignature>,
    hits: u64,
    misses: u64,
}

impl StampCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the brush about to be used, clearing the cache if any
    /// shape-affecting setting changed. Returns true if the cache was cleared.
    pub fn sync_settings(&mut self, settings: &BrushSettings) -> bool {
        let signature = settings.shape_signature();
        match self.signature {
            Some(previous) if previous == signature => false,
            Some(_) => {
                debug!(
                    "StampCache: shape settings changed, dropping {} stamps",
                    self.stamps.len()
                );
                self.stamps.clear();
                self.signature = Some(signature);
                true
            }
            None => {
                self.signature = Some(signature);
                false
            }
        }
    }

    /// Fetch a stamp, building it on first use
    pub fn get_or_create(&mut self, key: StampKey) -> &Stamp {
        if self.stamps.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            debug!("StampCache: building {:?}", key);
        }
        self.stamps.entry(key).or_insert_with(|| Stamp::build(&key))
    }

    /// Drop every cached stamp
    pub fn clear(&mut self) {
        self.stamps.clear();
        self.signature = None;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
