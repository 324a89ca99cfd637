//! Brush settings and pressure dynamics
//!
//! A [`BrushSettings`] value is the host's brush configuration. The stroke
//! engine clones it when a stroke begins, so later edits only affect the next
//! stroke.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BRUSH_SIZE, MAX_HARDNESS, MIN_BRUSH_SIZE, ROTATION_KEY_SCALE};
use crate::error::PaintError;
use crate::types::{BrushKind, BrushShape, Rgb8};

/// Brush configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Soft stamp brush or hard pencil
    pub kind: BrushKind,
    /// Tip shape
    pub shape: BrushShape,
    /// Base diameter in pixels (at pressure 1)
    pub size: f32,
    /// Hardness: 0 = fully soft, 100 = hard edge
    pub hardness: u8,
    /// Base opacity 0.0-1.0
    pub opacity: f32,
    /// Per-dab flow 0.0-1.0
    pub flow: f32,
    /// Tip rotation in degrees (square tips only)
    pub rotation: f32,
    /// Paint color
    pub color: Rgb8,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::Brush,
            shape: BrushShape::Circle,
            size: 20.0,
            hardness: 80,
            opacity: 1.0,
            flow: 1.0,
            rotation: 0.0,
            color: [0, 0, 0],
        }
    }
}

/// The subset of settings that changes stamp geometry.
///
/// The stamp cache is flushed whenever this differs from the previous stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSignature {
    pub shape: BrushShape,
    /// `size.to_bits()` so the signature stays `Eq`
    pub size_bits: u32,
    pub hardness: u8,
    /// Rotation in hundredths of a degree
    pub rotation: i32,
}

impl BrushSettings {
    /// Create brush settings, clamping every value into its valid range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: BrushKind,
        shape: BrushShape,
        size: f32,
        hardness: u8,
        opacity: f32,
        flow: f32,
        rotation: f32,
        color: Rgb8,
    ) -> Self {
        Self {
            kind,
            shape,
            size: size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            hardness: hardness.min(MAX_HARDNESS),
            opacity: opacity.clamp(0.0, 1.0),
            flow: flow.clamp(0.0, 1.0),
            rotation,
            color,
        }
    }

    /// Validate a snapshot received from the host and clamp it into range
    pub fn validated(&self) -> Result<Self, PaintError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(PaintError::InvalidSettings(format!(
                "size must be a positive number, got {}",
                self.size
            )));
        }
        if !self.opacity.is_finite() || !self.flow.is_finite() || !self.rotation.is_finite() {
            return Err(PaintError::InvalidSettings(
                "opacity, flow and rotation must be finite".to_string(),
            ));
        }
        Ok(Self::new(
            self.kind,
            self.shape,
            self.size,
            self.hardness,
            self.opacity,
            self.flow,
            self.rotation,
            self.color,
        ))
    }

    /// Diameter for a sample at the given pressure
    #[inline]
    pub fn effective_size(&self, pressure: f32) -> f32 {
        self.size * pressure.clamp(0.0, 1.0)
    }

    /// Opacity for a sample at the given pressure
    #[inline]
    pub fn effective_opacity(&self, pressure: f32) -> f32 {
        self.opacity * self.flow * pressure.clamp(0.0, 1.0)
    }

    /// Rotation quantized for cache keys. Circles are rotationally symmetric.
    #[inline]
    pub fn rotation_key(&self) -> i32 {
        match self.shape {
            BrushShape::Circle => 0,
            BrushShape::Square => {
                (self.rotation.rem_euclid(360.0) * ROTATION_KEY_SCALE).round() as i32
            }
        }
    }

    /// Signature of the shape-affecting settings
    pub fn shape_signature(&self) -> ShapeSignature {
        ShapeSignature {
            shape: self.shape,
            size_bits: self.size.to_bits(),
            hardness: self.hardness,
            rotation: self.rotation_key(),
        }
    }
}
