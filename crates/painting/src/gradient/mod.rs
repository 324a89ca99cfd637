//! Gradient rasterization
//!
//! - [`GradientStops`] - sorted piecewise-linear color ramp
//! - [`distance_gradient_fill`] - whole-surface gradient by distance from a point
//! - [`radial_bucket_fill`] - radial gradient constrained to a flood-fill region

mod distance;
mod radial;

pub use distance::distance_gradient_fill;
pub use radial::radial_bucket_fill;

use serde::{Deserialize, Serialize};

use crate::color::lerp_rgb;
use crate::constants::STOP_EPSILON;
use crate::error::PaintError;
use crate::types::Rgb8;

/// One anchor of a color ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position in 0.0..=1.0
    pub t: f32,
    pub color: Rgb8,
}

impl GradientStop {
    pub fn new(t: f32, color: Rgb8) -> Self {
        Self { t, color }
    }
}

/// Stops normalized into ascending order with positions clamped to [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStops {
    stops: Vec<GradientStop>,
}

impl GradientStops {
    /// Normalize a stop list. Fails if it is empty.
    ///
    /// Non-finite positions are treated as 0. Sorting is stable, so stops that
    /// share a position keep their input order (a hard color step).
    pub fn new(stops: &[GradientStop]) -> Result<Self, PaintError> {
        if stops.is_empty() {
            return Err(PaintError::EmptyGradient);
        }
        let mut stops: Vec<GradientStop> = stops
            .iter()
            .map(|s| {
                let t = if s.t.is_finite() { s.t.clamp(0.0, 1.0) } else { 0.0 };
                GradientStop::new(t, s.color)
            })
            .collect();
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Ok(Self { stops })
    }

    pub fn as_slice(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn first(&self) -> GradientStop {
        self.stops[0]
    }

    pub fn last(&self) -> GradientStop {
        self.stops[self.stops.len() - 1]
    }

    /// Color at position `t`, flat beyond the first and last stop
    pub fn sample(&self, t: f32) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let first = self.first();
        let last = self.last();
        if t <= first.t {
            return first.color;
        }
        if t >= last.t {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (s0, s1) = (pair[0], pair[1]);
            if t >= s0.t && t <= s1.t {
                let span = (s1.t - s0.t).max(STOP_EPSILON);
                let local = ((t - s0.t) / span).clamp(0.0, 1.0);
                return lerp_rgb(s0.color, s1.color, local);
            }
        }
        last.color
    }
}
