//! Stroke lifecycle and sample generation
//!
//! The stroke engine turns pointer input into the list of samples to
//! rasterize. It drops samples that are too close to the previous point and
//! synthesizes evenly spaced samples across large jumps so fast motion does not
//! leave gaps. Rasterization itself happens in the pipeline.

use glam::Vec2;
use gesso_config::StrokeConfig;
use tracing::debug;

use crate::brush::BrushSettings;
use crate::error::PaintError;
use crate::types::LayerId;

/// One position to rasterize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub position: Vec2,
    pub pressure: f32,
    /// Previously rasterized point of the same stroke (None for the first sample)
    pub previous: Option<Vec2>,
}

/// An active stroke
#[derive(Debug, Clone)]
pub struct Stroke {
    /// Every rasterized sample position, synthesized ones included
    points: Vec<Vec2>,
    /// Pressure per point
    pressures: Vec<f32>,
    /// Brush snapshot taken at begin
    brush: BrushSettings,
    /// Layer the stroke paints on
    layer: LayerId,
}

impl Stroke {
    fn new(brush: BrushSettings, layer: LayerId) -> Self {
        Self {
            points: Vec::new(),
            pressures: Vec::new(),
            brush,
            layer,
        }
    }

    fn push(&mut self, position: Vec2, pressure: f32) -> StrokeSample {
        let previous = self.points.last().copied();
        self.points.push(position);
        self.pressures.push(pressure);
        StrokeSample {
            position,
            pressure,
            previous,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn pressures(&self) -> &[f32] {
        &self.pressures
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Number of rasterized samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.points.last().copied()
    }
}

/// Reject pointer input that is NaN or infinite
pub fn check_input(x: f32, y: f32, pressure: f32) -> Result<(), PaintError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(PaintError::NonFinite {
            what: "stroke position",
        });
    }
    if !pressure.is_finite() {
        return Err(PaintError::NonFinite { what: "pressure" });
    }
    Ok(())
}

/// Result of `StrokeEngine::begin`
#[derive(Debug)]
pub struct BeginOutcome {
    /// Stroke that was still active and got implicitly ended
    pub flushed: Option<Stroke>,
    /// The first sample of the new stroke
    pub sample: StrokeSample,
}

/// Owns the single active-stroke slot
#[derive(Debug, Default)]
pub struct StrokeEngine {
    config: StrokeConfig,
    active: Option<Stroke>,
}

impl StrokeEngine {
    pub fn new(config: StrokeConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Start a new stroke, ending any stroke that is still open
    pub fn begin(
        &mut self,
        brush: BrushSettings,
        layer: LayerId,
        x: f32,
        y: f32,
        pressure: f32,
    ) -> BeginOutcome {
        let flushed = self.active.take();
        if let Some(ref stroke) = flushed {
            debug!(
                "StrokeEngine::begin: flushing open stroke with {} samples",
                stroke.len()
            );
        }

        let mut stroke = Stroke::new(brush, layer);
        let sample = stroke.push(Vec2::new(x, y), pressure.clamp(0.0, 1.0));
        self.active = Some(stroke);

        BeginOutcome { flushed, sample }
    }

    /// Continue the active stroke.
    ///
    /// Returns the samples to rasterize, which may be empty when the point is
    /// within the minimum sample distance of the previous one. Synthesized
    /// samples use the pressure of the incoming point.
    pub fn extend(&mut self, x: f32, y: f32, pressure: f32) -> Result<Vec<StrokeSample>, PaintError> {
        let config = self.config;
        let stroke = self.active.as_mut().ok_or(PaintError::NoActiveStroke)?;
        check_input(x, y, pressure)?;
        let pressure = pressure.clamp(0.0, 1.0);
        let target = Vec2::new(x, y);

        let Some(last) = stroke.last_point() else {
            return Ok(vec![stroke.push(target, pressure)]);
        };

        let distance = last.distance(target);
        if distance < config.min_sample_distance {
            return Ok(Vec::new());
        }

        let mut samples = Vec::new();
        if distance > config.gap_threshold && config.interpolation_step > 0.0 {
            // Small bias keeps exact multiples from duplicating the terminal point
            let steps = ((distance / config.interpolation_step) - 1e-4).ceil().max(1.0) as usize;
            for i in 1..steps {
                let t = (i as f32 * config.interpolation_step) / distance;
                samples.push(stroke.push(last.lerp(target, t), pressure));
            }
        }
        samples.push(stroke.push(target, pressure));

        if samples.len() > 1 {
            debug!(
                "StrokeEngine::extend: {} samples across gap from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                samples.len(),
                last.x,
                last.y,
                x,
                y
            );
        }
        Ok(samples)
    }

    /// End the active stroke, returning it. Idempotent.
    pub fn end(&mut self) -> Option<Stroke> {
        self.active.take()
    }

    /// Stop accepting samples for the active stroke.
    ///
    /// Nothing is rolled back; the caller decides not to commit the result.
    pub fn cancel(&mut self) -> Option<Stroke> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.active.is_some()
    }
}
