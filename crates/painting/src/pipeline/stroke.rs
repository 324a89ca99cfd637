//! Stroke handling for the painting pipeline

use tracing::{debug, info, warn};

use crate::brush::BrushSettings;
use crate::error::PaintError;
use crate::host::PaintHost;
use crate::raster;
use crate::stamp::{StampCache, StampKey};
use crate::stroke::{check_input, Stroke, StrokeSample};
use crate::surface::CpuSurface;
use crate::types::{BrushKind, BrushShape, PixelRect};

use super::PaintingPipeline;

/// Rasterize one sample with the stroke's brush snapshot
fn rasterize_sample(
    surface: &mut CpuSurface,
    stamps: &mut StampCache,
    brush: &BrushSettings,
    sample: &StrokeSample,
) -> Option<PixelRect> {
    let size = brush.effective_size(sample.pressure);
    let opacity = brush.effective_opacity(sample.pressure);
    if !(size.round() >= 1.0) || !(opacity > 0.0) {
        return None;
    }

    match brush.kind {
        BrushKind::Brush => {
            let key = StampKey::for_sample(brush, size)?;
            let stamp = stamps.get_or_create(key);
            raster::composite_stamp(surface, stamp, sample.position, brush.color, opacity)
        }
        BrushKind::Pencil => match (sample.previous, brush.shape) {
            (Some(previous), _) => raster::stroke_segment(
                surface,
                previous,
                sample.position,
                size,
                brush.color,
                opacity,
            ),
            (None, BrushShape::Circle) => {
                raster::fill_circle(surface, sample.position, size, brush.color, opacity)
            }
            (None, BrushShape::Square) => {
                raster::fill_square(surface, sample.position, size, brush.color, opacity)
            }
        },
    }
}

impl<H: PaintHost> PaintingPipeline<H> {
    /// Begin a stroke on the active layer and paint its first sample.
    ///
    /// `settings` is snapshotted; later edits to it do not affect this
    /// stroke. A stroke that is still open is ended and committed first.
    /// Returns false (and leaves any open stroke alone) if the settings or
    /// the input point are rejected or there is no active layer.
    pub fn begin_stroke(&mut self, settings: &BrushSettings, x: f32, y: f32, pressure: f32) -> bool {
        let brush = match settings.validated() {
            Ok(brush) => brush,
            Err(e) => {
                warn!("begin_stroke: {}", e);
                return false;
            }
        };
        if let Err(e) = check_input(x, y, pressure) {
            warn!("begin_stroke: {}", e);
            return false;
        }
        let Some((layer, _)) = self.active_surface("begin_stroke") else {
            return false;
        };

        self.stamps.sync_settings(&brush);
        let outcome = self.strokes.begin(brush, layer, x, y, pressure);
        if let Some(flushed) = outcome.flushed {
            self.commit_stroke(&flushed);
        }

        let bounds = match (self.strokes.active(), self.host.surface_mut(layer)) {
            (Some(stroke), Some(surface)) => {
                rasterize_sample(surface, &mut self.stamps, stroke.brush(), &outcome.sample)
            }
            _ => None,
        };
        debug!(
            "begin_stroke: layer={:?} at ({:.1}, {:.1}) pressure={:.2} -> {:?}",
            layer, x, y, pressure, bounds
        );
        self.host.request_redraw();
        true
    }

    /// Continue the active stroke with new input
    ///
    /// x, y are in surface pixel coordinates. Returns the number of samples
    /// rasterized, which is 0 when the point was too close to the previous
    /// one or there is no active stroke.
    pub fn extend_stroke(&mut self, x: f32, y: f32, pressure: f32) -> usize {
        let samples = match self.strokes.extend(x, y, pressure) {
            Ok(samples) => samples,
            Err(PaintError::NoActiveStroke) => {
                debug!("extend_stroke: {}, ignoring", PaintError::NoActiveStroke);
                return 0;
            }
            Err(e) => {
                warn!("extend_stroke: {}", e);
                return 0;
            }
        };
        if samples.is_empty() {
            return 0;
        }

        let Some(stroke) = self.strokes.active() else {
            return 0;
        };
        let layer = stroke.layer();
        let Some(surface) = self.host.surface_mut(layer) else {
            warn!("extend_stroke: layer {:?} has no surface", layer);
            return 0;
        };

        let mut bounds: Option<PixelRect> = None;
        for sample in &samples {
            let dab = rasterize_sample(surface, &mut self.stamps, stroke.brush(), sample);
            bounds = PixelRect::merge(bounds, dab);
        }
        debug!(
            "extend_stroke: {} samples to ({:.1}, {:.1}) -> {:?}",
            samples.len(),
            x,
            y,
            bounds
        );

        if bounds.is_some() {
            self.host.request_redraw();
        }
        samples.len()
    }

    /// End the current stroke and commit it. Idempotent.
    pub fn end_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.strokes.end()?;
        self.commit_stroke(&stroke);
        Some(stroke)
    }

    /// Cancel the current stroke
    ///
    /// No further samples are accepted and nothing is committed. Pixels that
    /// were already painted are NOT reverted.
    pub fn cancel_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.strokes.cancel()?;
        info!(
            "Cancelled stroke on layer {:?} after {} samples",
            stroke.layer(),
            stroke.len()
        );
        Some(stroke)
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.strokes.is_stroking()
    }

    fn commit_stroke(&mut self, stroke: &Stroke) {
        info!(
            "Committing stroke on layer {:?} ({} samples)",
            stroke.layer(),
            stroke.len()
        );
        self.finish_mutation(stroke.layer());
    }
}
