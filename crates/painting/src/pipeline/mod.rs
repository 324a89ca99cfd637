//! Complete painting pipeline
//!
//! This module connects the raster core to a host application:
//! - Stroke input (`begin_stroke`, `extend_stroke`, `end_stroke`, `cancel_stroke`)
//! - Stroke engine (sample thinning and gap interpolation)
//! - Stamp cache and pencil rasterizers (dab application)
//! - Region fills, gradients and alpha-mask placement
//!
//! Every logical operation that changes pixels results in exactly one
//! [`PaintHost::commit_mutation`] call. Misuse (no active layer, seed outside
//! the surface, no active stroke, NaN or infinite input) is logged and turned
//! into a no-op.

mod fill;
mod stroke;

use gesso_config::EngineConfig;
use tracing::warn;

use crate::error::PaintError;
use crate::host::PaintHost;
use crate::stamp::StampCache;
use crate::stroke::StrokeEngine;
use crate::surface::CpuSurface;
use crate::types::LayerId;

/// Painting pipeline bound to a host
///
/// The workflow:
/// 1. Input comes in via `begin_stroke`, `extend_stroke`, `end_stroke`
/// 2. The stroke engine turns input into samples
/// 3. Samples are rasterized onto the stroke's layer surface
/// 4. The host is asked to redraw after each batch and to commit once per stroke
pub struct PaintingPipeline<H: PaintHost> {
    pub(crate) host: H,
    pub(crate) strokes: StrokeEngine,
    pub(crate) stamps: StampCache,
    pub(crate) config: EngineConfig,
}

impl<H: PaintHost> PaintingPipeline<H> {
    /// Create a pipeline. An invalid configuration is replaced by the defaults.
    pub fn new(host: H, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("PaintingPipeline: {}, using default configuration", e);
                EngineConfig::default()
            }
        };
        Self {
            host,
            strokes: StrokeEngine::new(config.stroke),
            stamps: StampCache::new(),
            config,
        }
    }

    /// Create a pipeline with the default configuration
    pub fn with_defaults(host: H) -> Self {
        Self::new(host, EngineConfig::default())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the pipeline and hand the host back
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get reference to the stamp cache
    pub fn stamps(&self) -> &StampCache {
        &self.stamps
    }

    /// Active layer and its surface, or log why there is none
    pub(crate) fn active_surface(&mut self, op: &str) -> Option<(LayerId, &mut CpuSurface)> {
        let Some(layer) = self.host.active_layer() else {
            warn!("{}: {}", op, PaintError::InvalidTarget);
            return None;
        };
        match self.host.surface_mut(layer) {
            Some(surface) => Some((layer, surface)),
            None => {
                warn!("{}: {} (layer {:?})", op, PaintError::InvalidTarget, layer);
                None
            }
        }
    }

    /// Commit one finished operation and schedule a redraw
    pub(crate) fn finish_mutation(&mut self, layer: LayerId) {
        self.host.commit_mutation(layer);
        self.host.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushSettings;
    use crate::host::Document;
    use crate::types::{BrushKind, BrushShape, Rgba8};
    use gesso_config::StrokeConfig;

    const WHITE: Rgba8 = [255, 255, 255, 255];
    const BLACK: Rgba8 = [0, 0, 0, 255];

    fn pipeline_with_layer(width: u32, height: u32, color: Rgba8) -> (PaintingPipeline<Document>, LayerId) {
        let mut doc = Document::default();
        let layer = doc.add_layer("Background", width, height, color);
        (PaintingPipeline::with_defaults(doc), layer)
    }

    fn pencil(size: f32) -> BrushSettings {
        BrushSettings::new(
            BrushKind::Pencil,
            BrushShape::Circle,
            size,
            100,
            1.0,
            1.0,
            0.0,
            [255, 0, 0],
        )
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut config = EngineConfig::default();
        config.stroke = StrokeConfig {
            interpolation_step: 0.0,
            ..StrokeConfig::default()
        };
        let pipeline = PaintingPipeline::new(Document::default(), config);
        assert_eq!(pipeline.config(), &EngineConfig::default());
    }

    #[test]
    fn test_end_to_end_fill_stroke_gradient() {
        let (mut pipeline, layer) = pipeline_with_layer(10, 10, BLACK);

        // Fill the whole layer white
        let outcome = pipeline.flood_fill(5.0, 5.0, [255, 255, 255], Some(0.0)).unwrap();
        assert_eq!(outcome.pixels_changed(), 100);
        assert_eq!(pipeline.host().commit_count(), 1);

        // One-pixel red pencil line along row 5
        assert!(pipeline.begin_stroke(&pencil(1.0), 2.0, 5.0, 1.0));
        pipeline.extend_stroke(7.0, 5.0, 1.0);
        assert!(pipeline.end_stroke().is_some());
        assert_eq!(pipeline.host().commit_count(), 2);

        let surface = pipeline.host().surface(layer).unwrap();
        for x in 2..=7 {
            assert_eq!(surface.get_pixel(x, 5), Some([255, 0, 0, 255]), "pixel ({x}, 5)");
        }
        assert_eq!(surface.get_pixel(1, 5), Some(WHITE));
        assert_eq!(surface.get_pixel(8, 5), Some(WHITE));
        assert_eq!(surface.get_pixel(4, 4), Some(WHITE));

        // Radial fill of the white area from (0, 0) leaves the red line alone
        let stops = [
            crate::gradient::GradientStop::new(0.0, [0, 255, 0]),
            crate::gradient::GradientStop::new(1.0, [0, 0, 255]),
        ];
        let outcome = pipeline
            .radial_bucket_fill(0.0, 0.0, &stops, Some(0.0), 1.0, crate::types::BlendMode::Normal)
            .unwrap();
        assert_eq!(outcome.pixels_changed(), 94);
        assert_eq!(pipeline.host().commit_count(), 3);

        let surface = pipeline.host().surface(layer).unwrap();
        assert_eq!(surface.get_pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(surface.get_pixel(9, 9), Some([0, 0, 255, 255]));
        for x in 2..=7 {
            assert_eq!(surface.get_pixel(x, 5), Some([255, 0, 0, 255]));
        }
    }

    #[test]
    fn test_white_canvas_fill_then_radial_gradient() {
        let (mut pipeline, layer) = pipeline_with_layer(10, 10, WHITE);

        let filled = pipeline.flood_fill(5.0, 5.0, [0, 0, 0], Some(0.0)).unwrap();
        assert_eq!(filled.pixels_changed(), 100);
        assert!(pipeline.host().surface(layer).unwrap().pixels().iter().all(|p| *p == BLACK));

        let stops = [
            crate::gradient::GradientStop::new(0.0, [255, 0, 0]),
            crate::gradient::GradientStop::new(1.0, [0, 0, 255]),
        ];
        let outcome = pipeline
            .radial_bucket_fill(5.0, 5.0, &stops, Some(0.0), 1.0, crate::types::BlendMode::Normal)
            .unwrap();
        assert_eq!(outcome.pixels_changed(), 100);
        assert_eq!(pipeline.host().commit_count(), 2);

        let surface = pipeline.host().surface(layer).unwrap();
        assert_eq!(surface.get_pixel(5, 5), Some([255, 0, 0, 255]));
        // (0, 0) is the farthest pixel from the seed and gets the last stop
        assert_eq!(surface.get_pixel(0, 0), Some([0, 0, 255, 255]));
        for (x, y) in [(9, 0), (0, 9), (9, 9)] {
            let c = surface.get_pixel(x, y).unwrap();
            assert!(c[2] > c[0], "corner ({x}, {y}) = {c:?}");
        }
        assert!(surface.pixels().iter().all(|p| p[3] == 255 && p[1] == 0));
    }

    #[test]
    fn test_no_active_layer_is_noop() {
        let mut doc = Document::default();
        doc.add_layer("Background", 8, 8, WHITE);
        doc.clear_active_layer();
        let mut pipeline = PaintingPipeline::with_defaults(doc);

        assert!(!pipeline.begin_stroke(&pencil(3.0), 4.0, 4.0, 1.0));
        assert!(!pipeline.is_stroking());
        assert!(pipeline.flood_fill(1.0, 1.0, [0, 0, 0], None).is_none());
        assert!(pipeline.compute_region_mask(1.0, 1.0, None).is_none());
        assert_eq!(pipeline.host().commit_count(), 0);
        assert!(!pipeline.host_mut().take_redraw());
    }
}
