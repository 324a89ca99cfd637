//! Region fills, gradients and mask placement for the painting pipeline

use glam::Vec2;
use tracing::{debug, info, warn};

use crate::error::PaintError;
use crate::feather;
use crate::fill::{self, FillOutcome, RegionMask};
use crate::gradient::{self, GradientStop, GradientStops};
use crate::host::PaintHost;
use crate::surface::CpuSurface;
use crate::types::{BlendMode, PixelRect, Rgb8};

use super::PaintingPipeline;

impl<H: PaintHost> PaintingPipeline<H> {
    /// Tolerance used when a fill is called without one
    pub fn default_tolerance(&self) -> f32 {
        self.config.fill.default_tolerance
    }

    fn tolerance_or_default(&self, tolerance: Option<f32>) -> f32 {
        tolerance.unwrap_or(self.config.fill.default_tolerance).max(0.0)
    }

    /// Flood fill the region around `(x, y)` on the active layer.
    ///
    /// Commits once when pixels change. Returns None if there is no active
    /// layer or the seed lies outside the surface.
    pub fn flood_fill(&mut self, x: f32, y: f32, color: Rgb8, tolerance: Option<f32>) -> Option<FillOutcome> {
        let tolerance = self.tolerance_or_default(tolerance);
        let (layer, surface) = self.active_surface("flood_fill")?;

        let outcome = match fill::flood_fill(surface, x, y, color, tolerance) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("flood_fill: {}", e);
                return None;
            }
        };

        if let FillOutcome::Filled { pixels, bounds } = outcome {
            info!(
                "flood_fill: {} pixels on layer {:?}, bounds {:?}",
                pixels, layer, bounds
            );
            self.finish_mutation(layer);
        }
        Some(outcome)
    }

    /// Region mask for `(x, y)` on the active layer, without painting
    pub fn compute_region_mask(&mut self, x: f32, y: f32, tolerance: Option<f32>) -> Option<RegionMask> {
        let tolerance = self.tolerance_or_default(tolerance);
        let (_, surface) = self.active_surface("compute_region_mask")?;
        match fill::compute_region_mask(surface, x, y, tolerance) {
            Ok(mask) => {
                debug!("compute_region_mask: {} pixels", mask.len());
                Some(mask)
            }
            Err(e) => {
                warn!("compute_region_mask: {}", e);
                None
            }
        }
    }

    /// Fill the region around `(x, y)` with a radial gradient centered on the seed
    pub fn radial_bucket_fill(
        &mut self,
        x: f32,
        y: f32,
        stops: &[GradientStop],
        tolerance: Option<f32>,
        opacity: f32,
        blend_mode: BlendMode,
    ) -> Option<FillOutcome> {
        if !opacity.is_finite() {
            warn!("radial_bucket_fill: {}", PaintError::NonFinite { what: "opacity" });
            return None;
        }
        let tolerance = self.tolerance_or_default(tolerance);
        let stops = match GradientStops::new(stops) {
            Ok(stops) => stops,
            Err(e) => {
                warn!("radial_bucket_fill: {}", e);
                return None;
            }
        };
        let (layer, surface) = self.active_surface("radial_bucket_fill")?;

        let result = gradient::radial_bucket_fill(
            surface,
            x,
            y,
            &stops,
            tolerance,
            opacity.clamp(0.0, 1.0),
            blend_mode,
        );
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("radial_bucket_fill: {}", e);
                return None;
            }
        };

        if let FillOutcome::Filled { pixels, .. } = outcome {
            info!("radial_bucket_fill: {} pixels on layer {:?}", pixels, layer);
            self.finish_mutation(layer);
        }
        Some(outcome)
    }

    /// Fill the whole active layer with a gradient by distance from `(x, y)`
    pub fn distance_gradient_fill(&mut self, x: f32, y: f32, stops: &[GradientStop]) -> Option<PixelRect> {
        if !x.is_finite() || !y.is_finite() {
            warn!("distance_gradient_fill: {}", PaintError::NonFinite { what: "origin" });
            return None;
        }
        let stops = match GradientStops::new(stops) {
            Ok(stops) => stops,
            Err(e) => {
                warn!("distance_gradient_fill: {}", e);
                return None;
            }
        };
        let (layer, surface) = self.active_surface("distance_gradient_fill")?;

        let bounds = gradient::distance_gradient_fill(surface, Vec2::new(x, y), &stops)?;
        info!("distance_gradient_fill: layer {:?}, {:?}", layer, bounds);
        self.finish_mutation(layer);
        Some(bounds)
    }

    /// Soften the edges of an alpha-coverage mask in place
    pub fn feather_alpha_mask(&self, mask: &mut CpuSurface, radius: u32) {
        feather::blur_alpha(mask, radius);
    }

    /// Feather `mask`, tint it with `color` and composite it onto the active
    /// layer with its top-left corner at `(x, y)`
    #[allow(clippy::too_many_arguments)]
    pub fn place_alpha_mask(
        &mut self,
        mask: &CpuSurface,
        x: i64,
        y: i64,
        color: Rgb8,
        opacity: f32,
        blend_mode: BlendMode,
        feather_radius: u32,
    ) -> Option<PixelRect> {
        if !opacity.is_finite() {
            warn!("place_alpha_mask: {}", PaintError::NonFinite { what: "opacity" });
            return None;
        }
        let (layer, surface) = self.active_surface("place_alpha_mask")?;
        let bounds = feather::place_alpha_mask(
            surface,
            mask,
            x,
            y,
            color,
            opacity.clamp(0.0, 1.0),
            blend_mode,
            feather_radius,
        )?;
        info!("place_alpha_mask: layer {:?}, {:?}", layer, bounds);
        self.finish_mutation(layer);
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use crate::fill::FillOutcome;
    use crate::gradient::GradientStop;
    use crate::host::{Document, PaintHost};
    use crate::pipeline::PaintingPipeline;
    use crate::surface::CpuSurface;
    use crate::types::{BlendMode, LayerId, PixelRect, Rgba8};

    const WHITE: Rgba8 = [255, 255, 255, 255];
    const BLACK: Rgba8 = [0, 0, 0, 255];

    fn setup(width: u32, height: u32, color: Rgba8) -> (PaintingPipeline<Document>, LayerId) {
        let mut doc = Document::default();
        let layer = doc.add_layer("Background", width, height, color);
        (PaintingPipeline::with_defaults(doc), layer)
    }

    fn red_to_blue() -> [GradientStop; 2] {
        [
            GradientStop::new(0.0, [255, 0, 0]),
            GradientStop::new(1.0, [0, 0, 255]),
        ]
    }

    #[test]
    fn test_fill_commits_once_and_is_idempotent() {
        let (mut pipeline, layer) = setup(6, 6, WHITE);
        let first = pipeline.flood_fill(1.0, 1.0, [0, 0, 0], Some(0.0)).unwrap();
        assert_eq!(first.pixels_changed(), 36);
        assert_eq!(pipeline.host().commit_count(), 1);

        let before = pipeline.host().surface(layer).unwrap().clone();
        let second = pipeline.flood_fill(1.0, 1.0, [0, 0, 0], Some(0.0)).unwrap();
        assert_eq!(second, FillOutcome::Unchanged);
        assert_eq!(pipeline.host().commit_count(), 1);
        assert_eq!(pipeline.host().surface(layer).unwrap(), &before);
    }

    #[test]
    fn test_fill_out_of_bounds_is_noop() {
        let (mut pipeline, _) = setup(4, 4, WHITE);
        assert!(pipeline.flood_fill(-1.0, 2.0, [0, 0, 0], None).is_none());
        assert!(pipeline.flood_fill(2.0, 4.0, [0, 0, 0], None).is_none());
        assert_eq!(pipeline.host().commit_count(), 0);
    }

    #[test]
    fn test_default_tolerance_applies() {
        let (mut pipeline, layer) = setup(4, 1, WHITE);
        // Within the default tolerance of 32 from white
        pipeline
            .host_mut()
            .surface_mut(layer)
            .unwrap()
            .set_pixel(3, 0, [240, 240, 240, 255]);
        let outcome = pipeline.flood_fill(0.0, 0.0, [0, 0, 0], None).unwrap();
        assert_eq!(outcome.pixels_changed(), 4);
        assert_eq!(pipeline.default_tolerance(), 32.0);
    }

    #[test]
    fn test_region_mask_matches_fill() {
        let (mut pipeline, layer) = setup(8, 8, WHITE);
        {
            let surface = pipeline.host_mut().surface_mut(layer)
            .unwrap();
            for y in 0..8 {
                surface.set_pixel(4, y, BLACK);
            }
        }
        let mask = pipeline.compute_region_mask(1.0, 1.0, Some(0.0)).unwrap();
        assert_eq!(mask.len(), 32);
        assert_eq!(pipeline.host().commit_count(), 0);

        pipeline.flood_fill(1.0, 1.0, [0, 255, 0], Some(0.0));
        let surface = pipeline.host().surface(layer).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let painted = surface.get_pixel(x, y) == Some([0, 255, 0, 255]);
                assert_eq!(painted, mask.contains(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_radial_fill_commits_once() {
        let (mut pipeline, layer) = setup(10, 10, BLACK);
        let outcome = pipeline
            .radial_bucket_fill(5.0, 5.0, &red_to_blue(), Some(0.0), 1.0, BlendMode::Normal)
            .unwrap();
        assert_eq!(outcome.pixels_changed(), 100);
        assert_eq!(pipeline.host().commit_count(), 1);
        let surface = pipeline.host().surface(layer).unwrap();
        assert_eq!(surface.get_pixel(5, 5), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_empty_stops_rejected() {
        let (mut pipeline, layer) = setup(4, 4, WHITE);
        assert!(pipeline.radial_bucket_fill(1.0, 1.0, &[], None, 1.0, BlendMode::Normal).is_none());
        assert!(pipeline.distance_gradient_fill(1.0, 1.0, &[]).is_none());
        assert_eq!(pipeline.host().commit_count(), 0);
        assert_eq!(pipeline.host().surface(layer).unwrap().get_pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_distance_gradient_covers_layer() {
        let (mut pipeline, layer) = setup(9, 9, WHITE);
        let bounds = pipeline.distance_gradient_fill(0.0, 0.0, &red_to_blue());
        assert_eq!(bounds, Some(PixelRect::new(0, 0, 9, 9)));
        assert_eq!(pipeline.host().commit_count(), 1);
        let surface = pipeline.host().surface(layer).unwrap();
        assert_eq!(surface.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_pixel(8, 8), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_place_alpha_mask_commits() {
        let (mut pipeline, layer) = setup(16, 16, WHITE);
        let mut mask = CpuSurface::new(8, 8);
        for y in 2..6 {
            for x in 2..6 {
                mask.set_pixel(x, y, [0, 0, 0, 255]);
            }
        }

        let bounds = pipeline.place_alpha_mask(&mask, 4, 4, [0, 0, 255], 1.0, BlendMode::Normal, 1);
        assert!(bounds.is_some());
        assert_eq!(pipeline.host().commit_count(), 1);
        let surface = pipeline.host().surface(layer).unwrap();
        assert_eq!(surface.get_pixel(0, 0), Some(WHITE));
        let center = surface.get_pixel(7, 7).unwrap();
        assert_eq!(center[2], 255);
        assert!(center[0] < 255);
    }

    #[test]
    fn test_feather_alpha_mask_in_place() {
        let (pipeline, _) = setup(1, 1, WHITE);
        let mut mask = CpuSurface::new(5, 5);
        mask.set_pixel(2, 2, [9, 9, 9, 255]);
        pipeline.feather_alpha_mask(&mut mask, 1);
        assert_eq!(mask.get_pixel(2, 2), Some([9, 9, 9, 28]));
        assert_eq!(mask.get_pixel(1, 2).unwrap()[3], 28);
    }

    #[test]
    fn test_non_finite_inputs_leave_layer_untouched() {
        let (mut pipeline, layer) = setup(32, 32, WHITE);
        let before = pipeline.host().surface(layer).unwrap().clone();

        let radial =
            pipeline.radial_bucket_fill(5.0, 5.0, &red_to_blue(), Some(0.0), f32::NAN, BlendMode::Normal);
        assert!(radial.is_none());
        assert!(pipeline.flood_fill(f32::NAN, 5.0, [0, 0, 0], Some(0.0)).is_none());
        assert!(pipeline.distance_gradient_fill(f32::NAN, 0.0, &red_to_blue()).is_none());
        assert!(pipeline.distance_gradient_fill(0.0, f32::INFINITY, &red_to_blue()).is_none());

        let mask = CpuSurface::filled(4, 4, [0, 0, 0, 255]);
        let placed = pipeline.place_alpha_mask(&mask, 2, 2, [0, 0, 0], f32::NAN, BlendMode::Normal, 0);
        assert!(placed.is_none());

        assert_eq!(pipeline.host().surface(layer).unwrap(), &before);
        assert_eq!(pipeline.host().commit_count(), 0);
    }
}
