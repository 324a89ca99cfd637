//! Radial gradient constrained to a flood-fill region

use glam::Vec2;
use tracing::debug;

use super::GradientStops;
use crate::color::with_alpha;
use crate::error::PaintError;
use crate::fill::{compute_region_mask, FillOutcome};
use crate::surface::CpuSurface;
use crate::types::BlendMode;

/// Fill the region around `(x, y)` with a radial gradient.
///
/// The gradient is normalized by the farthest region pixel from the seed, not
/// by the surface corners. A single-pixel region gets the last stop. The
/// gradient is rendered on an offscreen buffer and composited with `opacity`
/// and `blend_mode`, so pixels outside the region are never touched.
pub fn radial_bucket_fill(
    surface: &mut CpuSurface,
    x: f32,
    y: f32,
    stops: &GradientStops,
    tolerance: f32,
    opacity: f32,
    blend_mode: BlendMode,
) -> Result<FillOutcome, PaintError> {
    if !opacity.is_finite() {
        return Err(PaintError::NonFinite { what: "opacity" });
    }
    let mask = compute_region_mask(surface, x, y, tolerance)?;
    let (seed_x, seed_y) = mask.seed();
    let seed = Vec2::new(seed_x as f32, seed_y as f32);

    let max_distance = mask
        .iter()
        .map(|(px, py)| Vec2::new(px as f32, py as f32).distance(seed))
        .fold(0.0f32, f32::max);

    let mut offscreen = CpuSurface::new(surface.width, surface.height);
    for (px, py) in mask.iter() {
        let t = if max_distance > 0.0 {
            (Vec2::new(px as f32, py as f32).distance(seed) / max_distance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        offscreen.set_pixel(px, py, with_alpha(stops.sample(t), 255));
    }

    debug!(
        "radial_bucket_fill: seed=({}, {}), {} pixels, max_distance={:.2}, opacity={:.2}, mode={:?}",
        seed_x,
        seed_y,
        mask.len(),
        max_distance,
        opacity,
        blend_mode
    );

    match surface.composite_from(&offscreen, blend_mode, opacity) {
        Some(_) if opacity > 0.0 => Ok(FillOutcome::Filled {
            pixels: mask.len(),
            bounds: mask.bounds(),
        }),
        _ => Ok(FillOutcome::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientStop;
    use crate::types::Rgba8;

    const BLACK: Rgba8 = [0, 0, 0, 255];
    const WHITE: Rgba8 = [255, 255, 255, 255];

    fn red_to_blue() -> GradientStops {
        GradientStops::new(&[
            GradientStop::new(0.0, [255, 0, 0]),
            GradientStop::new(1.0, [0, 0, 255]),
        ])
        .unwrap()
    }

    #[test]
    fn test_uniform_region_gradient() {
        let mut surface = CpuSurface::filled(10, 10, BLACK);
        let outcome =
            radial_bucket_fill(&mut surface, 5.0, 5.0, &red_to_blue(), 0.0, 1.0, BlendMode::Normal)
                .unwrap();

        assert_eq!(outcome.pixels_changed(), 100);
        assert_eq!(surface.get_pixel(5, 5), Some([255, 0, 0, 255]));
        // (0, 0) is the farthest pixel from the seed
        assert_eq!(surface.get_pixel(0, 0), Some([0, 0, 255, 255]));
        for (x, y) in [(9, 0), (0, 9), (9, 9)] {
            let c = surface.get_pixel(x, y).unwrap();
            assert!(c[2] > c[0], "corner ({x}, {y}) = {c:?}");
        }
        // Ring in between is a blend
        let mid = surface.get_pixel(2, 5).unwrap();
        assert!(mid[0] > 0 && mid[2] > 0);
    }

    #[test]
    fn test_single_pixel_region_gets_last_stop() {
        let mut surface = CpuSurface::filled(5, 5, WHITE);
        surface.set_pixel(2, 2, BLACK);
        let outcome =
            radial_bucket_fill(&mut surface, 2.0, 2.0, &red_to_blue(), 0.0, 1.0, BlendMode::Normal)
                .unwrap();

        assert_eq!(outcome.pixels_changed(), 1);
        assert_eq!(surface.get_pixel(2, 2), Some([0, 0, 255, 255]));
        assert_eq!(surface.get_pixel(1, 2), Some(WHITE));
    }

    #[test]
    fn test_max_distance_from_region_not_canvas() {
        // 3x1 black strip in a large white surface: strip end gets the last stop
        let mut surface = CpuSurface::filled(40, 40, WHITE);
        for x in 10..13 {
            surface.set_pixel(x, 20, BLACK);
        }
        radial_bucket_fill(&mut surface, 10.0, 20.0, &red_to_blue(), 0.0, 1.0, BlendMode::Normal)
            .unwrap();

        assert_eq!(surface.get_pixel(10, 20), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_pixel(12, 20), Some([0, 0, 255, 255]));
        assert_eq!(surface.get_pixel(13, 20), Some(WHITE));
        assert_eq!(surface.get_pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_opacity_blends_with_existing() {
        let mut surface = CpuSurface::filled(3, 3, WHITE);
        let stops = GradientStops::new(&[GradientStop::new(0.0, [0, 0, 0])]).unwrap();
        radial_bucket_fill(&mut surface, 1.0, 1.0, &stops, 0.0, 0.5, BlendMode::Normal).unwrap();

        let c = surface.get_pixel(1, 1).unwrap();
        assert!((c[0] as i32 - 128).abs() <= 1);
        assert_eq!(c[3], 255);
    }

    #[test]
    fn test_blend_mode_respected() {
        let mut surface = CpuSurface::filled(3, 3, [200, 100, 50, 255]);
        let stops = GradientStops::new(&[GradientStop::new(0.0, [255, 255, 255])]).unwrap();
        radial_bucket_fill(&mut surface, 1.0, 1.0, &stops, 0.0, 1.0, BlendMode::Multiply).unwrap();
        // Multiply by white keeps the backdrop
        assert_eq!(surface.get_pixel(0, 0), Some([200, 100, 50, 255]));
    }

    #[test]
    fn test_zero_opacity_unchanged() {
        let mut surface = CpuSurface::filled(3, 3, WHITE);
        let outcome =
            radial_bucket_fill(&mut surface, 1.0, 1.0, &red_to_blue(), 0.0, 0.0, BlendMode::Normal)
                .unwrap();
        assert_eq!(outcome, FillOutcome::Unchanged);
        assert!(surface.pixels().iter().all(|p| *p == WHITE));
    }

    #[test]
    fn test_nan_opacity_rejected_before_painting() {
        let mut surface = CpuSurface::filled(4, 4, BLACK);
        let result =
            radial_bucket_fill(&mut surface, 1.0, 1.0, &red_to_blue(), 0.0, f32::NAN, BlendMode::Normal);
        assert_eq!(result, Err(PaintError::NonFinite { what: "opacity" }));
        assert!(surface.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let mut surface = CpuSurface::filled(3, 3, WHITE);
        assert!(matches!(
            radial_bucket_fill(&mut surface, 9.0, 1.0, &red_to_blue(), 0.0, 1.0, BlendMode::Normal),
            Err(PaintError::OutOfBounds { .. })
        ));
    }
}
