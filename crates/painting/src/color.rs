//! Color comparison used as the flood-fill admission test

use crate::constants::DISTANCE_WEIGHTS;
use crate::types::{Rgb8, Rgba8};

/// Luma-weighted Euclidean distance between two RGBA colors.
///
/// `sqrt(0.299·Δr² + 0.587·Δg² + 0.114·Δb² + 0.1·Δa²)`, channels in 0..255.
#[inline]
pub fn color_distance(a: Rgba8, b: Rgba8) -> f32 {
    let mut sum = 0.0;
    for c in 0..4 {
        let delta = a[c] as f32 - b[c] as f32;
        sum += DISTANCE_WEIGHTS[c] * delta * delta;
    }
    sum.sqrt()
}

/// Check whether two colors match under a fill tolerance.
///
/// A tolerance of zero means exact RGBA equality rather than `distance == 0`.
#[inline]
pub fn within_tolerance(a: Rgba8, b: Rgba8, tolerance: f32) -> bool {
    if tolerance <= 0.0 {
        return a == b;
    }
    color_distance(a, b) <= tolerance
}

/// Attach an alpha channel to an RGB color
#[inline]
pub fn with_alpha(rgb: Rgb8, alpha: u8) -> Rgba8 {
    [rgb[0], rgb[1], rgb[2], alpha]
}

/// Linear interpolation of RGB channels, rounded to nearest
#[inline]
pub fn lerp_rgb(a: Rgb8, b: Rgb8, t: f32) -> Rgb8 {
    let mix = |x: u8, y: u8| -> u8 {
        let v = x as f32 + (y as f32 - x as f32) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Convert a unit float to a channel byte
#[inline]
pub fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_black_distance() {
        let d = color_distance([255, 0, 0, 255], [0, 0, 0, 255]);
        let expected = (0.299f32 * 255.0 * 255.0).sqrt();
        assert!((d - expected).abs() < 1e-3);
        assert!((d - 75.7).abs() < 0.1);

        assert!(!within_tolerance([255, 0, 0, 255], [0, 0, 0, 255], 75.0));
        assert!(within_tolerance([255, 0, 0, 255], [0, 0, 0, 255], 76.0));
    }

    #[test]
    fn test_zero_tolerance_is_exact_equality() {
        assert!(within_tolerance([10, 20, 30, 40], [10, 20, 30, 40], 0.0));
        assert!(!within_tolerance([10, 20, 30, 40], [10, 20, 30, 41], 0.0));
    }

    #[test]
    fn test_alpha_has_reduced_weight() {
        let alpha_only = color_distance([0, 0, 0, 0], [0, 0, 0, 100]);
        let green_only = color_distance([0, 0, 0, 255], [0, 100, 0, 255]);
        assert!(alpha_only < green_only);
        assert!((alpha_only - (0.1f32 * 100.0 * 100.0).sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = [12, 200, 7, 255];
        let b = [90, 3, 180, 128];
        assert_eq!(color_distance(a, b), color_distance(b, a));
    }

    #[test]
    fn test_lerp_rgb_rounds() {
        assert_eq!(lerp_rgb([255, 0, 0], [0, 0, 255], 0.0), [255, 0, 0]);
        assert_eq!(lerp_rgb([255, 0, 0], [0, 0, 255], 1.0), [0, 0, 255]);
        assert_eq!(lerp_rgb([0, 0, 0], [255, 255, 255], 0.5), [128, 128, 128]);
    }
}
