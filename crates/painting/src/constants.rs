/// Maximum hardness value (fully hard edge).
pub const MAX_HARDNESS: u8 = 100;

/// Smallest stamp/pencil diameter that still rasterizes, in pixels.
pub const MIN_BRUSH_SIZE: f32 = 1.0;

/// Upper bound for brush diameters. Not a magic number - may change.
pub const MAX_BRUSH_SIZE: f32 = 2048.0;

/// Rotation quantization for stamp keys (hundredths of a degree).
pub const ROTATION_KEY_SCALE: f32 = 100.0;

/// Guard for zero-width gradient stop intervals.
pub const STOP_EPSILON: f32 = 1e-6;

/// Luma weights for the color distance metric, alpha last.
pub const DISTANCE_WEIGHTS: [f32; 4] = [0.299, 0.587, 0.114, 0.1];
