use thiserror::Error;

/// Recoverable misuse of the raster core.
///
/// None of these escape the pipeline: they are logged and the operation turns
/// into a no-op. Lower-level functions return them so callers can decide.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintError {
    #[error("No active layer or surface available")]
    InvalidTarget,
    #[error("No active stroke - call begin_stroke() first")]
    NoActiveStroke,
    #[error("Point ({x}, {y}) is outside the surface")]
    OutOfBounds { x: f32, y: f32 },
    #[error("{what} must be a finite number")]
    NonFinite { what: &'static str },
    #[error("Gradient needs at least one stop")]
    EmptyGradient,
    #[error("Invalid brush settings: {0}")]
    InvalidSettings(String),
}
