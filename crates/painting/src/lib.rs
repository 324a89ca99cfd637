//! Gesso painting core - stroke rasterization and region fills
//!
//! This crate provides the raster engine behind a layered painting app:
//! - [`surface`] - CPU 8-bit straight-alpha RGBA surface
//! - [`stroke`] - Stroke lifecycle, sample thinning and gap interpolation
//! - [`stamp`] - Soft brush stamps and their cache
//! - [`raster`] - Stamp compositing and hard-edged pencil primitives
//! - [`fill`] - Tolerance flood fill and region masks
//! - [`gradient`] - Distance and region-constrained radial gradients
//! - [`feather`] - Alpha-only box blur and mask placement
//! - [`host`] - Host seam and a reference document with undo
//! - [`pipeline`] - Complete painting pipeline

pub mod blend;
pub mod brush;
pub mod color;
pub mod constants;
pub mod error;
pub mod feather;
pub mod fill;
pub mod gradient;
pub mod host;
pub mod pipeline;
pub mod raster;
pub mod stamp;
pub mod stroke;
pub mod surface;
pub mod types;

pub use brush::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use fill::*;
pub use gradient::*;
pub use host::*;
pub use pipeline::*;
pub use stamp::*;
pub use stroke::*;
pub use surface::*;
pub use types::*;

pub use gesso_config::EngineConfig;
