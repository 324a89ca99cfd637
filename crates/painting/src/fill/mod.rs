//! Region fill engine: tolerance flood fill and region masks
//!
//! Both operations share one traversal ([`compute_region_mask`]), so a flood
//! fill always mutates exactly the pixels the mask reports for the same seed
//! and tolerance.

mod flood;
mod mask;

pub use flood::flood_fill;
pub use mask::{compute_region_mask, RegionMask};

use serde::{Deserialize, Serialize};

use crate::types::PixelRect;

/// What a fill did to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillOutcome {
    /// Seed already had the fill color; nothing was painted
    Unchanged,
    /// Pixels were painted
    Filled { pixels: usize, bounds: PixelRect },
}

impl FillOutcome {
    /// Number of pixels painted
    pub fn pixels_changed(&self) -> usize {
        match self {
            FillOutcome::Unchanged => 0,
            FillOutcome::Filled { pixels, .. } => *pixels,
        }
    }

    /// Affected region, if anything was painted
    pub fn bounds(&self) -> Option<PixelRect> {
        match self {
            FillOutcome::Unchanged => None,
            FillOutcome::Filled { bounds, .. } => Some(*bounds),
        }
    }
}
