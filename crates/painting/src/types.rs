use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA8 color.
pub type Rgba8 = [u8; 4];

/// RGB color used by brushes and gradient stops.
pub type Rgb8 = [u8; 3];

/// Host-assigned layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Blend modes used when compositing an offscreen buffer onto a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Multiply = 1,
    Screen = 2,
    Overlay = 3,
    Darken = 4,
    Lighten = 5,
    Difference = 6,
    /// Destination-out: source coverage removes destination alpha
    Erase = 7,
}

/// Rasterization strategy for a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum BrushKind {
    /// Soft stamps from the stamp cache
    #[default]
    Brush = 0,
    /// Hard-edged shapes and line segments
    Pencil = 1,
}

/// Tip shape for both brush kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum BrushShape {
    #[default]
    Circle = 0,
    Square = 1,
}

/// Axis-aligned pixel rectangle (x, y, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a single pixel
    pub fn pixel(x: u32, y: u32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        PixelRect::new(x, y, right - x, bottom - y)
    }

    /// Grow an optional accumulator by `other`
    pub fn merge(acc: Option<PixelRect>, other: Option<PixelRect>) -> Option<PixelRect> {
        match (acc, other) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_union() {
        let a = PixelRect::new(0, 0, 4, 4);
        let b = PixelRect::new(10, 2, 2, 8);
        assert_eq!(a.union(&b), PixelRect::new(0, 0, 12, 10));
    }

    #[test]
    fn test_rect_merge_optional() {
        let a = Some(PixelRect::pixel(3, 3));
        assert_eq!(PixelRect::merge(None, a), a);
        assert_eq!(PixelRect::merge(a, None), a);
        assert_eq!(
            PixelRect::merge(a, Some(PixelRect::pixel(5, 1))),
            Some(PixelRect::new(3, 1, 3, 3))
        );
    }
}
