//! CPU surface for painting - straight-alpha RGBA8 storage

use crate::blend::blend_rgba;
use crate::types::{BlendMode, PixelRect, Rgba8};

/// An RGBA8 CPU surface for painting.
/// Stores pixels as [u8; 4] in straight (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a]
    pixels: Vec<Rgba8>,
}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a new surface filled with a solid color
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; pixel_count],
        }
    }

    /// Wrap an existing pixel buffer. Returns None if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Check whether integer coordinates are on the surface
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Row-major index of a pixel. Caller checks bounds.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index_of(x, y)])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index_of(x, y);
        self.pixels[index] = color;
    }

    /// Source-over a color onto an existing pixel with extra opacity
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba8, opacity: f32) {
        self.composite_pixel(x, y, color, BlendMode::Normal, opacity);
    }

    /// Composite a color onto an existing pixel with a blend mode
    #[inline]
    pub fn composite_pixel(&mut self, x: u32, y: u32, color: Rgba8, mode: BlendMode, opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index_of(x, y);
        self.pixels[index] = blend_rgba(self.pixels[index], color, mode, opacity);
    }

    /// Composite another surface of the same size onto this one.
    ///
    /// Transparent source pixels leave the destination untouched. Returns the
    /// bounding box of the pixels that received source coverage.
    pub fn composite_from(
        &mut self,
        source: &CpuSurface,
        mode: BlendMode,
        opacity: f32,
    ) -> Option<PixelRect> {
        if source.width != self.width || source.height != self.height {
            tracing::warn!(
                "composite_from: size mismatch {}x{} onto {}x{}",
                source.width,
                source.height,
                self.width,
                self.height
            );
            return None;
        }

        let mut bounds: Option<PixelRect> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index_of(x, y);
                let src = source.pixels[index];
                if src[3] == 0 {
                    continue;
                }
                self.pixels[index] = blend_rgba(self.pixels[index], src, mode, opacity);
                bounds = PixelRect::merge(bounds, Some(PixelRect::pixel(x, y)));
            }
        }
        bounds
    }

    /// Get pixel data for a rectangular region
    ///
    /// Returns the clamped rectangle and its pixels in row-major order.
    pub fn get_region_data(&self, x: u32, y: u32, width: u32, height: u32) -> (PixelRect, Vec<Rgba8>) {
        let rect = self.clamp_rect(x, y, width, height);
        let mut data = Vec::with_capacity((rect.width as usize) * (rect.height as usize));
        for py in rect.y..rect.bottom() {
            let start = self.index_of(rect.x, py);
            data.extend_from_slice(&self.pixels[start..start + rect.width as usize]);
        }
        (rect, data)
    }

    /// Write back a region previously read with `get_region_data`.
    ///
    /// Rows outside the surface are skipped; a short buffer writes as much as it holds.
    pub fn put_region_data(&mut self, rect: PixelRect, data: &[Rgba8]) {
        let clamped = self.clamp_rect(rect.x, rect.y, rect.width, rect.height);
        let row_len = rect.width as usize;
        if row_len == 0 {
            return;
        }
        for (row, py) in (clamped.y..clamped.bottom()).enumerate() {
            let src_start = row * row_len;
            if src_start >= data.len() {
                break;
            }
            let count = (clamped.width as usize).min(data.len() - src_start);
            let dst_start = self.index_of(clamped.x, py);
            self.pixels[dst_start..dst_start + count]
                .copy_from_slice(&data[src_start..src_start + count]);
        }
    }

    /// Clamp a rectangle to the surface bounds
    pub fn clamp_rect(&self, x: u32, y: u32, width: u32, height: u32) -> PixelRect {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);
        PixelRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Full-surface rectangle
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Get raw pixel data for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Get mutable access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }
}
