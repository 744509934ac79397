//! Pixel frame sink and depth buffer.

use std::path::Path;

use facet_core::Color;

/// A 2D pixel surface the renderer writes packed `0xFF_RR_GG_BB` pixels
/// into. Out-of-bounds writes are ignored.
pub trait FrameSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, packed: u32);
}

/// An owned row-major framebuffer.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a framebuffer cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK.pack(); (width * height) as usize],
        }
    }

    /// Reset every pixel to opaque black.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::BLACK.pack());
    }

    /// Read back the packed pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// All packed pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Write a whole row of packed pixels (used by the tile blitter).
    pub(crate) fn write_span(&mut self, x: u32, y: u32, span: &[u32]) {
        let start = (y * self.width + x) as usize;
        self.pixels[start..start + span.len()].copy_from_slice(span);
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for &p in &self.pixels {
            let c = Color::unpack(p);
            bytes.extend_from_slice(&[c.red, c.green, c.blue, 255]);
        }
        bytes
    }

    /// Save the frame as a PNG image.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba())
            .expect("framebuffer dimensions match pixel data");
        img.save(path)
    }
}

impl FrameSink for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, packed: u32) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = packed;
        }
    }
}

/// Full-screen inverse-depth buffer.
///
/// Stores `1/z` per pixel (larger = nearer); the "no surface" sentinel is
/// negative infinity so any real surface wins the first compare. Reset once
/// per frame, written with compare-and-conditionally-store only.
pub struct DepthBuffer {
    width: u32,
    height: u32,
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depths: vec![f32::NEG_INFINITY; (width * height) as usize],
        }
    }

    pub fn reset(&mut self) {
        self.depths.fill(f32::NEG_INFINITY);
    }

    /// If (x, y) is in bounds and `inv_depth` is strictly nearer than the
    /// stored value, store it and return true. The caller writes the pixel
    /// only on true.
    pub fn test_and_set(&mut self, x: u32, y: u32, inv_depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let cell = &mut self.depths[(y * self.width + x) as usize];
        if inv_depth > *cell {
            *cell = inv_depth;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_starts_black() {
        let fb = Framebuffer::new(4, 4);
        assert_eq!(fb.pixel(0, 0), 0xFF00_0000);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(2, 1, 0xFFAA_BBCC);
        assert_eq!(fb.pixel(2, 1), 0xFFAA_BBCC);
    }

    #[test]
    fn test_out_of_bounds_write_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(99, 99, 0xFFFF_FFFF);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.pixel(x, y), 0xFF00_0000);
            }
        }
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set_pixel(0, 0, 0xFF10_2030);
        assert_eq!(fb.to_rgba(), vec![0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn test_depth_nearer_wins() {
        let mut depth = DepthBuffer::new(2, 2);
        // inverse depth: larger = nearer
        assert!(depth.test_and_set(0, 0, 0.25));
        assert!(!depth.test_and_set(0, 0, 0.10)); // farther, rejected
        assert!(depth.test_and_set(0, 0, 0.50)); // nearer, accepted
    }

    #[test]
    fn test_depth_out_of_bounds() {
        let mut depth = DepthBuffer::new(2, 2);
        assert!(!depth.test_and_set(5, 0, 1.0));
    }
}
