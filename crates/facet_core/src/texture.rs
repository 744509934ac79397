//! Texture images for diffuse, checker, and bump-map lookups.

use std::path::Path;

use facet_math::Vec3;
use thiserror::Error;

use crate::color::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Texture has zero dimension: {0}x{1}")]
    EmptyImage(u32, u32),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A rectangular RGB pixel image addressable by integer (x, y).
///
/// Lookups are nearest-texel (no filtering) and clamp out-of-range indices
/// to the image edge, so barycentric interpolation landing slightly outside
/// the image degrades gracefully instead of failing.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    /// Row-major RGB pixels.
    pixels: Vec<Color>,
}

impl Texture {
    /// Load a texture from an image file (any format the `image` crate
    /// decodes).
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage(width, height));
        }
        let pixels = img
            .pixels()
            .map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
            .collect();
        log::debug!("loaded {}x{} texture", width, height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a texture procedurally (checker patterns, test fixtures).
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel at integer coordinates, clamped to the image bounds.
    pub fn texel(&self, x: i64, y: i64) -> Color {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest texel at normalized (u, v) in [0, 1].
    pub fn sample_uv(&self, u: f32, v: f32) -> Color {
        let x = (u * (self.width as f32 - 1.0)).round() as i64;
        let y = (v * (self.height as f32 - 1.0)).round() as i64;
        self.texel(x, y)
    }

    /// Interpret the texel at (u, v) as a perturbation normal.
    ///
    /// Channels are taken as raw vector components and normalized; a black
    /// texel falls back to +Z rather than producing NaN.
    pub fn normal_at(&self, u: f32, v: f32) -> Vec3 {
        let c = self.sample_uv(u, v);
        let n = Vec3::new(c.red as f32, c.green as f32, c.blue as f32);
        if n.length_squared() < 1e-12 {
            Vec3::Z
        } else {
            n.normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        Texture::from_fn(4, 4, |x, y| Color::new((x * 10) as u8, (y * 10) as u8, 0))
    }

    #[test]
    fn test_texel_lookup() {
        let t = gradient();
        assert_eq!(t.texel(2, 3), Color::new(20, 30, 0));
    }

    #[test]
    fn test_texel_clamps_out_of_range() {
        let t = gradient();
        assert_eq!(t.texel(-5, 0), t.texel(0, 0));
        assert_eq!(t.texel(99, 99), t.texel(3, 3));
    }

    #[test]
    fn test_sample_uv_corners() {
        let t = gradient();
        assert_eq!(t.sample_uv(0.0, 0.0), t.texel(0, 0));
        assert_eq!(t.sample_uv(1.0, 1.0), t.texel(3, 3));
    }

    #[test]
    fn test_normal_at_is_unit_or_z() {
        let t = Texture::from_fn(2, 2, |x, _| {
            if x == 0 {
                Color::BLACK
            } else {
                Color::new(0, 0, 200)
            }
        });
        // Black texel falls back to +Z
        assert_eq!(t.normal_at(0.0, 0.0), Vec3::Z);
        let n = t.normal_at(1.0, 0.0);
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert_eq!(n, Vec3::Z);
    }
}
