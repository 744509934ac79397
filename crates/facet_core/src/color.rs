//! 8-bit RGB color and packed-pixel conversion.

use facet_math::Vec3;

/// An RGB color with 8-bit channels.
///
/// Shading works with a separate brightness scalar and applies it at pack
/// time; the base channels stay untouched so a triangle can be re-shaded
/// every frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Pack into the output pixel encoding `0xFF_RR_GG_BB` (opaque alpha).
    pub fn pack(&self) -> u32 {
        (255u32 << 24) | ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Unpack a `0xFF_RR_GG_BB` pixel back into a color.
    pub fn unpack(pixel: u32) -> Self {
        Self {
            red: ((pixel >> 16) & 255) as u8,
            green: ((pixel >> 8) & 255) as u8,
            blue: (pixel & 255) as u8,
        }
    }

    /// Multiply each channel by a brightness scalar.
    ///
    /// The scalar is clamped to [0, 1]; shading guarantees the ambient
    /// floor before calling this.
    pub fn scaled(&self, brightness: f32) -> Color {
        let b = brightness.clamp(0.0, 1.0);
        Color {
            red: (self.red as f32 * b) as u8,
            green: (self.green as f32 * b) as u8,
            blue: (self.blue as f32 * b) as u8,
        }
    }

    /// Channels as a float vector in [0, 255], for blending.
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.red as f32, self.green as f32, self.blue as f32)
    }

    /// Build a color from a float vector in [0, 255], channels clamped.
    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            red: v.x.clamp(0.0, 255.0) as u8,
            green: v.y.clamp(0.0, 255.0) as u8,
            blue: v.z.clamp(0.0, 255.0) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.pack(), 0xFF12_3456);
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let c = Color::new(200, 100, 50);
        assert_eq!(Color::unpack(c.pack()), c);
    }

    #[test]
    fn test_scaled_clamps_brightness() {
        let c = Color::new(100, 100, 100);
        assert_eq!(c.scaled(2.0), c);
        assert_eq!(c.scaled(-1.0), Color::BLACK);
        assert_eq!(c.scaled(0.5), Color::new(50, 50, 50));
    }

    #[test]
    fn test_from_vec3_clamps_channels() {
        let c = Color::from_vec3(Vec3::new(300.0, -5.0, 127.0));
        assert_eq!(c, Color::new(255, 0, 127));
    }
}
