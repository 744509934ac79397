//! Point light with a fixed area-light approximation for soft shadows.

use facet_math::Vec3;

/// Number of sample positions in the soft-shadow cluster.
pub const SOFT_SHADOW_SAMPLES: usize = 13;

/// Spacing between neighbouring cluster positions along the x axis.
const SAMPLE_SPACING: f32 = 0.02;

/// A point light.
///
/// Hard shadows test against `position` alone; soft shadows test against a
/// fixed cluster of 13 positions spread along the x axis around it, a small
/// jittered-area-light approximation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
}

impl Light {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// The soft-shadow sample cluster: 13 positions offset along x by
    /// -0.12..=0.12 in 0.02 steps, the primary position in the middle.
    pub fn samples(&self) -> [Vec3; SOFT_SHADOW_SAMPLES] {
        let mut out = [self.position; SOFT_SHADOW_SAMPLES];
        let half = (SOFT_SHADOW_SAMPLES as i32 - 1) / 2;
        for (i, p) in out.iter_mut().enumerate() {
            p.x += (i as i32 - half) as f32 * SAMPLE_SPACING;
        }
        out
    }
}
