//! Shadow rays: hard occlusion tests and multi-sample penumbra
//! estimation along a small linear light cluster.

use facet_math::{Ray, Vec3};

use crate::context::RenderContext;
use crate::trace::intersect::{intersect_triangle, T_MIN};

/// Occluders closer to the light than this margin do not cast a
/// shadow, which stops a surface from shadowing itself near the light.
pub const SHADOW_MARGIN: f32 = 0.1;

/// True if any triangle blocks the segment from `point` to `light_pos`.
///
/// `exclude` skips the triangle being shaded.
pub fn in_shadow(
    ctx: &RenderContext,
    point: Vec3,
    light_pos: Vec3,
    exclude: Option<usize>,
) -> bool {
    let to_light = light_pos - point;
    let distance = to_light.length();
    if distance < f32::EPSILON {
        return false;
    }
    let ray = Ray::new(point, to_light);

    for tri in &ctx.scene.triangles {
        if Some(tri.index) == exclude {
            continue;
        }
        if let Some((t, _, _)) = intersect_triangle(tri, &ray) {
            if t > T_MIN && t < distance - SHADOW_MARGIN {
                return true;
            }
        }
    }
    false
}

/// Fraction of the light's sample cluster occluded from `point`,
/// in `[0, 1]`. Zero means fully lit, one means umbra.
pub fn penumbra_fraction(ctx: &RenderContext, point: Vec3, exclude: Option<usize>) -> f32 {
    let samples = ctx.scene.light.samples();
    let shadowed = samples
        .iter()
        .filter(|&&sample| in_shadow(ctx, point, sample, exclude))
        .count();
    shadowed as f32 / samples.len() as f32
}
