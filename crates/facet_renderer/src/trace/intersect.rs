//! Ray-triangle intersection via the linear-system formulation.
//!
//! The hit point is written `origin + t*dir = v0 + u*e0 + v*e1`, which
//! rearranges to a 3x3 solve for `(t, u, v)`.

use facet_core::Triangle;
use facet_math::{Mat3, Ray, Vec3};

use crate::context::RenderContext;
use crate::cull::faces_ray;

/// Hits closer than this are rejected, so a bounced ray does not
/// re-hit the surface it just left.
pub const T_MIN: f32 = 1e-4;

/// Determinants below this mean the ray is parallel to the triangle
/// plane (or the triangle is degenerate).
const DET_EPSILON: f32 = 1e-8;

/// A ray-triangle hit, carrying the barycentric solution.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub point: Vec3,
    pub t: f32,
    pub triangle: &'a Triangle,
    pub u: f32,
    pub v: f32,
}

/// Solve for the intersection of one ray with one triangle.
pub fn intersect_triangle(tri: &Triangle, ray: &Ray) -> Option<(f32, f32, f32)> {
    let (e0, e1) = tri.edges();
    let m = Mat3::from_cols(-ray.direction, e0, e1);
    if m.determinant().abs() < DET_EPSILON {
        return None;
    }
    let tuv = m.inverse() * (ray.origin - tri.vertices[0]);
    let (t, u, v) = (tuv.x, tuv.y, tuv.z);
    if t > T_MIN && u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
        Some((t, u, v))
    } else {
        None
    }
}

/// Find the nearest visible triangle along a ray.
///
/// `exclude` skips the triangle a secondary ray departed from.
/// Culled triangles are skipped unless they are refractive; glass can
/// bend rays toward geometry outside the viewport.
pub fn closest_intersection<'a>(
    ctx: &'a RenderContext,
    ray: &Ray,
    exclude: Option<usize>,
) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;

    for tri in &ctx.scene.triangles {
        if Some(tri.index) == exclude {
            continue;
        }
        if !ctx.is_visible(tri.index) && !tri.material.refractive {
            continue;
        }
        // Glass is exempt from backface culling; rays leaving a glass
        // volume exit through its far side.
        if ctx.settings.backface_culling
            && !tri.material.refractive
            && !faces_ray(tri, ray.direction)
        {
            continue;
        }
        if let Some((t, u, v)) = intersect_triangle(tri, ray) {
            if closest.map_or(true, |c| t < c.t) {
                closest = Some(Intersection {
                    point: ray.at(t),
                    t,
                    triangle: tri,
                    u,
                    v,
                });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{Camera, Color, Light, Material, RenderSettings, Scene, SurfaceKind};

    fn unit_tri(z: f32) -> Triangle {
        Triangle::new(
            [
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(0.0, 1.0, z),
            ],
            Material::matte(Color::WHITE),
            SurfaceKind::Wall,
        )
    }

    #[test]
    fn test_ray_hits_facing_triangle() {
        let tri = unit_tri(-3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let (t, u, v) = intersect_triangle(&tri, &ray).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0);
    }

    #[test]
    fn test_ray_misses_outside_triangle() {
        let tri = unit_tri(-3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(5.0, 0.0, -1.0));
        assert!(intersect_triangle(&tri, &ray).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = unit_tri(-3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_triangle(&tri, &ray).is_none());
    }

    #[test]
    fn test_behind_origin_is_rejected() {
        let tri = unit_tri(3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_triangle(&tri, &ray).is_none());
    }

    #[test]
    fn test_closest_of_two_wins_and_exclusion_skips() {
        let mut scene = Scene::new(
            vec![unit_tri(-2.0), unit_tri(-5.0)],
            Light::new(Vec3::new(0.0, 2.0, 0.0)),
        );
        let camera = Camera::new(Vec3::ZERO);
        let settings = RenderSettings::default();
        let ctx = RenderContext::new(&mut scene, &camera, &settings, 320, 240);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = closest_intersection(&ctx, &ray, None).unwrap();
        assert_eq!(hit.triangle.index, 0);

        let behind = closest_intersection(&ctx, &ray, Some(0)).unwrap();
        assert_eq!(behind.triangle.index, 1);
        assert!((behind.t - 5.0).abs() < 1e-4);
    }
}
