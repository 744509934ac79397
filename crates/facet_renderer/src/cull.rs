//! Visibility culling: per-object viewport tests and backface tests.

use facet_core::{Camera, Scene, Triangle};
use facet_math::Vec3;

use crate::project::project_point;

/// Mark each object visible if any corner of its bounding box projects
/// inside the viewport. Bounds must already be refreshed for this frame.
pub fn update_object_visibility(scene: &mut Scene, camera: &Camera, width: u32, height: u32) {
    for obj in &mut scene.objects {
        if obj.bounds.is_empty() {
            obj.visible = false;
            continue;
        }
        obj.visible = obj.bounds.corners().iter().any(|&corner| {
            match project_point(camera, width, height, corner) {
                Some(p) => {
                    p.x >= 0.0 && p.x < width as f32 && p.y >= 0.0 && p.y < height as f32
                }
                None => false,
            }
        });
    }
}

/// Flatten object visibility into a per-triangle vector indexed by the
/// stable triangle index.
pub fn triangle_visibility(scene: &Scene) -> Vec<bool> {
    let mut visible = vec![false; scene.triangles.len()];
    for obj in &scene.objects {
        for &i in &obj.triangles {
            visible[i] = obj.visible;
        }
    }
    visible
}

/// True if the triangle's front side faces the camera position.
///
/// Used by backface culling: the face normal must make a positive angle
/// with the centroid-to-camera vector.
pub fn faces_camera(tri: &Triangle, camera_pos: Vec3) -> bool {
    tri.face_normal().dot(camera_pos - tri.centroid()) > 0.0
}

/// True if the triangle's front side faces against the ray direction
/// (ray-tracer backface test, applied before the intersection solve).
pub fn faces_ray(tri: &Triangle, ray_dir: Vec3) -> bool {
    tri.face_normal().dot(ray_dir) < 0.0
}
