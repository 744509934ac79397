//! Pinhole projection between world space and the canvas.
//!
//! Projection produces a canvas coordinate plus the reciprocal camera-space
//! depth used for depth testing and perspective-correct interpolation; ray
//! generation is the inverse mapping.

use facet_core::{Camera, Color, Triangle};
use facet_math::{Vec2, Vec3};

/// A camera-space z this close to the focal plane is treated as degenerate
/// and the vertex is skipped instead of dividing by zero.
const MIN_DEPTH: f32 = 1e-6;

/// A projected vertex on the canvas.
///
/// `tex` is the vertex texture coordinate already divided by camera-space
/// depth, so scanline interpolation of (`tex`, `inv_depth`) followed by one
/// division recovers the perspective-correct coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
    /// Reciprocal camera-space depth (1/-z). Larger = nearer.
    pub inv_depth: f32,
    pub tex: Vec2,
}

/// A projected triangle ready for scan conversion.
#[derive(Debug, Copy, Clone)]
pub struct CanvasTriangle {
    pub points: [CanvasPoint; 3],
    pub color: Color,
    /// True if the source triangle carried texture coordinates.
    pub textured: bool,
}

/// Project a world point onto the canvas.
///
/// Returns `None` when the point is on or behind the camera plane
/// (camera-space z >= 0), where the pinhole division is undefined.
pub fn project_point(camera: &Camera, width: u32, height: u32, world: Vec3) -> Option<CanvasPoint> {
    let cam = camera.to_camera_space(world);
    if cam.z >= -MIN_DEPTH {
        return None;
    }
    let inv_depth = 1.0 / -cam.z;
    let screen_factor = camera.focal_length * inv_depth * camera.canvas_scale;
    Some(CanvasPoint {
        x: cam.x * screen_factor + width as f32 / 2.0,
        y: -cam.y * screen_factor + height as f32 / 2.0,
        inv_depth,
        tex: Vec2::ZERO,
    })
}

/// Project a triangle onto the canvas, carrying depth-divided texture
/// coordinates. Returns `None` if any vertex is degenerate.
pub fn project_triangle(
    camera: &Camera,
    width: u32,
    height: u32,
    tri: &Triangle,
) -> Option<CanvasTriangle> {
    let mut points = [CanvasPoint {
        x: 0.0,
        y: 0.0,
        inv_depth: 0.0,
        tex: Vec2::ZERO,
    }; 3];

    for (i, &v) in tri.vertices.iter().enumerate() {
        let mut p = project_point(camera, width, height, v)?;
        if let Some(uvs) = tri.uvs {
            p.tex = uvs[i] * p.inv_depth;
        }
        points[i] = p;
    }

    Some(CanvasTriangle {
        points,
        color: tri.material.color,
        textured: tri.uvs.is_some(),
    })
}

/// The world-space direction of the primary ray through canvas position
/// (x, y). Inverse of [`project_point`].
pub fn ray_direction(camera: &Camera, width: u32, height: u32, x: f32, y: f32) -> Vec3 {
    let cam_dir = Vec3::new(
        (x - width as f32 / 2.0) / camera.canvas_scale,
        -(y - height as f32 / 2.0) / camera.canvas_scale,
        -camera.focal_length,
    );
    camera.to_world_direction(cam_dir).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 640;
    const H: u32 = 480;

    #[test]
    fn test_center_point_projects_to_canvas_center() {
        let cam = Camera::new(Vec3::ZERO);
        let p = project_point(&cam, W, H, Vec3::new(0.0, 0.0, -3.0)).unwrap();
        assert!((p.x - 320.0).abs() < 1e-4);
        assert!((p.y - 240.0).abs() < 1e-4);
        assert!((p.inv_depth - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let cam = Camera::new(Vec3::ZERO);
        assert!(project_point(&cam, W, H, Vec3::new(0.0, 0.0, 2.0)).is_none());
        assert!(project_point(&cam, W, H, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_nearer_point_has_larger_inv_depth() {
        let cam = Camera::new(Vec3::ZERO);
        let near = project_point(&cam, W, H, Vec3::new(0.0, 0.0, -2.0)).unwrap();
        let far = project_point(&cam, W, H, Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert!(near.inv_depth > far.inv_depth);
    }

    #[test]
    fn test_screen_y_flips_world_y() {
        let cam = Camera::new(Vec3::ZERO);
        let up = project_point(&cam, W, H, Vec3::new(0.0, 1.0, -3.0)).unwrap();
        assert!(up.y < 240.0);
    }

    #[test]
    fn test_ray_direction_inverts_projection() {
        let mut cam = Camera::new(Vec3::new(0.5, -0.2, 1.0));
        cam.rotate_y(15.0);
        cam.rotate_x(-7.0);

        let world = Vec3::new(0.3, 0.4, -2.5);
        let p = project_point(&cam, W, H, world).unwrap();
        let dir = ray_direction(&cam, W, H, p.x, p.y);

        let expected = (world - cam.position).normalize();
        assert!((dir - expected).length() < 1e-4);
    }
}
