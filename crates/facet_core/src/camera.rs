//! Pinhole camera: position, orientation, and projection constants.

use facet_math::{Mat3, Vec3};

/// Default focal length of the pinhole projection, in world units.
pub const DEFAULT_FOCAL_LENGTH: f32 = 3.0;

/// Default canvas scale: world units at the focal plane to pixels.
pub const DEFAULT_CANVAS_SCALE: f32 = 150.0;

/// A pinhole camera.
///
/// The orientation matrix maps world space to camera space; it is the
/// identity at reset. In camera space the camera looks along -Z, so points
/// in front of it have negative z. Mutated between frames by input or
/// animation; read-only during a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Mat3,
    pub focal_length: f32,
    pub canvas_scale: f32,
    home: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Mat3::IDENTITY,
            focal_length: DEFAULT_FOCAL_LENGTH,
            canvas_scale: DEFAULT_CANVAS_SCALE,
            home: position,
        }
    }

    /// Transform a world point into camera space.
    #[inline]
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        self.orientation * (world - self.position)
    }

    /// Transform a camera-space direction back into world space.
    ///
    /// The orientation is a pure rotation, so the inverse is the transpose.
    #[inline]
    pub fn to_world_direction(&self, camera_dir: Vec3) -> Vec3 {
        self.orientation.transpose() * camera_dir
    }

    /// Translate the camera position.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Tilt: rotate the orientation about the camera x axis.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.orientation = Mat3::from_rotation_x(degrees.to_radians()) * self.orientation;
    }

    /// Pan: rotate the orientation about the camera y axis.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.orientation = Mat3::from_rotation_y(degrees.to_radians()) * self.orientation;
    }

    /// Roll: rotate the orientation about the camera z axis.
    pub fn rotate_z(&mut self, degrees: f32) {
        self.orientation = Mat3::from_rotation_z(degrees.to_radians()) * self.orientation;
    }

    /// Point the camera at a world-space target, keeping +Y as up.
    pub fn look_at(&mut self, target: Vec3) {
        // Camera-space +z points backward (the camera looks along -z).
        let w = (self.position - target).normalize_or_zero();
        if w == Vec3::ZERO {
            return;
        }
        let mut u = Vec3::Y.cross(w);
        if u.length_squared() < 1e-12 {
            // Looking straight up or down; pick an arbitrary right vector.
            u = Vec3::X;
        }
        let u = u.normalize();
        let v = w.cross(u);
        // Columns are the camera basis in world space; world->camera is the
        // transpose.
        self.orientation = Mat3::from_cols(u, v, w).transpose();
    }

    /// Orbit the camera position about the world y axis through the origin.
    pub fn orbit(&mut self, degrees: f32) {
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let p = self.position;
        self.position = Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos);
    }

    /// Return to the home position with identity orientation.
    pub fn reset(&mut self) {
        self.position = self.home;
        self.orientation = Mat3::IDENTITY;
    }
}
