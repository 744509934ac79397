//! Triangle geometry.

use facet_math::{Vec2, Vec3};

use crate::material::{Material, SurfaceKind};

/// A scene triangle: three vertices, a material, a surface role, and
/// optional per-vertex texture coordinates.
///
/// `index` is the triangle's stable position in the scene's triangle list,
/// assigned once at [`Scene::finalize`](crate::Scene) time. The renderer
/// indexes its per-triangle visibility vector with it, and the ray tracer
/// uses it to exclude the just-hit triangle from shadow and bounce rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub material: Material,
    pub kind: SurfaceKind,
    /// `None` means "unset": the rasterizer falls back to flat fill and the
    /// ray tracer to the material color.
    pub uvs: Option<[Vec2; 3]>,
    pub index: usize,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], material: Material, kind: SurfaceKind) -> Self {
        Self {
            vertices,
            material,
            kind,
            uvs: None,
            index: 0,
        }
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: [Vec2; 3]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// The two edge vectors from vertex 0.
    #[inline]
    pub fn edges(&self) -> (Vec3, Vec3) {
        (
            self.vertices[1] - self.vertices[0],
            self.vertices[2] - self.vertices[0],
        )
    }

    /// Unit face normal (cross product of the two edges).
    ///
    /// Zero for degenerate triangles; callers treat such triangles as
    /// unlit rather than propagating NaN.
    pub fn face_normal(&self) -> Vec3 {
        let (e0, e1) = self.edges();
        e0.cross(e1).normalize_or_zero()
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// The surface point at barycentric coordinates (u, v):
    /// `v0 + u*e0 + v*e1`. The weight of vertex 0 is `1 - u - v`.
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        let (e0, e1) = self.edges();
        self.vertices[0] + u * e0 + v * e1
    }

    /// Interpolate the texture coordinates at barycentric (u, v), if set.
    pub fn uv_at(&self, u: f32, v: f32) -> Option<Vec2> {
        self.uvs
            .map(|uvs| (1.0 - u - v) * uvs[0] + u * uvs[1] + v * uvs[2])
    }

    /// Rigid translation of all three vertices.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }
}
