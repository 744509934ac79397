//! The scene: triangles, object groups, light, and texture images.

use std::collections::HashMap;

use facet_math::Vec3;
use log::info;

use crate::light::Light;
use crate::material::SurfaceKind;
use crate::object::SceneObject;
use crate::texture::Texture;
use crate::triangle::Triangle;

/// A complete static scene shared by both render pipelines.
///
/// Built once from a loaded triangle list via [`Scene::new`], which
/// finalizes the triangles (stable indices), groups them into objects by
/// surface role, and precomputes averaged per-vertex normals for smooth
/// shading. Geometry only changes afterwards through rigid translation;
/// object bounds are refreshed once per frame by the renderer.
pub struct Scene {
    pub triangles: Vec<Triangle>,
    pub objects: Vec<SceneObject>,
    pub light: Light,
    /// Diffuse image for `Logo` surfaces.
    pub texture: Option<Texture>,
    /// Diffuse image for `Checker` surfaces.
    pub checker: Option<Texture>,
    /// Normal map for `BumpWall` surfaces.
    pub bump_map: Option<Texture>,
    /// Averaged normal at each triangle corner, parallel to `triangles`.
    pub vertex_normals: Vec<[Vec3; 3]>,
}

impl Scene {
    pub fn new(triangles: Vec<Triangle>, light: Light) -> Self {
        let mut scene = Self {
            triangles,
            objects: Vec::new(),
            light,
            texture: None,
            checker: None,
            bump_map: None,
            vertex_normals: Vec::new(),
        };
        scene.finalize();
        scene
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_checker(mut self, checker: Texture) -> Self {
        self.checker = Some(checker);
        self
    }

    pub fn with_bump_map(mut self, bump_map: Texture) -> Self {
        self.bump_map = Some(bump_map);
        self
    }

    /// Assign stable triangle indices, group triangles into objects, and
    /// compute per-vertex normals and initial object bounds.
    fn finalize(&mut self) {
        for (i, tri) in self.triangles.iter_mut().enumerate() {
            tri.index = i;
        }

        // Group by surface role, preserving first-seen order.
        let mut order: Vec<SurfaceKind> = Vec::new();
        let mut groups: HashMap<SurfaceKind, Vec<usize>> = HashMap::new();
        for tri in &self.triangles {
            let entry = groups.entry(tri.kind).or_insert_with(|| {
                order.push(tri.kind);
                Vec::new()
            });
            entry.push(tri.index);
        }
        self.objects = order
            .into_iter()
            .map(|kind| {
                let mut obj =
                    SceneObject::new(kind.name(), kind, groups.remove(&kind).unwrap_or_default());
                obj.recompute_bounds(&self.triangles);
                obj
            })
            .collect();

        self.vertex_normals = compute_vertex_normals(&self.triangles);

        info!(
            "scene finalized: {} triangles in {} objects",
            self.triangles.len(),
            self.objects.len()
        );
    }

    /// Recompute every object's bounding box from the current vertices.
    /// Called once per frame, before visibility culling.
    pub fn refresh_bounds(&mut self) {
        let triangles = &self.triangles;
        for obj in &mut self.objects {
            obj.recompute_bounds(triangles);
        }
    }

    /// Rigidly translate all triangles of the given surface role.
    /// Vertex normals are unchanged by translation; bounds are refreshed
    /// at the start of the next frame.
    pub fn translate_kind(&mut self, kind: SurfaceKind, offset: Vec3) {
        for tri in &mut self.triangles {
            if tri.kind == kind {
                tri.translate(offset);
            }
        }
    }

}

/// Average the face normals of all triangles sharing each vertex position.
///
/// Sharing is exact position equality, matching how mesh loaders duplicate
/// vertices per face; a position key on the float bit patterns keeps the
/// pass linear in the triangle count.
fn compute_vertex_normals(triangles: &[Triangle]) -> Vec<[Vec3; 3]> {
    let key = |v: Vec3| -> [u32; 3] { [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()] };

    let mut sums: HashMap<[u32; 3], Vec3> = HashMap::new();
    for tri in triangles {
        let n = tri.face_normal();
        for v in tri.vertices {
            *sums.entry(key(v)).or_insert(Vec3::ZERO) += n;
        }
    }

    triangles
        .iter()
        .map(|tri| {
            let face = tri.face_normal();
            tri.vertices.map(|v| {
                let avg = sums[&key(v)];
                if avg.length_squared() < 1e-12 {
                    face
                } else {
                    avg.normalize()
                }
            })
        })
        .collect()
}
