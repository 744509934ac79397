//! Scene objects: named triangle groups with bounding boxes.

use facet_math::Aabb;

use crate::material::SurfaceKind;
use crate::triangle::Triangle;

/// A named group of triangles sharing a surface role.
///
/// The bounding box is recomputed from the member triangles once per frame
/// (triangles may have been translated since the last frame); `visible` is
/// the per-frame viewport-culling flag set by the renderer.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub kind: SurfaceKind,
    /// Indices into the scene's triangle list.
    pub triangles: Vec<usize>,
    pub bounds: Aabb,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: SurfaceKind, triangles: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            kind,
            triangles,
            bounds: Aabb::EMPTY,
            visible: true,
        }
    }

    /// Recompute the bounding box from the current member vertices.
    pub fn recompute_bounds(&mut self, all_triangles: &[Triangle]) {
        let mut bounds = Aabb::EMPTY;
        for &i in &self.triangles {
            for v in all_triangles[i].vertices {
                bounds.grow(v);
            }
        }
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::Material;
    use facet_math::Vec3;

    #[test]
    fn test_recompute_bounds() {
        let tris = vec![
            Triangle::new(
                [Vec3::ZERO, Vec3::X, Vec3::Y],
                Material::matte(Color::WHITE),
                SurfaceKind::Wall,
            ),
            Triangle::new(
                [Vec3::splat(2.0), Vec3::new(3.0, 2.0, 2.0), Vec3::new(2.0, 3.0, 2.0)],
                Material::matte(Color::WHITE),
                SurfaceKind::Wall,
            ),
        ];

        let mut obj = SceneObject::new("wall", SurfaceKind::Wall, vec![0, 1]);
        obj.recompute_bounds(&tris);

        assert_eq!(obj.bounds.min, Vec3::ZERO);
        assert_eq!(obj.bounds.max, Vec3::new(3.0, 3.0, 2.0));
    }

    #[test]
    fn test_empty_object_has_empty_bounds() {
        let mut obj = SceneObject::new("empty", SurfaceKind::Floor, vec![]);
        obj.recompute_bounds(&[]);
        assert!(obj.bounds.is_empty());
    }
}
