//! Material flags and surface roles.

use crate::color::Color;

/// The role a triangle plays in the scene.
///
/// A closed enum instead of free-form tag strings: the ray tracer's shading
/// dispatch and the scene's object grouping both branch on this.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Plain diffuse box wall.
    Wall,
    /// Plain diffuse floor.
    Floor,
    /// Image-textured surface (perspective-correct lookup).
    Logo,
    /// Checker-textured floor.
    Checker,
    /// Sphere surface; eligible for Gouraud/Phong smooth shading.
    Sphere,
    /// Bump-mapped wall; lighting normal comes from a normal-map image.
    BumpWall,
}

impl SurfaceKind {
    /// Display name used for object grouping.
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::Wall => "wall",
            SurfaceKind::Floor => "floor",
            SurfaceKind::Logo => "logo",
            SurfaceKind::Checker => "checker",
            SurfaceKind::Sphere => "sphere",
            SurfaceKind::BumpWall => "bump-wall",
        }
    }
}

/// Surface material: base color plus behavior flags.
///
/// The flags select the recursive shading branches (mirror, glass, rough
/// metal); a material with none set is shaded diffuse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Material {
    pub color: Color,
    pub reflective: bool,
    pub refractive: bool,
    pub metallic: bool,
}

impl Material {
    /// A plain diffuse material.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            reflective: false,
            refractive: false,
            metallic: false,
        }
    }

    /// Mark the material as a mirror.
    pub fn reflective(mut self) -> Self {
        self.reflective = true;
        self
    }

    /// Mark the material as glass.
    pub fn refractive(mut self) -> Self {
        self.refractive = true;
        self
    }

    /// Mark the material as rough metal.
    pub fn metallic(mut self) -> Self {
        self.metallic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matte_has_no_flags() {
        let m = Material::matte(Color::WHITE);
        assert!(!m.reflective && !m.refractive && !m.metallic);
    }

    #[test]
    fn test_flag_builders() {
        let m = Material::matte(Color::WHITE).reflective().metallic();
        assert!(m.reflective);
        assert!(m.metallic);
        assert!(!m.refractive);
    }
}
