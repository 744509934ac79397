//! Per-frame render state and the mode dispatcher.

use facet_core::{Camera, RenderMode, RenderSettings, Scene};

use crate::cull::{triangle_visibility, update_object_visibility};
use crate::framebuffer::Framebuffer;
use crate::{raster, trace, wire};

/// Everything a single frame needs, assembled once before rendering.
///
/// Construction refreshes object bounds and runs viewport culling, so
/// the visibility snapshot is consistent with the camera for this frame.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub settings: &'a RenderSettings,
    pub width: u32,
    pub height: u32,
    /// Per-triangle visibility, indexed by the stable triangle index.
    pub visible: Vec<bool>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        scene: &'a mut Scene,
        camera: &'a Camera,
        settings: &'a RenderSettings,
        width: u32,
        height: u32,
    ) -> Self {
        scene.refresh_bounds();
        update_object_visibility(scene, camera, width, height);
        let visible = triangle_visibility(scene);
        let culled = visible.iter().filter(|v| !**v).count();
        log::debug!(
            "frame setup: {} triangles, {} culled",
            scene.triangles.len(),
            culled
        );
        Self {
            scene,
            camera,
            settings,
            width,
            height,
            visible,
        }
    }

    pub fn is_visible(&self, triangle_index: usize) -> bool {
        self.visible[triangle_index]
    }
}

/// Render one frame into `fb` using the mode selected in the settings.
pub fn render_frame(ctx: &RenderContext, fb: &mut Framebuffer) {
    fb.clear();
    match ctx.settings.mode {
        RenderMode::Wireframe => wire::render_wireframe(ctx, fb),
        RenderMode::Rasterized => raster::render_rasterized(ctx, fb),
        RenderMode::Raytraced => trace::render_raytraced(ctx, fb),
        RenderMode::RaytracedAa => trace::render_raytraced_aa(ctx, fb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{Color, Light, Material, SurfaceKind, Triangle};
    use facet_math::Vec3;

    #[test]
    fn test_context_snapshots_visibility() {
        let mut scene = Scene::new(
            vec![Triangle::new(
                [
                    Vec3::new(-1.0, -1.0, -4.0),
                    Vec3::new(1.0, -1.0, -4.0),
                    Vec3::new(0.0, 1.0, -4.0),
                ],
                Material::matte(Color::WHITE),
                SurfaceKind::Wall,
            )],
            Light::new(Vec3::new(0.0, 2.0, -2.0)),
        );
        let camera = Camera::new(Vec3::ZERO);
        let settings = RenderSettings::default();

        let ctx = RenderContext::new(&mut scene, &camera, &settings, 320, 240);
        assert_eq!(ctx.visible.len(), 1);
        assert!(ctx.is_visible(0));
    }
}
