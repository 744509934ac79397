//! Depth-buffered scanline rasterization.
//!
//! Triangles are split at the middle vertex into a flat-bottom and a
//! flat-top half, and each half is filled row by row with interpolated
//! inverse depth. Texture coordinates travel pre-divided by depth and
//! are restored per pixel, so texturing stays perspective-correct.

use facet_core::{SurfaceKind, Texture};
use facet_math::Vec2;

use crate::context::RenderContext;
use crate::cull::faces_camera;
use crate::framebuffer::{DepthBuffer, Framebuffer, FrameSink};
use crate::project::{project_triangle, CanvasPoint, CanvasTriangle};

fn lerp_point(a: &CanvasPoint, b: &CanvasPoint, t: f32) -> CanvasPoint {
    CanvasPoint {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
        inv_depth: a.inv_depth + (b.inv_depth - a.inv_depth) * t,
        tex: a.tex + (b.tex - a.tex) * t,
    }
}

/// Fill the rows between `top` and `bottom` of a half-triangle whose left
/// and right edges run `edge_a.0 -> edge_a.1` and `edge_b.0 -> edge_b.1`.
fn fill_half<F>(
    edge_a: (&CanvasPoint, &CanvasPoint),
    edge_b: (&CanvasPoint, &CanvasPoint),
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
    shade: &mut F,
) where
    F: FnMut(f32, Vec2) -> u32,
{
    let (y_top, y_bottom) = (edge_a.0.y, edge_a.1.y);
    if y_bottom - y_top < f32::EPSILON {
        // Degenerate (zero-height) half, nothing to fill.
        return;
    }

    let height = fb.height() as i64;
    let width = fb.width() as i64;
    let y_start = (y_top.ceil().max(0.0)) as i64;
    let y_end = (y_bottom.floor().min((height - 1) as f32)) as i64;

    for y in y_start..=y_end {
        let ta = (y as f32 - edge_a.0.y) / (edge_a.1.y - edge_a.0.y);
        let tb = (y as f32 - edge_b.0.y) / (edge_b.1.y - edge_b.0.y);
        let mut left = lerp_point(edge_a.0, edge_a.1, ta);
        let mut right = lerp_point(edge_b.0, edge_b.1, tb);
        if left.x > right.x {
            std::mem::swap(&mut left, &mut right);
        }

        let x_start = (left.x.round().max(0.0)) as i64;
        let x_end = (right.x.round().min((width - 1) as f32)) as i64;
        let span = right.x - left.x;

        for x in x_start..=x_end {
            let t = if span > f32::EPSILON {
                (x as f32 - left.x) / span
            } else {
                0.0
            };
            let inv_depth = left.inv_depth + (right.inv_depth - left.inv_depth) * t;
            if depth.test_and_set(x as u32, y as u32, inv_depth) {
                let tex = left.tex + (right.tex - left.tex) * t;
                fb.set_pixel(x as u32, y as u32, shade(inv_depth, tex));
            }
        }
    }
}

/// Scanline-fill a projected triangle, calling `shade` for each pixel
/// that wins the depth test.
pub fn fill_scanlines<F>(
    tri: &CanvasTriangle,
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
    mut shade: F,
) where
    F: FnMut(f32, Vec2) -> u32,
{
    // Sort the three points top to bottom.
    let mut p = tri.points;
    if p[0].y > p[1].y {
        p.swap(0, 1);
    }
    if p[1].y > p[2].y {
        p.swap(1, 2);
    }
    if p[0].y > p[1].y {
        p.swap(0, 1);
    }

    let long_span = p[2].y - p[0].y;
    if long_span < f32::EPSILON {
        return;
    }

    // Split point on the long edge at the middle vertex's row.
    let split = lerp_point(&p[0], &p[2], (p[1].y - p[0].y) / long_span);

    fill_half((&p[0], &p[1]), (&p[0], &split), depth, fb, &mut shade);
    fill_half((&p[1], &p[2]), (&split, &p[2]), depth, fb, &mut shade);
}

fn fill_flat(tri: &CanvasTriangle, depth: &mut DepthBuffer, fb: &mut Framebuffer) {
    let pixel = tri.color.pack();
    fill_scanlines(tri, depth, fb, |_, _| pixel);
}

fn fill_textured(
    tri: &CanvasTriangle,
    texture: &Texture,
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
) {
    fill_scanlines(tri, depth, fb, |inv_depth, tex| {
        let uv = tex / inv_depth;
        texture.sample_uv(uv.x, uv.y).pack()
    });
}

/// Rasterize every visible triangle into the framebuffer with a fresh
/// depth buffer.
pub fn render_rasterized(ctx: &RenderContext, fb: &mut Framebuffer) {
    let mut depth = DepthBuffer::new(ctx.width, ctx.height);

    for tri in &ctx.scene.triangles {
        if !ctx.is_visible(tri.index) {
            continue;
        }
        if ctx.settings.backface_culling && !faces_camera(tri, ctx.camera.position) {
            continue;
        }
        let Some(canvas) = project_triangle(ctx.camera, ctx.width, ctx.height, tri) else {
            continue;
        };

        let texture = match tri.kind {
            SurfaceKind::Logo => ctx.scene.texture.as_ref(),
            SurfaceKind::Checker => ctx.scene.checker.as_ref(),
            _ => None,
        };
        match texture {
            Some(texture) if canvas.textured => {
                fill_textured(&canvas, texture, &mut depth, fb)
            }
            _ => fill_flat(&canvas, &mut depth, fb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{Camera, Color, Light, Material, RenderSettings, Scene, Triangle};
    use facet_math::{Vec2, Vec3};

    const W: u32 = 64;
    const H: u32 = 64;

    fn canvas_tri(points: [(f32, f32, f32); 3], color: Color) -> CanvasTriangle {
        CanvasTriangle {
            points: points.map(|(x, y, inv_depth)| CanvasPoint {
                x,
                y,
                inv_depth,
                tex: Vec2::ZERO,
            }),
            color,
            textured: false,
        }
    }

    #[test]
    fn test_nearer_triangle_wins_depth_test() {
        let mut fb = Framebuffer::new(W, H);
        let mut depth = DepthBuffer::new(W, H);

        let far = canvas_tri([(8.0, 8.0, 0.1), (56.0, 8.0, 0.1), (32.0, 56.0, 0.1)], Color::new(255, 0, 0));
        let near = canvas_tri([(8.0, 8.0, 0.5), (56.0, 8.0, 0.5), (32.0, 56.0, 0.5)], Color::new(0, 255, 0));

        fill_flat(&far, &mut depth, &mut fb);
        fill_flat(&near, &mut depth, &mut fb);
        assert_eq!(fb.pixel(32, 30), Color::new(0, 255, 0).pack());

        // Order-independent: drawing near first gives the same image.
        let mut fb2 = Framebuffer::new(W, H);
        let mut depth2 = DepthBuffer::new(W, H);
        fill_flat(&near, &mut depth2, &mut fb2);
        fill_flat(&far, &mut depth2, &mut fb2);
        assert_eq!(fb.pixels(), fb2.pixels());
    }

    #[test]
    fn test_zero_height_triangle_fills_nothing() {
        let mut fb = Framebuffer::new(W, H);
        let mut depth = DepthBuffer::new(W, H);
        let flat = canvas_tri([(8.0, 20.0, 0.5), (40.0, 20.0, 0.5), (56.0, 20.0, 0.5)], Color::WHITE);
        let mut calls = 0;
        fill_scanlines(&flat, &mut depth, &mut fb, |_, _| {
            calls += 1;
            0
        });
        // A single row at most; the degenerate halves must not loop.
        assert!(calls <= 57);
    }

    #[test]
    fn test_adjacent_triangles_leave_no_seam() {
        // Two triangles sharing a diagonal edge cover a full square.
        let mut fb = Framebuffer::new(W, H);
        let mut depth = DepthBuffer::new(W, H);
        let a = canvas_tri([(10.0, 10.0, 0.5), (50.0, 10.0, 0.5), (10.0, 50.0, 0.5)], Color::WHITE);
        let b = canvas_tri([(50.0, 10.0, 0.5), (50.0, 50.0, 0.5), (10.0, 50.0, 0.5)], Color::WHITE);
        fill_flat(&a, &mut depth, &mut fb);
        fill_flat(&b, &mut depth, &mut fb);

        // Every interior pixel of the square is covered.
        for y in 12..48 {
            for x in 12..48 {
                assert_eq!(fb.pixel(x, y), Color::WHITE.pack(), "hole at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_textured_fill_matches_direct_sampling() {
        // Constant-depth triangle: interpolated (tex/z, 1/z) must
        // restore the exact barycentric texture coordinate.
        let texture = Texture::from_fn(64, 64, |x, y| Color::new((x * 4) as u8, (y * 4) as u8, 0));
        let inv_depth = 0.5;
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let corners = [(10.0, 10.0), (50.0, 10.0), (10.0, 50.0)];
        let tri = CanvasTriangle {
            points: [0, 1, 2].map(|i| CanvasPoint {
                x: corners[i].0,
                y: corners[i].1,
                inv_depth,
                tex: uvs[i] * inv_depth,
            }),
            color: Color::WHITE,
            textured: true,
        };

        let mut fb = Framebuffer::new(W, H);
        let mut depth = DepthBuffer::new(W, H);
        fill_textured(&tri, &texture, &mut depth, &mut fb);

        // Pixel (26, 22) sits at barycentric uv (0.4, 0.3).
        let expected = texture.sample_uv(0.4, 0.3).pack();
        assert_eq!(fb.pixel(26, 22), expected);
    }

    #[test]
    fn test_render_rasterized_draws_scene_triangle() {
        let mut scene = Scene::new(
            vec![Triangle::new(
                [
                    Vec3::new(-1.0, -1.0, -4.0),
                    Vec3::new(1.0, -1.0, -4.0),
                    Vec3::new(0.0, 1.0, -4.0),
                ],
                Material::matte(Color::new(200, 100, 50)),
                facet_core::SurfaceKind::Wall,
            )],
            Light::new(Vec3::new(0.0, 2.0, -2.0)),
        );
        // Scale the projection down so the triangle fits the small
        // test viewport instead of being culled.
        let mut camera = Camera::new(Vec3::ZERO);
        camera.canvas_scale = 10.0;
        let settings = RenderSettings::default();
        let ctx = RenderContext::new(&mut scene, &camera, &settings, W, H);

        let mut fb = Framebuffer::new(W, H);
        render_rasterized(&ctx, &mut fb);
        assert_eq!(fb.pixel(W / 2, H / 2), Color::new(200, 100, 50).pack());
    }
}
