//! Wireframe rendering: depth-tested edge drawing with an optional
//! Wu-style anti-aliased variant.

use facet_core::Color;

use crate::context::RenderContext;
use crate::cull::faces_camera;
use crate::framebuffer::{DepthBuffer, Framebuffer, FrameSink};
use crate::project::{project_triangle, CanvasPoint};

/// Draw a straight line between two canvas points, stepping one pixel at
/// a time along the longer axis and depth-testing each sample.
pub fn draw_line(
    from: &CanvasPoint,
    to: &CanvasPoint,
    color: Color,
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
    let packed = color.pack();

    for i in 0..=steps as u32 {
        let t = i as f32 / steps;
        let x = (from.x + dx * t).round();
        let y = (from.y + dy * t).round();
        if x < 0.0 || y < 0.0 || x >= fb.width() as f32 || y >= fb.height() as f32 {
            continue;
        }
        let inv_depth = from.inv_depth + (to.inv_depth - from.inv_depth) * t;
        if depth.test_and_set(x as u32, y as u32, inv_depth) {
            fb.set_pixel(x as u32, y as u32, packed);
        }
    }
}

fn fpart(x: f32) -> f32 {
    x - x.floor()
}

fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

fn plot_aa(
    x: i64,
    y: i64,
    coverage: f32,
    color: Color,
    inv_depth: f32,
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
) {
    if x < 0 || y < 0 || x >= fb.width() as i64 || y >= fb.height() as i64 {
        return;
    }
    if depth.test_and_set(x as u32, y as u32, inv_depth) {
        fb.set_pixel(x as u32, y as u32, color.scaled(coverage).pack());
    }
}

/// Draw an anti-aliased line using Wu's algorithm: each step covers the
/// two pixels straddling the ideal line, weighted by the fractional
/// distance.
pub fn draw_aa_line(
    from: &CanvasPoint,
    to: &CanvasPoint,
    color: Color,
    depth: &mut DepthBuffer,
    fb: &mut Framebuffer,
) {
    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();

    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);
    let (mut d0, mut d1) = (from.inv_depth, to.inv_depth);
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
        std::mem::swap(&mut d0, &mut d1);
    }

    let dx = x1 - x0;
    let gradient = if dx.abs() < f32::EPSILON {
        1.0
    } else {
        (y1 - y0) / dx
    };

    let x_start = x0.round() as i64;
    let x_end = x1.round() as i64;
    let mut intery = y0 + (x_start as f32 - x0) * gradient;

    for x in x_start..=x_end {
        let t = if x_end > x_start {
            (x - x_start) as f32 / (x_end - x_start) as f32
        } else {
            0.0
        };
        let inv_depth = d0 + (d1 - d0) * t;
        let yf = intery.floor() as i64;
        if steep {
            plot_aa(yf, x, rfpart(intery), color, inv_depth, depth, fb);
            plot_aa(yf + 1, x, fpart(intery), color, inv_depth, depth, fb);
        } else {
            plot_aa(x, yf, rfpart(intery), color, inv_depth, depth, fb);
            plot_aa(x, yf + 1, fpart(intery), color, inv_depth, depth, fb);
        }
        intery += gradient;
    }
}

/// Draw the three edges of every visible triangle.
pub fn render_wireframe(ctx: &RenderContext, fb: &mut Framebuffer) {
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

        let p = &canvas.points;
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            if ctx.settings.wu_lines {
                draw_aa_line(&p[a], &p[b], canvas.color, &mut depth, fb);
            } else {
                draw_line(&p[a], &p[b], canvas.color, &mut depth, fb);
            }
        }
    }
}
