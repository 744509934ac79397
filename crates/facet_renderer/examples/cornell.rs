//! Renders a Cornell-style box through all four pipelines and writes
//! one PNG per mode.
//!
//! ```sh
//! cargo run --release --example cornell
//! ```

use anyhow::Result;
use facet_core::{
    Camera, Color, Light, Material, RenderMode, RenderSettings, Scene, SurfaceKind, Texture,
    Triangle,
};
use facet_math::{Vec2, Vec3};
use facet_renderer::{render_frame, Framebuffer, RenderContext};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Two triangles spanning the quad `a-b-c-d` (counter-clockwise).
fn quad(
    a: Vec3,
    b: Vec3,
    c: Vec3,
    d: Vec3,
    material: Material,
    kind: SurfaceKind,
) -> Vec<Triangle> {
    vec![
        Triangle::new([a, b, c], material, kind).with_uvs([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ]),
        Triangle::new([a, c, d], material, kind).with_uvs([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]),
    ]
}

/// A latitude/longitude sphere, triangulated.
fn sphere(center: Vec3, radius: f32, bands: u32, material: Material) -> Vec<Triangle> {
    use std::f32::consts::PI;

    let point = |lat: u32, lon: u32| {
        let theta = lat as f32 / bands as f32 * PI;
        let phi = lon as f32 / bands as f32 * 2.0 * PI;
        center
            + radius
                * Vec3::new(
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                )
    };

    let mut triangles = Vec::new();
    for lat in 0..bands {
        for lon in 0..bands {
            let (p00, p01) = (point(lat, lon), point(lat, lon + 1));
            let (p10, p11) = (point(lat + 1, lon), point(lat + 1, lon + 1));
            if lat > 0 {
                triangles.push(Triangle::new([p00, p01, p11], material, SurfaceKind::Sphere));
            }
            if lat + 1 < bands {
                triangles.push(Triangle::new([p00, p11, p10], material, SurfaceKind::Sphere));
            }
        }
    }
    triangles
}

fn checkerboard() -> Texture {
    Texture::from_fn(128, 128, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Color::new(230, 230, 230)
        } else {
            Color::new(40, 40, 40)
        }
    })
}

fn build_scene() -> Scene {
    let white = Material::matte(Color::new(220, 220, 220));
    let red = Material::matte(Color::new(200, 40, 40));
    let green = Material::matte(Color::new(40, 200, 40));

    let (l, r) = (-2.0, 2.0);
    let (floor, ceil) = (-1.5, 1.5);
    let (front, back) = (0.0, -5.0);

    let mut triangles = Vec::new();
    // Back wall
    triangles.extend(quad(
        Vec3::new(l, floor, back),
        Vec3::new(r, floor, back),
        Vec3::new(r, ceil, back),
        Vec3::new(l, ceil, back),
        white,
        SurfaceKind::Wall,
    ));
    // Side walls
    triangles.extend(quad(
        Vec3::new(l, floor, front),
        Vec3::new(l, floor, back),
        Vec3::new(l, ceil, back),
        Vec3::new(l, ceil, front),
        red,
        SurfaceKind::Wall,
    ));
    triangles.extend(quad(
        Vec3::new(r, floor, back),
        Vec3::new(r, floor, front),
        Vec3::new(r, ceil, front),
        Vec3::new(r, ceil, back),
        green,
        SurfaceKind::Wall,
    ));
    // Ceiling
    triangles.extend(quad(
        Vec3::new(l, ceil, back),
        Vec3::new(r, ceil, back),
        Vec3::new(r, ceil, front),
        Vec3::new(l, ceil, front),
        white,
        SurfaceKind::Wall,
    ));
    // Checkered floor
    triangles.extend(quad(
        Vec3::new(l, floor, front),
        Vec3::new(r, floor, front),
        Vec3::new(r, floor, back),
        Vec3::new(l, floor, back),
        white,
        SurfaceKind::Checker,
    ));
    // Mirror panel on the left wall
    triangles.extend(quad(
        Vec3::new(l + 0.01, -0.8, -4.2),
        Vec3::new(l + 0.01, -0.8, -2.2),
        Vec3::new(l + 0.01, 0.8, -2.2),
        Vec3::new(l + 0.01, 0.8, -4.2),
        Material::matte(Color::new(240, 240, 240)).reflective(),
        SurfaceKind::Wall,
    ));
    // Shaded and glass spheres
    triangles.extend(sphere(
        Vec3::new(-0.8, -0.9, -3.5),
        0.6,
        16,
        Material::matte(Color::new(70, 110, 230)),
    ));
    triangles.extend(sphere(
        Vec3::new(0.9, -0.95, -2.6),
        0.55,
        16,
        Material::matte(Color::WHITE).refractive(),
    ));

    Scene::new(triangles, Light::new(Vec3::new(0.0, 1.2, -2.5))).with_checker(checkerboard())
}

fn main() -> Result<()> {
    env_logger::init();

    let camera = Camera::new(Vec3::new(0.0, 0.0, 1.5));
    let modes = [
        (RenderMode::Wireframe, "cornell_wireframe.png"),
        (RenderMode::Rasterized, "cornell_rasterized.png"),
        (RenderMode::Raytraced, "cornell_raytraced.png"),
        (RenderMode::RaytracedAa, "cornell_raytraced_aa.png"),
    ];

    for (mode, path) in modes {
        let settings = RenderSettings {
            mode,
            hard_shadows: false,
            soft_shadows: true,
            gouraud: false,
            phong: true,
            reflections: true,
            refractions: true,
            metallic: true,
            backface_culling: false,
            wu_lines: true,
        };

        let mut scene = build_scene();
        let ctx = RenderContext::new(&mut scene, &camera, &settings, WIDTH, HEIGHT);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);

        let start = std::time::Instant::now();
        render_frame(&ctx, &mut fb);
        log::info!("{mode:?} rendered in {:.2?}", start.elapsed());

        fb.save_png(path)?;
        println!("wrote {path}");
    }

    Ok(())
}
