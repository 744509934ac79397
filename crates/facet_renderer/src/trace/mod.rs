//! Recursive ray tracing: primary rays, reflection, refraction, and
//! per-surface shading with distance-falloff lighting.

pub mod intersect;
pub mod shadow;

use facet_core::{Color, SurfaceKind};
use facet_math::{Ray, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::context::RenderContext;
use crate::framebuffer::Framebuffer;
use crate::project::ray_direction;
use crate::tile::{generate_tiles, Tile};
use crate::trace::intersect::{closest_intersection, Intersection};
use crate::trace::shadow::{in_shadow, penumbra_fraction};

/// Remaining bounces for a primary ray.
pub const MAX_DEPTH: u32 = 5;

/// Brightness floor for every lit surface.
const AMBIENT: f32 = 0.2;

const LIGHT_INTENSITY: f32 = 1.0;

/// Fraction of the full sphere the light radiates over.
const FALLOFF_FRACTION: f32 = 0.5;

/// Brightness of fully shadowed surfaces.
const SHADOW_BRIGHTNESS: f32 = 0.15;

const GLASS_IOR: f32 = 1.5;

const SPECULAR_EXPONENT: i32 = 32;

/// Reflected share of a metallic surface's color.
const METAL_REFLECT_WEIGHT: f32 = 0.3;

/// Jitter half-width applied to metallic reflection directions.
const METAL_ROUGHNESS: f32 = 0.08;

fn reflect(dir: Vec3, normal: Vec3) -> Vec3 {
    dir - 2.0 * dir.dot(normal) * normal
}

/// Exact Fresnel reflectance, averaged over both polarizations.
fn fresnel_reflectance(cos_i: f32, cos_t: f32, eta_i: f32, eta_t: f32) -> f32 {
    let r_s = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    let r_p = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    (r_s * r_s + r_p * r_p) / 2.0
}

/// Point-light brightness with inverse-square falloff, clamped to
/// `[AMBIENT, 1.0]`. Reflective surfaces also get a specular lobe.
fn diffuse_brightness(ctx: &RenderContext, point: Vec3, normal: Vec3, view: Vec3, specular: bool) -> f32 {
    let to_light = ctx.scene.light.position - point;
    let dist_sq = to_light.length_squared();
    let l = to_light / dist_sq.sqrt();

    let incident = LIGHT_INTENSITY * normal.dot(l).max(0.0)
        / (FALLOFF_FRACTION * std::f32::consts::PI * dist_sq);
    let mut brightness = incident.clamp(AMBIENT, 1.0);

    if specular {
        let highlight = reflect(-l, normal).dot(view).max(0.0).powi(SPECULAR_EXPONENT);
        brightness = (brightness + highlight).min(1.0);
    }
    brightness
}

/// Attenuate a brightness by shadow tests. Only called for primary
/// rays; bounce shading skips shadows entirely.
fn apply_shadows(ctx: &RenderContext, brightness: f32, point: Vec3, exclude: Option<usize>) -> f32 {
    if ctx.settings.soft_shadows {
        let penumbra = penumbra_fraction(ctx, point, exclude);
        (brightness * (1.0 - penumbra)).max(SHADOW_BRIGHTNESS)
    } else if ctx.settings.hard_shadows {
        if in_shadow(ctx, point, ctx.scene.light.position, exclude) {
            SHADOW_BRIGHTNESS
        } else {
            brightness
        }
    } else {
        brightness
    }
}

fn shade_glass(ctx: &RenderContext, hit: &Intersection, dir: Vec3, depth: u32) -> Color {
    let tri = hit.triangle;
    let face = tri.face_normal();
    let entering = dir.dot(face) < 0.0;
    let (eta_i, eta_t, normal) = if entering {
        (1.0, GLASS_IOR, face)
    } else {
        (GLASS_IOR, 1.0, -face)
    };

    let reflection = Ray::new(hit.point, reflect(dir, normal));
    let reflected = trace_ray(ctx, &reflection, Some(tri.index), depth - 1);

    let eta = eta_i / eta_t;
    let cos_i = -dir.dot(normal);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        // Total internal reflection.
        return reflected;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let refraction = Ray::new(hit.point, eta * dir + (eta * cos_i - cos_t) * normal);
    let refracted = trace_ray(ctx, &refraction, Some(tri.index), depth - 1);

    let kr = fresnel_reflectance(cos_i, cos_t, eta_i, eta_t);
    Color::from_vec3(reflected.to_vec3() * kr + refracted.to_vec3() * (1.0 - kr))
}

/// Roughness jitter seeded from the hit itself, so identical scenes
/// render identical frames (and metal stays idempotent).
fn metal_rng(hit: &Intersection) -> StdRng {
    let p = hit.point;
    let seed = (p.x.to_bits() as u64)
        ^ ((p.y.to_bits() as u64) << 21)
        ^ ((p.z.to_bits() as u64) << 42)
        ^ (hit.triangle.index as u64);
    StdRng::seed_from_u64(seed)
}

fn shade_metal(ctx: &RenderContext, hit: &Intersection, dir: Vec3, base: Color, depth: u32) -> Color {
    let tri = hit.triangle;
    let mut rng = metal_rng(hit);
    let jitter = Vec3::new(
        rng.gen_range(-METAL_ROUGHNESS..METAL_ROUGHNESS),
        rng.gen_range(-METAL_ROUGHNESS..METAL_ROUGHNESS),
        rng.gen_range(-METAL_ROUGHNESS..METAL_ROUGHNESS),
    );
    let bounce = Ray::new(hit.point, reflect(dir, tri.face_normal()) + jitter);
    let reflected = trace_ray(ctx, &bounce, Some(tri.index), depth - 1);
    Color::from_vec3(
        reflected.to_vec3() * METAL_REFLECT_WEIGHT + base.to_vec3() * (1.0 - METAL_REFLECT_WEIGHT),
    )
}

/// The surface color before lighting: texture sample for textured
/// kinds, material color otherwise.
fn surface_color(ctx: &RenderContext, hit: &Intersection) -> Color {
    let tri = hit.triangle;
    let texture = match tri.kind {
        SurfaceKind::Logo => ctx.scene.texture.as_ref(),
        SurfaceKind::Checker => ctx.scene.checker.as_ref(),
        _ => None,
    };
    match (texture, tri.uv_at(hit.u, hit.v)) {
        (Some(texture), Some(uv)) => texture.sample_uv(uv.x, uv.y),
        _ => tri.material.color,
    }
}

/// The shading normal: bump-mapped for bump walls, interpolated vertex
/// normal for Phong spheres, face normal otherwise.
fn shading_normal(ctx: &RenderContext, hit: &Intersection) -> Vec3 {
    let tri = hit.triangle;
    match tri.kind {
        SurfaceKind::BumpWall => {
            match (ctx.scene.bump_map.as_ref(), tri.uv_at(hit.u, hit.v)) {
                (Some(map), Some(uv)) => map.normal_at(uv.x, uv.y),
                _ => tri.face_normal(),
            }
        }
        SurfaceKind::Sphere if ctx.settings.phong => {
            let [n0, n1, n2] = ctx.scene.vertex_normals[tri.index];
            let w = 1.0 - hit.u - hit.v;
            (n0 * w + n1 * hit.u + n2 * hit.v).normalize()
        }
        _ => tri.face_normal(),
    }
}

fn shade(ctx: &RenderContext, hit: &Intersection, dir: Vec3, depth: u32) -> Color {
    let tri = hit.triangle;
    let mat = tri.material;

    if mat.refractive && ctx.settings.refractions {
        return shade_glass(ctx, hit, dir, depth);
    }
    if mat.reflective && ctx.settings.reflections {
        let mirrored = Ray::new(hit.point, reflect(dir, tri.face_normal()));
        return trace_ray(ctx, &mirrored, Some(tri.index), depth - 1);
    }

    let base = surface_color(ctx, hit);
    if mat.metallic && ctx.settings.metallic {
        return shade_metal(ctx, hit, dir, base, depth);
    }

    let mut brightness = if tri.kind == SurfaceKind::Sphere && ctx.settings.gouraud && !ctx.settings.phong {
        // Gouraud: light each vertex with its averaged normal, then
        // interpolate the brightness across the face.
        let normals = ctx.scene.vertex_normals[tri.index];
        let weights = [1.0 - hit.u - hit.v, hit.u, hit.v];
        tri.vertices
            .iter()
            .zip(normals.iter())
            .zip(weights.iter())
            .map(|((&vertex, &normal), &weight)| {
                weight * diffuse_brightness(ctx, vertex, normal, -dir, mat.reflective)
            })
            .sum()
    } else {
        let normal = shading_normal(ctx, hit);
        diffuse_brightness(ctx, hit.point, normal, -dir, mat.reflective)
    };

    if depth == MAX_DEPTH {
        brightness = apply_shadows(ctx, brightness, hit.point, Some(tri.index));
    }
    base.scaled(brightness)
}

/// Trace one ray to a color. Rays that miss everything, and rays that
/// exhaust their bounce budget, resolve to black.
pub fn trace_ray(ctx: &RenderContext, ray: &Ray, exclude: Option<usize>, depth: u32) -> Color {
    if depth == 0 {
        return Color::BLACK;
    }
    match closest_intersection(ctx, ray, exclude) {
        Some(hit) => shade(ctx, &hit, ray.direction, depth),
        None => Color::BLACK,
    }
}

fn trace_pixel(ctx: &RenderContext, x: f32, y: f32) -> Color {
    let dir = ray_direction(ctx.camera, ctx.width, ctx.height, x, y);
    trace_ray(ctx, &Ray::new(ctx.camera.position, dir), None, MAX_DEPTH)
}

fn blit_tiles(fb: &mut Framebuffer, rendered: Vec<(Tile, Vec<u32>)>) {
    for (tile, pixels) in rendered {
        for (row, span) in pixels.chunks(tile.width as usize).enumerate() {
            fb.write_span(tile.x, tile.y + row as u32, span);
        }
    }
}

/// Ray-trace the frame, one worker per tile.
pub fn render_raytraced(ctx: &RenderContext, fb: &mut Framebuffer) {
    let tiles = generate_tiles(ctx.width, ctx.height);
    log::debug!("tracing {} tiles", tiles.len());

    let rendered: Vec<(Tile, Vec<u32>)> = tiles
        .into_par_iter()
        .map(|tile| {
            let mut pixels = Vec::with_capacity(tile.pixel_count());
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    pixels.push(trace_pixel(ctx, x as f32, y as f32).pack());
                }
            }
            (tile, pixels)
        })
        .collect();

    blit_tiles(fb, rendered);
}

/// Pixel-center plus half-pixel cross offsets, averaged evenly.
const AA_OFFSETS: [(f32, f32); 5] = [
    (0.0, 0.0),
    (-0.5, 0.0),
    (0.5, 0.0),
    (0.0, -0.5),
    (0.0, 0.5),
];

/// Ray-trace the frame with five-sample quincunx anti-aliasing.
pub fn render_raytraced_aa(ctx: &RenderContext, fb: &mut Framebuffer) {
    let tiles = generate_tiles(ctx.width, ctx.height);
    log::debug!("tracing {} tiles with {} samples", tiles.len(), AA_OFFSETS.len());

    let rendered: Vec<(Tile, Vec<u32>)> = tiles
        .into_par_iter()
        .map(|tile| {
            let mut pixels = Vec::with_capacity(tile.pixel_count());
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    let sum: Vec3 = AA_OFFSETS
                        .iter()
                        .map(|&(dx, dy)| {
                            trace_pixel(ctx, x as f32 + dx, y as f32 + dy).to_vec3()
                        })
                        .sum();
                    pixels.push(Color::from_vec3(sum / AA_OFFSETS.len() as f32).pack());
                }
            }
            (tile, pixels)
        })
        .collect();

    blit_tiles(fb, rendered);
}
