//! CPU rendering pipelines over a shared scene and camera model.
//!
//! Three pipelines share one projection model: a depth-tested wireframe
//! pass, a scanline rasterizer, and a recursive ray tracer. A frame is
//! rendered by building a [`RenderContext`] for the current scene and
//! camera, then calling [`render_frame`].

pub mod context;
pub mod cull;
pub mod framebuffer;
pub mod project;
pub mod raster;
pub mod tile;
pub mod trace;
pub mod wire;

pub use context::{render_frame, RenderContext};
pub use framebuffer::{DepthBuffer, Framebuffer, FrameSink};
pub use project::{project_point, project_triangle, ray_direction, CanvasPoint, CanvasTriangle};
pub use tile::{generate_tiles, Tile, TILE_SIZE};
pub use trace::{trace_ray, MAX_DEPTH};
