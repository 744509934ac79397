//! Facet Core - shared scene and camera model for both render pipelines.
//!
//! This crate provides:
//!
//! - **Geometry**: [`Triangle`], [`SceneObject`] grouping with bounding
//!   boxes, and the [`Scene`] container with per-vertex normals.
//! - **Appearance**: [`Color`], [`Material`] flags, [`SurfaceKind`] roles,
//!   and [`Texture`] images for diffuse/checker/bump lookups.
//! - **View**: the pinhole [`Camera`] and the point [`Light`] with its
//!   soft-shadow sample cluster.
//! - **Configuration**: [`RenderSettings`] mode flags, loadable from JSON.
//!
//! Geometry is produced by external loaders; the core does not parse mesh
//! file formats.

pub mod camera;
pub mod color;
pub mod light;
pub mod material;
pub mod object;
pub mod scene;
pub mod settings;
pub mod texture;
pub mod triangle;

// Re-export commonly used types
pub use camera::Camera;
pub use color::Color;
pub use light::Light;
pub use material::{Material, SurfaceKind};
pub use object::SceneObject;
pub use scene::Scene;
pub use settings::{RenderMode, RenderSettings, SettingsError};
pub use texture::{Texture, TextureError};
pub use triangle::Triangle;
