//! # Graphics Module
//!
//! Everything the engine draws with, from the raw GL seam up to per-object
//! renderers.
//!
//! ## Architecture Overview
//!
//! - **Graphics Interface** ([`gl`]) - The narrow trait the engine renders
//!   through, with RAII handle ownership in [`handle`]
//! - **OpenGL Backend** ([`glow_backend`]) - The live implementation over a
//!   glow context; the only module issuing raw GL calls
//! - **Object Rendering** ([`renderer`]) - GPU buffers, per-submesh
//!   materials, and the uniform upload protocol for one drawable object
//! - **Shaders** ([`shader`]) - Program compilation with cached named
//!   uniform lookups
//! - **Geometry** ([`mesh`], [`geometry`]) - The interleaved vertex layout,
//!   mesh validation, shape generation, and OBJ loading
//! - **Window** ([`window`]) - The winit window with its current GL context
//!
//! Scenes reach all of this through [`GraphicsContext`], which carries the
//! shared backend handle and the default shader.

pub mod camera;
pub mod context;
pub mod geometry;
pub mod gl;
pub mod glow_backend;
pub mod handle;
pub mod light;
pub mod material;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod window;

#[cfg(test)]
pub(crate) mod fake;

// Re-export commonly used types
pub use camera::Camera;
pub use context::GraphicsContext;
pub use light::{Light, MAX_LIGHTS};
pub use material::Material;
pub use mesh::{Mesh, Vertex};
pub use renderer::ObjectRenderer;
pub use shader::ShaderProgram;
pub use texture::Texture;
