// src/lib.rs
//! Glint 3D Engine
//!
//! A small real-time 3D engine over OpenGL and winit: one window, a frame
//! loop with per-key callbacks, and per-object renderers with Phong
//! materials and lights.

pub mod app;
pub mod errors;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod scene;
pub mod time;

// Re-export main types for convenience
pub use app::Engine;
pub use errors::{GlintError, Result};
