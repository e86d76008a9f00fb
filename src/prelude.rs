//! # Glint Prelude
//!
//! This module provides a convenient way to import the types a typical Glint
//! application touches: the engine, the scene hooks, and the graphics
//! building blocks.
//!
//! ## Usage
//!
//! ```rust
//! use glint::prelude::*;
//! ```
//!
//! This brings all essential types into scope, allowing you to write:
//!
//! ```no_run
//! use glint::prelude::*;
//!
//! fn main() -> glint::Result<()> {
//!     let mut engine = Engine::new()?;
//!     engine.create_window(1280, 720, "spinner");
//!     engine.play_scene(Spinner {
//!         renderer: None,
//!         angle: 0.0,
//!     })
//! }
//!
//! struct Spinner {
//!     renderer: Option<ObjectRenderer>,
//!     angle: f32,
//! }
//!
//! impl Scene for Spinner {
//!     fn load(&mut self, gfx: &GraphicsContext) -> glint::Result<()> {
//!         let mut renderer = gfx.new_renderer();
//!         renderer.initialize()?;
//!         renderer.set_mesh(geometry::cube())?;
//!         self.renderer = Some(renderer);
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, gfx: &GraphicsContext, frame: &Frame) {
//!         gfx.clear(0.08, 0.08, 0.1, 1.0);
//!         self.angle += 45.0 * frame.dt;
//!
//!         let camera = Camera::default();
//!         let model = Matrix4::from_angle_y(Deg(self.angle));
//!         if let Some(renderer) = &self.renderer {
//!             let _ = renderer.draw(
//!                 &model,
//!                 &camera.view_matrix(),
//!                 &camera.projection_matrix(frame.aspect_ratio()),
//!                 &camera,
//!                 &[Light::default()],
//!             );
//!         }
//!     }
//! }
//! ```

// Re-export core application types
pub use crate::app::Engine;
pub use crate::errors::{GlintError, Result};
pub use crate::input::Key;
pub use crate::scene::{Frame, Scene};

// Re-export graphics types
pub use crate::gfx::{
    geometry, Camera, GraphicsContext, Light, Material, Mesh, ObjectRenderer, ShaderProgram,
    Texture, Vertex, MAX_LIGHTS,
};

// Re-export common external dependencies
pub use cgmath::{Deg, Matrix4, Point3, Vector3};
