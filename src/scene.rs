//! # Scenes
//!
//! A [`Scene`] is the application's half of the frame loop: the engine owns
//! the window, timing, and input, and calls into the scene to set up GPU
//! resources once and to draw every frame.

use crate::errors::Result;
use crate::gfx::GraphicsContext;

/// Timing and framebuffer state for one frame.
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Framebuffer width in pixels.
    pub width: u32,
    /// Framebuffer height in pixels.
    pub height: u32,
}

impl Frame {
    /// Width over height, safe against a zero-height window.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Application hook driven by [`crate::app::Engine`].
pub trait Scene {
    /// Runs once after the GL context exists and before the first frame.
    /// Create renderers and upload meshes here. An error aborts the engine
    /// run.
    fn load(&mut self, gfx: &GraphicsContext) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    /// Draws one frame.
    fn draw(&mut self, gfx: &GraphicsContext, frame: &Frame);
}
