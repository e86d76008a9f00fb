//! # Window and GL Context
//!
//! [`GlWindow`] bundles the winit window with the glutin surface and current
//! OpenGL 3.3 core context drawn onto it, and hands back the [`glow::Context`]
//! the backend renders through. Creation has to happen once the event loop is
//! active, so the engine calls [`GlWindow::create`] from its `resumed`
//! handler.

use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window};

use crate::errors::{GlintError, Result};

// Field order doubles as drop order: the surface must go before the context
// it draws to, and both before the window.
pub struct GlWindow {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindow {
    /// Opens a window and makes an OpenGL 3.3 core context current on it.
    ///
    /// Returns the window alongside the loaded [`glow::Context`]; the caller
    /// owns wiring the latter into a rendering backend.
    pub fn create(
        event_loop: &ActiveEventLoop,
        width: u32,
        height: u32,
        title: &str,
    ) -> Result<(Self, glow::Context)> {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no matching GL config")
            })
            .map_err(|error| GlintError::WindowCreation(error.to_string()))?;
        let window = window.ok_or_else(|| {
            GlintError::WindowCreation("display builder produced no window".into())
        })?;

        let raw_window_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|error| GlintError::WindowCreation(error.to_string()))?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let display = gl_config.display();
        let not_current_context = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|error| GlintError::ContextCreation(error.to_string()))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|error| GlintError::WindowCreation(error.to_string()))?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|error| GlintError::ContextCreation(error.to_string()))?;

        let context = not_current_context
            .make_current(&surface)
            .map_err(|error| GlintError::ContextCreation(error.to_string()))?;

        if let Err(error) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("could not enable vsync: {error}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
        ))
    }

    /// Presents the frame just rendered.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|error| GlintError::SwapBuffers(error.to_string()))
    }

    /// Resizes the GL surface to the new window size. Zero dimensions (a
    /// minimized window) are ignored.
    pub fn resize_surface(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
        }
    }

    /// Locks the cursor to the window and hides it, falling back to
    /// confinement on platforms without locking.
    pub fn capture_cursor(&self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(error) = grabbed {
            log::warn!("cursor capture unavailable: {error}");
        }
        self.window.set_cursor_visible(false);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }
}
