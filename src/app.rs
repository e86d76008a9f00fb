//! # Engine Lifecycle
//!
//! [`Engine`] owns the winit event loop and the per-run state: the window
//! with its GL context, the shared [`GraphicsContext`], keyboard state and
//! callbacks, and the scene being played. Construction only configures;
//! the window and context come up when the event loop delivers `resumed`,
//! and [`Engine::play_scene`] blocks until the run ends.
//!
//! A frame is one `RedrawRequested`: measure the time step, fire callbacks
//! for held keys, let the scene draw, present. Holding Escape requests a
//! close, and that frame skips its draw so nothing renders into a dying
//! window.

use std::collections::BTreeMap;
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::errors::{GlintError, Result};
use crate::gfx::context::GraphicsContext;
use crate::gfx::gl::GlApi;
use crate::gfx::glow_backend::GlowBackend;
use crate::gfx::shader::ShaderProgram;
use crate::gfx::window::GlWindow;
use crate::input::{InputState, Key};
use crate::scene::{Frame, Scene};
use crate::time::FrameClock;

const DEFAULT_VERTEX_SHADER: &str = "data/shaders/default.vert";
const DEFAULT_FRAGMENT_SHADER: &str = "data/shaders/default.frag";

type KeyCallback = Box<dyn FnMut(f32)>;

pub struct Engine {
    event_loop: EventLoop<()>,
    state: EngineState,
}

struct WindowRequest {
    width: u32,
    height: u32,
    title: String,
}

// Declaration order doubles as drop order: the scene and graphics context
// hold GL objects that must be released while the window's context lives.
struct EngineState {
    scene: Option<Box<dyn Scene>>,
    graphics: Option<GraphicsContext>,
    window: Option<GlWindow>,
    request: WindowRequest,
    clock: FrameClock,
    input: InputState,
    callbacks: BTreeMap<Key, Vec<KeyCallback>>,
    close_requested: bool,
    width: u32,
    height: u32,
    fatal: Option<GlintError>,
}

impl Engine {
    /// Creates an engine with a 1280x720 window request and no scene.
    pub fn new() -> Result<Self> {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(error) => {
                log::error!("could not create event loop: {error}");
                return Err(error.into());
            }
        };
        Ok(Self {
            event_loop,
            state: EngineState::new(),
        })
    }

    /// Sets the size and title of the window the engine opens when a scene
    /// starts playing. Calling it again replaces the previous request.
    pub fn create_window(&mut self, width: u32, height: u32, title: &str) {
        self.state.request = WindowRequest {
            width,
            height,
            title: title.to_owned(),
        };
        self.state.width = width;
        self.state.height = height;
    }

    /// Registers a callback fired every frame `key` is held, with the frame
    /// time step. Callbacks on the same key run in registration order;
    /// across keys they run in [`Key`] order.
    pub fn register_key_event<F>(&mut self, key: Key, callback: F)
    where
        F: FnMut(f32) + 'static,
    {
        self.state
            .callbacks
            .entry(key)
            .or_default()
            .push(Box::new(callback));
    }

    /// Framebuffer width, or the requested width before the window opens.
    pub fn width(&self) -> u32 {
        self.state.width
    }

    /// Framebuffer height, or the requested height before the window opens.
    pub fn height(&self) -> u32 {
        self.state.height
    }

    /// Opens the window and runs the frame loop until the window closes or
    /// Escape is held.
    ///
    /// Startup failures (window, context, or default shader) and scene load
    /// errors are logged and returned after the loop winds down.
    pub fn play_scene(self, scene: impl Scene + 'static) -> Result<()> {
        let Engine {
            event_loop,
            mut state,
        } = self;
        state.scene = Some(Box::new(scene));

        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut state)?;

        match state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl EngineState {
    fn new() -> Self {
        Self {
            scene: None,
            graphics: None,
            window: None,
            request: WindowRequest {
                width: 1280,
                height: 720,
                title: "glint".to_owned(),
            },
            clock: FrameClock::new(),
            input: InputState::new(),
            callbacks: BTreeMap::new(),
            close_requested: false,
            width: 1280,
            height: 720,
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (window, gl) = GlWindow::create(
            event_loop,
            self.request.width,
            self.request.height,
            &self.request.title,
        )?;
        let size = window.inner_size();
        self.width = size.width;
        self.height = size.height;

        let gl: Rc<dyn GlApi> = Rc::new(GlowBackend::new(gl));
        gl.enable_depth_test();
        gl.viewport(0, 0, size.width as i32, size.height as i32);

        let shader =
            ShaderProgram::from_files(gl.clone(), DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)?;
        let graphics = GraphicsContext::new(gl, Rc::new(shader));

        window.capture_cursor();
        self.window = Some(window);
        log::info!(
            "window \"{}\" up at {}x{}",
            self.request.title,
            size.width,
            size.height
        );

        if let Some(scene) = self.scene.as_mut() {
            scene.load(&graphics)?;
        }
        self.graphics = Some(graphics);

        // startup time must not count into the first frame's dt
        self.clock.reset();
        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if let Some(window) = &self.window {
            window.resize_surface(width, height);
        }
        if let Some(graphics) = &self.graphics {
            graphics.gl().viewport(0, 0, width as i32, height as i32);
        }
    }

    /// One frame: time step, input callbacks, scene draw, present. A close
    /// request raised during input processing skips the draw.
    fn advance_frame(&mut self) {
        let dt = self.clock.tick();
        self.process_inputs(dt);
        if self.close_requested {
            return;
        }

        let (Some(scene), Some(graphics)) = (self.scene.as_mut(), self.graphics.as_ref()) else {
            return;
        };
        let frame = Frame {
            dt,
            width: self.width,
            height: self.height,
        };
        scene.draw(graphics, &frame);

        if let Some(window) = &self.window {
            if let Err(error) = window.swap_buffers() {
                log::error!("{error}");
            }
        }
    }

    fn process_inputs(&mut self, dt: f32) {
        if self.input.pressed(Key::Escape) {
            self.close_requested = true;
        }
        for (key, callbacks) in self.callbacks.iter_mut() {
            if self.input.pressed(*key) {
                for callback in callbacks.iter_mut() {
                    callback(dt);
                }
            }
        }
    }
}

impl ApplicationHandler for EngineState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.init_graphics(event_loop) {
            log::error!("engine startup failed: {error}");
            self.fatal = Some(error);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.apply_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.handle_resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                self.advance_frame();
                if self.close_requested {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
