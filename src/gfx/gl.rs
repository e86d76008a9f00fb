//! # Graphics Interface
//!
//! [`GlApi`] is the seam between the engine and the immediate-mode graphics
//! API. It captures exactly the primitives the object rendering pipeline
//! depends on: buffer and vertex-array management, program compilation,
//! named-uniform upload, texture binding, indexed draws, and the error-code
//! query. The production implementation wraps a live OpenGL context
//! ([`crate::gfx::glow_backend::GlowBackend`]); tests substitute a recording
//! fake with buffer readback.
//!
//! Handles are plain integer newtypes rather than backend types so that code
//! holding them never depends on a real GPU. Ownership of handles lives in
//! the RAII wrappers in [`crate::gfx::handle`].

use crate::errors::Result;

/// GL `NO_ERROR` status code.
pub const NO_ERROR: u32 = 0;

/// Handle to a GPU data buffer (vertex or index storage).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawBuffer(pub u32);

/// Handle to a vertex array object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawVertexArray(pub u32);

/// Handle to a 2D texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawTexture(pub u32);

/// Handle to a linked shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawProgram(pub u32);

/// Resolved location of a named uniform within a program.
///
/// Lookups that fail resolve to `None` at the [`GlApi::uniform_location`]
/// call site; a location value itself is always valid for its program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawUniformLocation(pub u32);

/// Buffer upload usage hint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Contents are set once (or rarely) and drawn many times.
    StaticDraw,
    /// Contents are respecified frequently.
    DynamicDraw,
}

/// The immediate-mode graphics primitives the engine renders through.
///
/// All operations are synchronous and bound to the thread that owns the GL
/// context. Binding methods take `Option`s where `None` unbinds. Operations
/// that allocate return `Err` on allocation failure; everything else reports
/// problems only through [`GlApi::error_code`], which the caller is expected
/// to poll via [`check_error`] after GPU-affecting work.
pub trait GlApi {
    // --- buffers ---

    fn create_buffer(&self) -> Result<RawBuffer>;
    fn bind_array_buffer(&self, buffer: Option<RawBuffer>);
    fn bind_element_buffer(&self, buffer: Option<RawBuffer>);
    /// Uploads `data` to the currently bound array buffer, replacing its
    /// entire contents.
    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage);
    /// Uploads `data` to the currently bound element buffer, replacing its
    /// entire contents.
    fn element_buffer_data(&self, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: RawBuffer);

    // --- vertex arrays ---

    fn create_vertex_array(&self) -> Result<RawVertexArray>;
    fn bind_vertex_array(&self, vertex_array: Option<RawVertexArray>);
    /// Declares one float attribute of `size` components at `byte_offset`
    /// within a record of `stride` bytes, reading from the bound array
    /// buffer into attribute slot `index`.
    fn vertex_attrib_pointer(&self, index: u32, size: i32, stride: i32, byte_offset: i32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn delete_vertex_array(&self, vertex_array: RawVertexArray);

    // --- programs and uniforms ---

    /// Compiles and links a program from vertex and fragment sources.
    ///
    /// Returns [`crate::errors::GlintError::ShaderCompile`] carrying the
    /// driver's info log when either stage or the link fails.
    fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<RawProgram>;
    fn use_program(&self, program: Option<RawProgram>);
    /// Resolves a uniform by name. `None` means the program has no active
    /// uniform of that name.
    fn uniform_location(&self, program: RawProgram, name: &str) -> Option<RawUniformLocation>;
    /// Uploads a 4x4 matrix in column-major order.
    fn set_uniform_mat4(&self, location: RawUniformLocation, value: &[f32; 16]);
    /// Uploads a 3x3 matrix in column-major order.
    fn set_uniform_mat3(&self, location: RawUniformLocation, value: &[f32; 9]);
    fn set_uniform_vec3(&self, location: RawUniformLocation, value: [f32; 3]);
    fn set_uniform_f32(&self, location: RawUniformLocation, value: f32);
    fn set_uniform_i32(&self, location: RawUniformLocation, value: i32);
    fn delete_program(&self, program: RawProgram);

    // --- textures ---

    fn create_texture(&self) -> Result<RawTexture>;
    fn bind_texture_2d(&self, texture: Option<RawTexture>);
    /// Uploads RGBA8 pixels to the currently bound 2D texture and prepares
    /// it for sampling (filtering and mip generation are backend concerns).
    fn texture_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]);
    fn delete_texture(&self, texture: RawTexture);

    // --- drawing and state ---

    /// Issues one indexed triangle draw of `index_count` `u32` indices
    /// starting `index_byte_offset` bytes into the bound element buffer.
    fn draw_triangles(&self, index_count: i32, index_byte_offset: i32);
    fn enable_depth_test(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Clears the color and depth buffers.
    fn clear(&self, r: f32, g: f32, b: f32, a: f32);
    /// Returns and resets the oldest pending error code, [`NO_ERROR`] when
    /// the state is clean.
    fn error_code(&self) -> u32;
}

/// Polls the GL error state and logs any pending error with a location tag.
///
/// The error is logged and cleared, never returned. The renderer calls this
/// after initialization, uploads, and draws.
pub fn check_error(gl: &dyn GlApi, location: &str) {
    let code = gl.error_code();
    if code != NO_ERROR {
        log::error!("GL error at {location}: {} (0x{code:04x})", error_name(code));
    }
}

fn error_name(code: u32) -> &'static str {
    match code {
        0x0500 => "INVALID_ENUM",
        0x0501 => "INVALID_VALUE",
        0x0502 => "INVALID_OPERATION",
        0x0503 => "STACK_OVERFLOW",
        0x0504 => "STACK_UNDERFLOW",
        0x0505 => "OUT_OF_MEMORY",
        0x0506 => "INVALID_FRAMEBUFFER_OPERATION",
        _ => "UNKNOWN",
    }
}
