//! Error Types
//!
//! The main error type [`GlintError`] covers every failure mode the engine
//! reports: windowing and GL context setup, shader and model loading, and
//! misuse of the rendering API (drawing before buffers exist, submesh indices
//! out of range, malformed mesh data).
//!
//! Transient GPU-state errors are not part of this type. They are queried
//! after GPU-affecting operations and logged with a location tag, and
//! execution continues; see [`crate::gfx::gl::check_error`].
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, GlintError>`.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the glint engine.
#[derive(Error, Debug)]
pub enum GlintError {
    /// Event loop creation or execution error (winit).
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// GL display, context, or surface creation failed.
    #[error("GL context creation failed: {0}")]
    ContextCreation(String),

    /// Presenting the back buffer failed.
    #[error("buffer swap failed: {0}")]
    SwapBuffers(String),

    /// Allocating a GPU object (buffer, vertex array, texture, program) failed.
    #[error("GPU resource allocation failed: {0}")]
    ResourceAllocation(String),

    /// Shader compilation or linking failed. Carries the driver's info log.
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    /// A shader source file could not be read.
    #[error("failed to read shader source {path}: {source}")]
    ShaderSource {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// OBJ/MTL model loading error.
    #[error("model load error: {0}")]
    ModelLoad(#[from] tobj::LoadError),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A renderer operation that needs GPU buffers ran before `initialize()`.
    #[error("object renderer used before initialize()")]
    NotInitialized,

    /// `initialize()` was called on a renderer that already owns GPU buffers.
    #[error("object renderer buffers already initialized")]
    AlreadyInitialized,

    /// A per-submesh operation was given an index past the last submesh.
    #[error("submesh index {index} out of range ({count} submeshes)")]
    SubmeshOutOfRange {
        /// The offending index
        index: usize,
        /// Number of submeshes the mesh actually has
        count: usize,
    },

    /// Mesh data failed validation and was not uploaded.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Texture pixel data does not match the declared dimensions.
    #[error("invalid texture: {0}")]
    InvalidTexture(String),
}

/// Alias for `Result<T, GlintError>`.
pub type Result<T> = std::result::Result<T, GlintError>;
