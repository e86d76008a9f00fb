//! Owning wrappers for GPU objects.
//!
//! Each wrapper holds the [`GlApi`] it was created through and deletes its
//! object on drop. None of them implement `Clone`: a handle has exactly one
//! owner and moves with it.

use std::rc::Rc;

use crate::errors::Result;
use crate::gfx::gl::{GlApi, RawBuffer, RawProgram, RawTexture, RawVertexArray};

pub struct BufferObject {
    gl: Rc<dyn GlApi>,
    raw: RawBuffer,
}

impl BufferObject {
    pub fn new(gl: Rc<dyn GlApi>) -> Result<Self> {
        let raw = gl.create_buffer()?;
        Ok(Self { gl, raw })
    }

    pub fn raw(&self) -> RawBuffer {
        self.raw
    }
}

impl Drop for BufferObject {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.raw);
    }
}

pub struct VertexArrayObject {
    gl: Rc<dyn GlApi>,
    raw: RawVertexArray,
}

impl VertexArrayObject {
    pub fn new(gl: Rc<dyn GlApi>) -> Result<Self> {
        let raw = gl.create_vertex_array()?;
        Ok(Self { gl, raw })
    }

    pub fn raw(&self) -> RawVertexArray {
        self.raw
    }
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.raw);
    }
}

pub struct TextureObject {
    gl: Rc<dyn GlApi>,
    raw: RawTexture,
}

impl TextureObject {
    pub fn new(gl: Rc<dyn GlApi>) -> Result<Self> {
        let raw = gl.create_texture()?;
        Ok(Self { gl, raw })
    }

    pub fn raw(&self) -> RawTexture {
        self.raw
    }
}

impl Drop for TextureObject {
    fn drop(&mut self) {
        self.gl.delete_texture(self.raw);
    }
}

pub struct ProgramObject {
    gl: Rc<dyn GlApi>,
    raw: RawProgram,
}

impl ProgramObject {
    /// Compiles and links a program, wrapping the result.
    pub fn compile(gl: Rc<dyn GlApi>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let raw = gl.compile_program(vertex_src, fragment_src)?;
        Ok(Self { gl, raw })
    }

    pub fn raw(&self) -> RawProgram {
        self.raw
    }
}

impl Drop for ProgramObject {
    fn drop(&mut self) {
        self.gl.delete_program(self.raw);
    }
}
