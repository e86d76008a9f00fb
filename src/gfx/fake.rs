//! Recording [`GlApi`] double for unit tests.
//!
//! `FakeGl` allocates handle ids, retains the byte contents of every buffer
//! for readback, and keeps an ordered log of GPU-affecting calls so tests can
//! assert on upload contents, uniform traffic, and draw sequencing without a
//! GL context. Uniform names resolve to auto-assigned locations unless a test
//! marks them missing via [`FakeGl::mark_uniform_missing`].

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::errors::{GlintError, Result};
use crate::gfx::gl::{
    BufferUsage, GlApi, RawBuffer, RawProgram, RawTexture, RawUniformLocation, RawVertexArray,
    NO_ERROR,
};

/// Which buffer binding point an upload targeted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    Element,
}

/// One entry in the ordered call log.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    BindArrayBuffer(Option<u32>),
    BindElementBuffer(Option<u32>),
    BindVertexArray(Option<u32>),
    BindTexture(Option<u32>),
    UseProgram(Option<u32>),
    VertexAttribPointer {
        index: u32,
        size: i32,
        stride: i32,
        byte_offset: i32,
    },
    EnableVertexAttribArray(u32),
    BufferData {
        target: BufferTarget,
        buffer: Option<u32>,
        len: usize,
        usage: BufferUsage,
    },
    UniformMat4 {
        location: u32,
        value: [f32; 16],
    },
    UniformMat3 {
        location: u32,
        value: [f32; 9],
    },
    UniformVec3 {
        location: u32,
        value: [f32; 3],
    },
    UniformF32 {
        location: u32,
        value: f32,
    },
    UniformI32 {
        location: u32,
        value: i32,
    },
    DrawTriangles {
        index_count: i32,
        index_byte_offset: i32,
    },
    TextureImage {
        width: u32,
        height: u32,
        len: usize,
    },
    EnableDepthTest,
    Viewport {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Clear,
    DeleteBuffer(u32),
    DeleteVertexArray(u32),
    DeleteTexture(u32),
    DeleteProgram(u32),
}

/// A full-content buffer upload, retained verbatim for readback assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub target: BufferTarget,
    pub buffer: Option<u32>,
    pub data: Vec<u8>,
    pub usage: BufferUsage,
}

#[derive(Default)]
struct FakeState {
    next_id: u32,
    buffers: HashMap<u32, Vec<u8>>,
    vertex_arrays: HashSet<u32>,
    textures: HashSet<u32>,
    programs: HashSet<u32>,
    array_buffer: Option<u32>,
    element_buffer: Option<u32>,
    locations: HashMap<(u32, String), u32>,
    missing_uniforms: HashSet<String>,
    lookups: Vec<(u32, String)>,
    calls: Vec<GlCall>,
    uploads: Vec<UploadRecord>,
    pending_error: u32,
}

impl FakeState {
    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct FakeGl {
    state: RefCell<FakeState>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FakeState::default()),
        }
    }

    /// Ordered log of every recorded call.
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Every buffer upload in order, with full byte contents.
    pub fn uploads(&self) -> Vec<UploadRecord> {
        self.state.borrow().uploads.clone()
    }

    /// Current contents of a buffer, if it is still alive.
    pub fn buffer_contents(&self, buffer: RawBuffer) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer.0).cloned()
    }

    /// Location a name resolved to, without recording a lookup.
    pub fn location_of(&self, program: RawProgram, name: &str) -> Option<u32> {
        self.state
            .borrow()
            .locations
            .get(&(program.0, name.to_owned()))
            .copied()
    }

    /// Number of [`GlApi::uniform_location`] calls made for `name`.
    pub fn lookup_count(&self, name: &str) -> usize {
        self.state
            .borrow()
            .lookups
            .iter()
            .filter(|(_, n)| n == name)
            .count()
    }

    /// Makes subsequent lookups of `name` resolve to `None`.
    pub fn mark_uniform_missing(&self, name: &str) {
        self.state
            .borrow_mut()
            .missing_uniforms
            .insert(name.to_owned());
    }

    /// Arms the error query: the next [`GlApi::error_code`] call returns
    /// `code`, after which the state reads clean again.
    pub fn set_error(&self, code: u32) {
        self.state.borrow_mut().pending_error = code;
    }

    /// Discards the call log (retained buffer contents stay).
    pub fn clear_calls(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.clear();
        state.uploads.clear();
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Default for FakeGl {
    fn default() -> Self {
        Self::new()
    }
}

impl GlApi for FakeGl {
    fn create_buffer(&self) -> Result<RawBuffer> {
        let mut state = self.state.borrow_mut();
        let id = state.alloc_id();
        state.buffers.insert(id, Vec::new());
        Ok(RawBuffer(id))
    }

    fn bind_array_buffer(&self, buffer: Option<RawBuffer>) {
        let mut state = self.state.borrow_mut();
        state.array_buffer = buffer.map(|b| b.0);
        state.calls.push(GlCall::BindArrayBuffer(buffer.map(|b| b.0)));
    }

    fn bind_element_buffer(&self, buffer: Option<RawBuffer>) {
        let mut state = self.state.borrow_mut();
        state.element_buffer = buffer.map(|b| b.0);
        state
            .calls
            .push(GlCall::BindElementBuffer(buffer.map(|b| b.0)));
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        let bound = state.array_buffer;
        if let Some(id) = bound {
            state.buffers.insert(id, data.to_vec());
        }
        state.calls.push(GlCall::BufferData {
            target: BufferTarget::Array,
            buffer: bound,
            len: data.len(),
            usage,
        });
        state.uploads.push(UploadRecord {
            target: BufferTarget::Array,
            buffer: bound,
            data: data.to_vec(),
            usage,
        });
    }

    fn element_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        let bound = state.element_buffer;
        if let Some(id) = bound {
            state.buffers.insert(id, data.to_vec());
        }
        state.calls.push(GlCall::BufferData {
            target: BufferTarget::Element,
            buffer: bound,
            len: data.len(),
            usage,
        });
        state.uploads.push(UploadRecord {
            target: BufferTarget::Element,
            buffer: bound,
            data: data.to_vec(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: RawBuffer) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer.0);
        state.calls.push(GlCall::DeleteBuffer(buffer.0));
    }

    fn create_vertex_array(&self) -> Result<RawVertexArray> {
        let mut state = self.state.borrow_mut();
        let id = state.alloc_id();
        state.vertex_arrays.insert(id);
        Ok(RawVertexArray(id))
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawVertexArray>) {
        self.record(GlCall::BindVertexArray(vertex_array.map(|v| v.0)));
    }

    fn vertex_attrib_pointer(&self, index: u32, size: i32, stride: i32, byte_offset: i32) {
        self.record(GlCall::VertexAttribPointer {
            index,
            size,
            stride,
            byte_offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&self, vertex_array: RawVertexArray) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&vertex_array.0);
        state.calls.push(GlCall::DeleteVertexArray(vertex_array.0));
    }

    fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<RawProgram> {
        if vertex_src.is_empty() || fragment_src.is_empty() {
            return Err(GlintError::ShaderCompile("empty shader source".into()));
        }
        let mut state = self.state.borrow_mut();
        let id = state.alloc_id();
        state.programs.insert(id);
        Ok(RawProgram(id))
    }

    fn use_program(&self, program: Option<RawProgram>) {
        self.record(GlCall::UseProgram(program.map(|p| p.0)));
    }

    fn uniform_location(&self, program: RawProgram, name: &str) -> Option<RawUniformLocation> {
        let mut state = self.state.borrow_mut();
        state.lookups.push((program.0, name.to_owned()));
        if state.missing_uniforms.contains(name) {
            return None;
        }
        let key = (program.0, name.to_owned());
        let location = match state.locations.get(&key) {
            Some(loc) => *loc,
            None => {
                let loc = state.alloc_id();
                state.locations.insert(key, loc);
                loc
            }
        };
        Some(RawUniformLocation(location))
    }

    fn set_uniform_mat4(&self, location: RawUniformLocation, value: &[f32; 16]) {
        self.record(GlCall::UniformMat4 {
            location: location.0,
            value: *value,
        });
    }

    fn set_uniform_mat3(&self, location: RawUniformLocation, value: &[f32; 9]) {
        self.record(GlCall::UniformMat3 {
            location: location.0,
            value: *value,
        });
    }

    fn set_uniform_vec3(&self, location: RawUniformLocation, value: [f32; 3]) {
        self.record(GlCall::UniformVec3 {
            location: location.0,
            value,
        });
    }

    fn set_uniform_f32(&self, location: RawUniformLocation, value: f32) {
        self.record(GlCall::UniformF32 {
            location: location.0,
            value,
        });
    }

    fn set_uniform_i32(&self, location: RawUniformLocation, value: i32) {
        self.record(GlCall::UniformI32 {
            location: location.0,
            value,
        });
    }

    fn delete_program(&self, program: RawProgram) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program.0);
        state.calls.push(GlCall::DeleteProgram(program.0));
    }

    fn create_texture(&self) -> Result<RawTexture> {
        let mut state = self.state.borrow_mut();
        let id = state.alloc_id();
        state.textures.insert(id);
        Ok(RawTexture(id))
    }

    fn bind_texture_2d(&self, texture: Option<RawTexture>) {
        self.record(GlCall::BindTexture(texture.map(|t| t.0)));
    }

    fn texture_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(GlCall::TextureImage {
            width,
            height,
            len: pixels.len(),
        });
    }

    fn delete_texture(&self, texture: RawTexture) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture.0);
        state.calls.push(GlCall::DeleteTexture(texture.0));
    }

    fn draw_triangles(&self, index_count: i32, index_byte_offset: i32) {
        self.record(GlCall::DrawTriangles {
            index_count,
            index_byte_offset,
        });
    }

    fn enable_depth_test(&self) {
        self.record(GlCall::EnableDepthTest);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn clear(&self, _r: f32, _g: f32, _b: f32, _a: f32) {
        self.record(GlCall::Clear);
    }

    fn error_code(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        std::mem::replace(&mut state.pending_error, NO_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_upload_is_readable_back() {
        let gl = FakeGl::new();
        let buffer = gl.create_buffer().unwrap();
        gl.bind_array_buffer(Some(buffer));
        gl.array_buffer_data(&[1, 2, 3, 4], BufferUsage::StaticDraw);
        assert_eq!(gl.buffer_contents(buffer), Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn missing_uniforms_resolve_to_none() {
        let gl = FakeGl::new();
        let program = gl.compile_program("v", "f").unwrap();
        gl.mark_uniform_missing("ghost");
        assert!(gl.uniform_location(program, "ghost").is_none());
        assert!(gl.uniform_location(program, "real").is_some());
        assert_eq!(gl.lookup_count("ghost"), 1);
    }

    #[test]
    fn error_code_reads_once_then_clears() {
        let gl = FakeGl::new();
        gl.set_error(0x0502);
        assert_eq!(gl.error_code(), 0x0502);
        assert_eq!(gl.error_code(), NO_ERROR);
    }
}
