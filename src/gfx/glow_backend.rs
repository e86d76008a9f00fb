//! [`GlApi`] implementation over a live OpenGL context via [glow].
//!
//! Every raw GL call in the crate is issued here; the rest of the engine
//! sees only the safe trait. Methods require the context that produced the
//! [`glow::Context`] to be current on this thread.
//!
//! [glow]: https://docs.rs/glow

use std::num::NonZeroU32;

use glow::HasContext;

use crate::errors::{GlintError, Result};
use crate::gfx::gl::{
    BufferUsage, GlApi, RawBuffer, RawProgram, RawTexture, RawUniformLocation, RawVertexArray,
};

pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    unsafe fn compile_stage(&self, stage: u32, source: &str, label: &str) -> Result<glow::NativeShader> {
        let shader = self
            .gl
            .create_shader(stage)
            .map_err(GlintError::ResourceAllocation)?;
        self.gl.shader_source(shader, source);
        self.gl.compile_shader(shader);
        if !self.gl.get_shader_compile_status(shader) {
            let info_log = self.gl.get_shader_info_log(shader);
            self.gl.delete_shader(shader);
            return Err(GlintError::ShaderCompile(format!(
                "{label} shader: {info_log}"
            )));
        }
        Ok(shader)
    }
}

fn native_buffer(buffer: RawBuffer) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(buffer.0).map(glow::NativeBuffer)
}

fn native_vertex_array(vertex_array: RawVertexArray) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(vertex_array.0).map(glow::NativeVertexArray)
}

fn native_texture(texture: RawTexture) -> Option<glow::NativeTexture> {
    NonZeroU32::new(texture.0).map(glow::NativeTexture)
}

fn native_program(program: RawProgram) -> Option<glow::NativeProgram> {
    NonZeroU32::new(program.0).map(glow::NativeProgram)
}

fn usage_hint(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
    }
}

impl GlApi for GlowBackend {
    fn create_buffer(&self) -> Result<RawBuffer> {
        let buffer = unsafe { self.gl.create_buffer() }.map_err(GlintError::ResourceAllocation)?;
        Ok(RawBuffer(buffer.0.get()))
    }

    fn bind_array_buffer(&self, buffer: Option<RawBuffer>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.and_then(native_buffer));
        }
    }

    fn bind_element_buffer(&self, buffer: Option<RawBuffer>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, buffer.and_then(native_buffer));
        }
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, usage_hint(usage));
        }
    }

    fn element_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, data, usage_hint(usage));
        }
    }

    fn delete_buffer(&self, buffer: RawBuffer) {
        if let Some(native) = native_buffer(buffer) {
            unsafe { self.gl.delete_buffer(native) };
        }
    }

    fn create_vertex_array(&self) -> Result<RawVertexArray> {
        let vertex_array =
            unsafe { self.gl.create_vertex_array() }.map_err(GlintError::ResourceAllocation)?;
        Ok(RawVertexArray(vertex_array.0.get()))
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawVertexArray>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.and_then(native_vertex_array));
        }
    }

    fn vertex_attrib_pointer(&self, index: u32, size: i32, stride: i32, byte_offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, glow::FLOAT, false, stride, byte_offset);
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn delete_vertex_array(&self, vertex_array: RawVertexArray) {
        if let Some(native) = native_vertex_array(vertex_array) {
            unsafe { self.gl.delete_vertex_array(native) };
        }
    }

    fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<RawProgram> {
        unsafe {
            let vertex = self.compile_stage(glow::VERTEX_SHADER, vertex_src, "vertex")?;
            let fragment = match self.compile_stage(glow::FRAGMENT_SHADER, fragment_src, "fragment")
            {
                Ok(fragment) => fragment,
                Err(error) => {
                    self.gl.delete_shader(vertex);
                    return Err(error);
                }
            };

            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(message) => {
                    self.gl.delete_shader(vertex);
                    self.gl.delete_shader(fragment);
                    return Err(GlintError::ResourceAllocation(message));
                }
            };
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);
            let linked = self.gl.get_program_link_status(program);
            self.gl.detach_shader(program, vertex);
            self.gl.detach_shader(program, fragment);
            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);
            if !linked {
                let info_log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(GlintError::ShaderCompile(format!(
                    "program link: {info_log}"
                )));
            }
            Ok(RawProgram(program.0.get()))
        }
    }

    fn use_program(&self, program: Option<RawProgram>) {
        unsafe { self.gl.use_program(program.and_then(native_program)) };
    }

    fn uniform_location(&self, program: RawProgram, name: &str) -> Option<RawUniformLocation> {
        let native = native_program(program)?;
        let location = unsafe { self.gl.get_uniform_location(native, name) }?;
        Some(RawUniformLocation(location.0))
    }

    fn set_uniform_mat4(&self, location: RawUniformLocation, value: &[f32; 16]) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                Some(&glow::NativeUniformLocation(location.0)),
                false,
                value,
            );
        }
    }

    fn set_uniform_mat3(&self, location: RawUniformLocation, value: &[f32; 9]) {
        unsafe {
            self.gl.uniform_matrix_3_f32_slice(
                Some(&glow::NativeUniformLocation(location.0)),
                false,
                value,
            );
        }
    }

    fn set_uniform_vec3(&self, location: RawUniformLocation, value: [f32; 3]) {
        unsafe {
            self.gl.uniform_3_f32(
                Some(&glow::NativeUniformLocation(location.0)),
                value[0],
                value[1],
                value[2],
            );
        }
    }

    fn set_uniform_f32(&self, location: RawUniformLocation, value: f32) {
        unsafe {
            self.gl
                .uniform_1_f32(Some(&glow::NativeUniformLocation(location.0)), value);
        }
    }

    fn set_uniform_i32(&self, location: RawUniformLocation, value: i32) {
        unsafe {
            self.gl
                .uniform_1_i32(Some(&glow::NativeUniformLocation(location.0)), value);
        }
    }

    fn delete_program(&self, program: RawProgram) {
        if let Some(native) = native_program(program) {
            unsafe { self.gl.delete_program(native) };
        }
    }

    fn create_texture(&self) -> Result<RawTexture> {
        let texture = unsafe { self.gl.create_texture() }.map_err(GlintError::ResourceAllocation)?;
        Ok(RawTexture(texture.0.get()))
    }

    fn bind_texture_2d(&self, texture: Option<RawTexture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.and_then(native_texture));
        }
    }

    fn texture_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.gl.generate_mipmap(glow::TEXTURE_2D);
        }
    }

    fn delete_texture(&self, texture: RawTexture) {
        if let Some(native) = native_texture(texture) {
            unsafe { self.gl.delete_texture(native) };
        }
    }

    fn draw_triangles(&self, index_count: i32, index_byte_offset: i32) {
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                index_count,
                glow::UNSIGNED_INT,
                index_byte_offset,
            );
        }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn error_code(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}
