//! # Shader Programs
//!
//! [`ShaderProgram`] wraps a compiled and linked program and exposes typed,
//! name-based uniform upload. Locations are resolved once per name and cached
//! for the life of the program, so per-frame uploads cost one hash lookup
//! instead of a driver round trip.
//!
//! A name the program does not declare caches as absent and every upload to
//! it is skipped silently. That keeps one shader usable across renderers that
//! only feed a subset of its inputs, and matches how the graphics API treats
//! unresolved locations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use cgmath::{Matrix3, Matrix4};

use crate::errors::{GlintError, Result};
use crate::gfx::gl::{GlApi, RawProgram, RawUniformLocation};
use crate::gfx::handle::ProgramObject;

pub struct ShaderProgram {
    gl: Rc<dyn GlApi>,
    program: ProgramObject,
    locations: RefCell<HashMap<String, Option<RawUniformLocation>>>,
}

impl ShaderProgram {
    /// Compiles and links a program from in-memory GLSL sources.
    pub fn from_sources(gl: Rc<dyn GlApi>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let program = ProgramObject::compile(gl.clone(), vertex_src, fragment_src)?;
        Ok(Self {
            gl,
            program,
            locations: RefCell::new(HashMap::new()),
        })
    }

    /// Reads two GLSL files and compiles them into a program.
    pub fn from_files(
        gl: Rc<dyn GlApi>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex_src = read_source(vertex_path.as_ref())?;
        let fragment_src = read_source(fragment_path.as_ref())?;
        Self::from_sources(gl, &vertex_src, &fragment_src)
    }

    /// Makes this program current for subsequent uniform uploads and draws.
    pub fn bind(&self) {
        self.gl.use_program(Some(self.program.raw()));
    }

    pub fn raw(&self) -> RawProgram {
        self.program.raw()
    }

    pub fn set_mat4(&self, name: &str, value: &Matrix4<f32>) {
        if let Some(location) = self.location(name) {
            // cgmath matrices are column-major, which is what the GPU expects
            let data: &[f32; 16] = value.as_ref();
            self.gl.set_uniform_mat4(location, data);
        }
    }

    pub fn set_mat3(&self, name: &str, value: &Matrix3<f32>) {
        if let Some(location) = self.location(name) {
            let data: &[f32; 9] = value.as_ref();
            self.gl.set_uniform_mat3(location, data);
        }
    }

    pub fn set_vec3(&self, name: &str, value: [f32; 3]) {
        if let Some(location) = self.location(name) {
            self.gl.set_uniform_vec3(location, value);
        }
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        if let Some(location) = self.location(name) {
            self.gl.set_uniform_f32(location, value);
        }
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        if let Some(location) = self.location(name) {
            self.gl.set_uniform_i32(location, value);
        }
    }

    fn location(&self, name: &str) -> Option<RawUniformLocation> {
        let mut cache = self.locations.borrow_mut();
        if let Some(cached) = cache.get(name) {
            return *cached;
        }
        let location = self.gl.uniform_location(self.program.raw(), name);
        cache.insert(name.to_owned(), location);
        location
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GlintError::ShaderSource {
        path: path.to_owned(),
        source,
    })
}
