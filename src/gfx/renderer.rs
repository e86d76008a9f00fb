//! # Object Rendering
//!
//! [`ObjectRenderer`] owns one drawable mesh together with its GPU buffers,
//! a material per submesh, a shared shader program, and an optional texture.
//! It is the unit of drawing: a scene holds one renderer per object and calls
//! [`ObjectRenderer::draw`] each frame with the current transforms, camera,
//! and lights.
//!
//! Geometry lives GPU-side in a vertex buffer and an index buffer described
//! by a single vertex-array object carrying the fixed interleaved layout of
//! [`Vertex`]. Uploads are full replacements with the static usage hint; the
//! mesh is treated as immutable between explicit reloads.
//!
//! GPU-state errors never abort a draw: after initialization, uploads, and
//! draws the error code is polled and logged with a location tag. Misuse
//! (drawing before [`ObjectRenderer::initialize`], submesh indices out of
//! range, invalid mesh data) is reported as explicit [`crate::errors::Result`]
//! errors instead.

use std::mem;
use std::rc::Rc;

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};

use crate::errors::{GlintError, Result};
use crate::gfx::camera::Camera;
use crate::gfx::gl::{check_error, BufferUsage, GlApi, RawVertexArray};
use crate::gfx::handle::{BufferObject, VertexArrayObject};
use crate::gfx::light::{Light, MAX_LIGHTS};
use crate::gfx::material::Material;
use crate::gfx::mesh::{Mesh, Vertex};
use crate::gfx::shader::ShaderProgram;
use crate::gfx::texture::Texture;

struct GpuBuffers {
    vertex_buffer: BufferObject,
    index_buffer: BufferObject,
    vertex_array: VertexArrayObject,
}

pub struct ObjectRenderer {
    gl: Rc<dyn GlApi>,
    shader: Rc<ShaderProgram>,
    mesh: Mesh,
    // one entry per submesh, kept in lockstep with mesh.submesh_count()
    materials: Vec<Material>,
    texture: Option<Rc<Texture>>,
    buffers: Option<GpuBuffers>,
}

impl ObjectRenderer {
    /// Creates a renderer with an empty mesh and the default material.
    /// No GPU work happens until [`ObjectRenderer::initialize`].
    pub fn new(gl: Rc<dyn GlApi>, shader: Rc<ShaderProgram>) -> Self {
        Self {
            gl,
            shader,
            mesh: Mesh::default(),
            materials: vec![Material::default()],
            texture: None,
            buffers: None,
        }
    }

    /// Allocates the vertex buffer, index buffer, and vertex array, and
    /// declares the fixed four-attribute layout.
    ///
    /// Must run once, with a current GL context, before meshes can be
    /// uploaded or drawn. A second call reports
    /// [`GlintError::AlreadyInitialized`] and leaves the existing buffers
    /// untouched. If a mesh was set beforehand it is uploaded here.
    pub fn initialize(&mut self) -> Result<()> {
        if self.buffers.is_some() {
            return Err(GlintError::AlreadyInitialized);
        }

        let vertex_buffer = BufferObject::new(self.gl.clone())?;
        let index_buffer = BufferObject::new(self.gl.clone())?;
        let vertex_array = VertexArrayObject::new(self.gl.clone())?;

        self.gl.bind_vertex_array(Some(vertex_array.raw()));
        self.gl.bind_array_buffer(Some(vertex_buffer.raw()));
        self.gl.bind_element_buffer(Some(index_buffer.raw()));
        for attribute in Vertex::layout() {
            self.gl.vertex_attrib_pointer(
                attribute.index,
                attribute.size,
                Vertex::STRIDE,
                attribute.byte_offset,
            );
            self.gl.enable_vertex_attrib_array(attribute.index);
        }
        self.gl.bind_vertex_array(None);
        check_error(&*self.gl, "object renderer initialization");

        self.buffers = Some(GpuBuffers {
            vertex_buffer,
            index_buffer,
            vertex_array,
        });

        if !self.mesh.indices.is_empty() {
            self.reload_mesh()?;
        }
        Ok(())
    }

    /// Replaces the owned mesh and uploads it.
    ///
    /// The mesh is validated first; on failure the renderer keeps its
    /// previous mesh, materials, and buffers. The per-submesh material table
    /// is resized to match the new mesh, preserving existing entries and
    /// filling new submeshes with the default material. When the renderer is
    /// initialized, the GPU buffers reflect the new geometry before this
    /// returns; otherwise the upload happens at initialization.
    pub fn set_mesh(&mut self, mesh: Mesh) -> Result<()> {
        mesh.validate()?;
        self.mesh = mesh;
        self.materials
            .resize(self.mesh.submesh_count(), Material::default());
        if self.buffers.is_some() {
            self.reload_mesh()?;
        }
        Ok(())
    }

    /// Re-uploads the full vertex and index arrays.
    ///
    /// Both buffers are replaced wholesale with the static usage hint; there
    /// is no partial update path. Two consecutive calls upload identical
    /// bytes. Mutating the mesh through [`ObjectRenderer::set_mesh`] calls
    /// this automatically.
    pub fn reload_mesh(&self) -> Result<()> {
        let buffers = self.buffers.as_ref().ok_or(GlintError::NotInitialized)?;

        self.gl.bind_vertex_array(Some(buffers.vertex_array.raw()));
        self.gl.bind_array_buffer(Some(buffers.vertex_buffer.raw()));
        self.gl
            .bind_element_buffer(Some(buffers.index_buffer.raw()));
        self.gl.array_buffer_data(
            bytemuck::cast_slice(&self.mesh.vertices),
            BufferUsage::StaticDraw,
        );
        self.gl.element_buffer_data(
            bytemuck::cast_slice(&self.mesh.indices),
            BufferUsage::StaticDraw,
        );
        self.gl.bind_vertex_array(None);
        check_error(&*self.gl, "mesh upload");
        Ok(())
    }

    /// Assigns one material to every submesh.
    pub fn set_material(&mut self, material: Material) {
        for slot in &mut self.materials {
            *slot = material;
        }
    }

    /// Assigns a material to a single submesh.
    ///
    /// An out-of-range index reports [`GlintError::SubmeshOutOfRange`] and
    /// leaves every existing assignment unchanged.
    pub fn set_material_for(&mut self, submesh: usize, material: Material) -> Result<()> {
        let count = self.materials.len();
        match self.materials.get_mut(submesh) {
            Some(slot) => {
                *slot = material;
                Ok(())
            }
            None => Err(GlintError::SubmeshOutOfRange {
                index: submesh,
                count,
            }),
        }
    }

    /// The material of the first submesh.
    pub fn material(&self) -> &Material {
        &self.materials[0]
    }

    pub fn material_for(&self, submesh: usize) -> Option<&Material> {
        self.materials.get(submesh)
    }

    /// Rebinds the shader used at draw time. No relinking or validation
    /// happens; uniform names the new program lacks are skipped silently.
    pub fn set_shader(&mut self, shader: Rc<ShaderProgram>) {
        self.shader = shader;
    }

    pub fn shader(&self) -> &Rc<ShaderProgram> {
        &self.shader
    }

    /// Sets or clears the texture bound to sampler unit 0 during draws.
    pub fn set_texture(&mut self, texture: Option<Rc<Texture>>) {
        self.texture = texture;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// The vertex array handle, once initialized.
    pub fn vertex_array(&self) -> Option<RawVertexArray> {
        self.buffers.as_ref().map(|b| b.vertex_array.raw())
    }

    /// Draws the mesh with the given transforms, camera, and lights.
    ///
    /// Uploads the model/view/projection matrices, the combined
    /// `coordinateTransform`, the normal transform (transpose of the model
    /// inverse; skipped with a debug log when the model matrix is singular),
    /// the camera position, and up to [`MAX_LIGHTS`] lights, then issues one
    /// indexed draw per submesh with that submesh's material uploaded first.
    /// The vertex array and any texture are unbound before returning, also
    /// on the GPU-error path; GL errors are polled and logged, not returned.
    pub fn draw(
        &self,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
        camera: &Camera,
        lights: &[Light],
    ) -> Result<()> {
        let buffers = self.buffers.as_ref().ok_or(GlintError::NotInitialized)?;

        self.shader.bind();

        self.shader.set_mat4("model", model);
        match normal_matrix(model) {
            Some(normal) => self.shader.set_mat3("normalModel", &normal),
            None => log::debug!("model matrix is singular, skipping normal transform upload"),
        }
        self.shader.set_mat4("view", view);
        self.shader.set_mat4("projection", projection);
        let coordinate_transform = projection * view * model;
        self.shader.set_mat4("coordinateTransform", &coordinate_transform);
        self.shader.set_vec3("cameraPos", camera.position_array());

        let light_count = lights.len().min(MAX_LIGHTS);
        if lights.len() > MAX_LIGHTS {
            log::debug!(
                "{} lights passed, uploading the first {MAX_LIGHTS}",
                lights.len()
            );
        }
        self.shader.set_i32("lightCount", light_count as i32);
        for (i, light) in lights[..light_count].iter().enumerate() {
            self.shader
                .set_vec3(&format!("lights[{i}].position"), light.position);
            self.shader
                .set_vec3(&format!("lights[{i}].ambient"), light.ambient);
            self.shader
                .set_vec3(&format!("lights[{i}].diffuse"), light.diffuse);
            self.shader
                .set_vec3(&format!("lights[{i}].specular"), light.specular);
        }

        match &self.texture {
            Some(texture) => {
                texture.bind();
                self.shader.set_i32("baseTexture", 0);
                self.shader.set_i32("useTexture", 1);
            }
            None => self.shader.set_i32("useTexture", 0),
        }

        self.gl.bind_vertex_array(Some(buffers.vertex_array.raw()));
        for (submesh, range) in self.mesh.submesh_ranges().enumerate() {
            if range.is_empty() {
                continue;
            }
            let material = &self.materials[submesh];
            self.shader.set_vec3("material.ambient", material.ambient);
            self.shader.set_vec3("material.diffuse", material.diffuse);
            self.shader.set_vec3("material.specular", material.specular);
            self.shader.set_f32("material.shininess", material.shininess);

            let byte_offset = (range.start * mem::size_of::<u32>()) as i32;
            self.gl.draw_triangles(range.len() as i32, byte_offset);
        }
        self.gl.bind_vertex_array(None);
        if self.texture.is_some() {
            self.gl.bind_texture_2d(None);
        }

        check_error(&*self.gl, "object renderer draw");
        Ok(())
    }
}

/// The transform normals need under `model`: transpose of the inverse,
/// which keeps them perpendicular under non-uniform scale.
///
/// Returns `None` for a singular model matrix, where no such transform
/// exists.
pub fn normal_matrix(model: &Matrix4<f32>) -> Option<Matrix3<f32>> {
    let inverse = model.invert()?;
    let transposed = inverse.transpose();
    Some(Matrix3::from_cols(
        transposed.x.truncate(),
        transposed.y.truncate(),
        transposed.z.truncate(),
    ))
}
