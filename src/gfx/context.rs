//! Shared graphics state handed to scenes.

use std::rc::Rc;

use crate::gfx::gl::GlApi;
use crate::gfx::material::Material;
use crate::gfx::renderer::ObjectRenderer;
use crate::gfx::shader::ShaderProgram;

/// Everything a scene needs to create and drive renderers: the graphics
/// backend, the engine's default shader, and the default material.
///
/// Handed to [`crate::scene::Scene::load`] and
/// [`crate::scene::Scene::draw`]; scenes never touch the GL context type
/// directly.
pub struct GraphicsContext {
    gl: Rc<dyn GlApi>,
    default_shader: Rc<ShaderProgram>,
    default_material: Material,
}

impl GraphicsContext {
    pub fn new(gl: Rc<dyn GlApi>, default_shader: Rc<ShaderProgram>) -> Self {
        Self {
            gl,
            default_shader,
            default_material: Material::default(),
        }
    }

    pub fn gl(&self) -> &Rc<dyn GlApi> {
        &self.gl
    }

    /// The Phong shader loaded at startup.
    pub fn default_shader(&self) -> Rc<ShaderProgram> {
        self.default_shader.clone()
    }

    pub fn default_material(&self) -> Material {
        self.default_material
    }

    /// Clears the color and depth buffers to the given color.
    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear(r, g, b, a);
    }

    /// A renderer wired to this context and the default shader. The caller
    /// still owns initialization and mesh upload.
    pub fn new_renderer(&self) -> ObjectRenderer {
        ObjectRenderer::new(self.gl.clone(), self.default_shader.clone())
    }
}
