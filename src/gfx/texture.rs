//! 2D textures.

use std::rc::Rc;

use crate::errors::{GlintError, Result};
use crate::gfx::gl::{check_error, GlApi, RawTexture};
use crate::gfx::handle::TextureObject;

/// An immutable RGBA8 texture uploaded at creation.
///
/// Renderers bind textures to sampler unit 0 during draws; share one across
/// renderers with `Rc<Texture>`.
pub struct Texture {
    gl: Rc<dyn GlApi>,
    texture: TextureObject,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads tightly packed RGBA8 pixels, row by row from the first row.
    pub fn from_rgba8(gl: Rc<dyn GlApi>, width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(GlintError::InvalidTexture(format!(
                "{}x{} RGBA8 needs {expected} bytes, got {}",
                width,
                height,
                pixels.len()
            )));
        }
        let texture = TextureObject::new(gl.clone())?;
        gl.bind_texture_2d(Some(texture.raw()));
        gl.texture_image_2d_rgba(width, height, pixels);
        gl.bind_texture_2d(None);
        check_error(&*gl, "texture upload");
        Ok(Self {
            gl,
            texture,
            width,
            height,
        })
    }

    /// Binds to the active sampler unit.
    pub fn bind(&self) {
        self.gl.bind_texture_2d(Some(self.texture.raw()));
    }

    pub fn raw(&self) -> RawTexture {
        self.texture.raw()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
