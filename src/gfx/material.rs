//! Phong surface materials.
//!
//! A [`Material`] is a plain value: ambient, diffuse, and specular
//! reflectivity plus a shininess exponent, uploaded by name into the bound
//! shader at draw time. Renderers keep one material per submesh and copy
//! materials freely; there are no GPU resources to manage here.

/// Phong material parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// Reflectivity under ambient light
    pub ambient: [f32; 3],
    /// Reflectivity under direct light
    pub diffuse: [f32; 3],
    /// Highlight color
    pub specular: [f32; 3],
    /// Highlight tightness exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }
}

impl Material {
    pub fn new(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// A material tinted toward one color: the diffuse term carries the
    /// color, ambient is a dimmed copy, specular stays neutral.
    pub fn colored(color: [f32; 3]) -> Self {
        Self {
            ambient: [color[0] * 0.25, color[1] * 0.25, color[2] * 0.25],
            diffuse: color,
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }

    /// Builder pattern: set the shininess exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Builder pattern: set the specular color
    pub fn with_specular(mut self, specular: [f32; 3]) -> Self {
        self.specular = specular;
        self
    }
}
