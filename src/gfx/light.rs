//! Point lights.

/// Most lights a single draw call uploads; extras are ignored.
pub const MAX_LIGHTS: usize = 4;

/// A point light with per-term Phong colors.
///
/// Lights are plain values owned by the scene; a slice of them is passed
/// into every draw call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for Light {
    /// A soft grey fill light above the origin.
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 0.0],
            ambient: [0.5, 0.5, 0.5],
            diffuse: [0.5, 0.5, 0.5],
            specular: [0.7, 0.5, 0.5],
        }
    }
}

impl Light {
    /// The default light moved to `position`.
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
