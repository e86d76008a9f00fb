//! Perspective camera.
//!
//! The engine itself only consumes matrices; [`Camera`] is the small helper
//! that produces them. Position and look-at target are public fields so
//! scenes can move the camera every frame without going through setters.

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

#[derive(Debug, Copy, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// A camera at `position` looking at `target`, with a 45 degree vertical
    /// field of view and Y up.
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            position,
            target,
            up: Vector3::unit_y(),
            fovy: Deg(45.0),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        perspective(self.fovy, aspect, self.near, self.far)
    }

    /// World-space position as an array, the form uniforms take.
    pub fn position_array(&self) -> [f32; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 1.5, 4.0), Point3::new(0.0, 0.0, 0.0))
    }
}
