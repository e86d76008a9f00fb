//! # Mesh Data Structures
//!
//! This module defines the vertex record and mesh container used for 3D
//! rendering. Vertices use a fixed interleaved layout so every mesh in the
//! engine shares one vertex-array configuration.
//!
//! # Memory Layout
//!
//! A [`Vertex`] is eleven `f32`s (44 bytes) in attribute order: position,
//! normal, color, texture coordinates. The `#[repr(C)]` attribute pins that
//! layout so vertex slices can be uploaded to GPU buffers byte-for-byte.

use std::mem;
use std::ops::Range;

use crate::errors::{GlintError, Result};

/// A single vertex in the fixed interleaved layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Per-vertex RGB color
    pub color: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coord: [f32; 2],
}

/// One attribute slot within the interleaved vertex record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute slot index in the shader
    pub index: u32,
    /// Number of float components
    pub size: i32,
    /// Byte offset of the attribute within the record
    pub byte_offset: i32,
}

impl Vertex {
    /// Floats per vertex across all attributes.
    pub const ATTRIBUTE_SIZE: usize = 11;

    /// Byte stride of one interleaved vertex record.
    pub const STRIDE: i32 = (Self::ATTRIBUTE_SIZE * mem::size_of::<f32>()) as i32;

    /// Returns the fixed four-attribute layout: position, normal, color,
    /// texture coordinates, at their byte offsets within the record.
    pub fn layout() -> [VertexAttribute; 4] {
        let float = mem::size_of::<f32>() as i32;
        [
            VertexAttribute {
                index: 0,
                size: 3,
                byte_offset: 0,
            },
            VertexAttribute {
                index: 1,
                size: 3,
                byte_offset: 3 * float,
            },
            VertexAttribute {
                index: 2,
                size: 3,
                byte_offset: 6 * float,
            },
            VertexAttribute {
                index: 3,
                size: 2,
                byte_offset: 9 * float,
            },
        ]
    }
}

/// Triangle mesh data in CPU memory.
///
/// Indices reference `vertices` in groups of three. `submesh_starts` marks
/// where each submesh begins in the index array; a mesh always has at least
/// one submesh, starting at 0. Submeshes exist so one mesh can be drawn in
/// ranges with a different material per range.
///
/// The fields are plain data; nothing here touches the GPU. Validation runs
/// when a mesh is handed to an [`crate::gfx::renderer::ObjectRenderer`], and
/// [`Mesh::validate`] can be called directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub submesh_starts: Vec<u32>,
}

impl Mesh {
    /// Creates a single-submesh mesh.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            submesh_starts: vec![0],
        }
    }

    /// Creates a mesh with explicit submesh start offsets into `indices`.
    pub fn with_submeshes(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        submesh_starts: Vec<u32>,
    ) -> Self {
        Self {
            vertices,
            indices,
            submesh_starts,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn submesh_count(&self) -> usize {
        self.submesh_starts.len()
    }

    /// Iterates the index range of each submesh, in order.
    pub fn submesh_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let end = self.indices.len();
        self.submesh_starts
            .iter()
            .enumerate()
            .map(move |(i, &start)| {
                let stop = self
                    .submesh_starts
                    .get(i + 1)
                    .map(|&next| next as usize)
                    .unwrap_or(end);
                start as usize..stop
            })
    }

    /// Checks the structural invariants the GPU upload relies on.
    ///
    /// - the index count is a multiple of three
    /// - every index references an existing vertex
    /// - submesh starts begin at 0, ascend strictly, stay within the index
    ///   array, and land on triangle boundaries
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(GlintError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertices.len() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(GlintError::InvalidMesh(format!(
                "index {bad} out of bounds for {vertex_count} vertices"
            )));
        }
        match self.submesh_starts.first() {
            None => {
                return Err(GlintError::InvalidMesh(
                    "mesh has no submeshes".to_owned(),
                ));
            }
            Some(&first) if first != 0 => {
                return Err(GlintError::InvalidMesh(format!(
                    "first submesh starts at {first}, expected 0"
                )));
            }
            Some(_) => {}
        }
        for pair in self.submesh_starts.windows(2) {
            if pair[1] <= pair[0] {
                return Err(GlintError::InvalidMesh(format!(
                    "submesh starts not ascending: {} then {}",
                    pair[0], pair[1]
                )));
            }
        }
        for &start in &self.submesh_starts {
            if start % 3 != 0 {
                return Err(GlintError::InvalidMesh(format!(
                    "submesh start {start} is not on a triangle boundary"
                )));
            }
            if start as usize > self.indices.len()
                || (start != 0 && start as usize == self.indices.len())
            {
                return Err(GlintError::InvalidMesh(format!(
                    "submesh start {start} past the end of {} indices",
                    self.indices.len()
                )));
            }
        }
        Ok(())
    }
}

impl Default for Mesh {
    /// An empty mesh with one (empty) submesh.
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32) -> Vertex {
        Vertex {
            position: [x, 0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            color: [1.0, 1.0, 1.0],
            tex_coord: [0.0, 0.0],
        }
    }

    fn triangle_mesh() -> Mesh {
        Mesh::new(vec![vertex(0.0), vertex(1.0), vertex(2.0)], vec![0, 1, 2])
    }

    #[test]
    fn vertex_record_is_eleven_floats() {
        assert_eq!(mem::size_of::<Vertex>(), Vertex::ATTRIBUTE_SIZE * 4);
        assert_eq!(Vertex::STRIDE, 44);
    }

    #[test]
    fn layout_matches_the_interleaved_offsets() {
        let layout = Vertex::layout();
        assert_eq!(layout[0].byte_offset, 0);
        assert_eq!(layout[1].byte_offset, 12);
        assert_eq!(layout[2].byte_offset, 24);
        assert_eq!(layout[3].byte_offset, 36);
        assert_eq!(layout[3].size, 2);
        let slots: Vec<u32> = layout.iter().map(|a| a.index).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }

    #[test]
    fn valid_triangle_passes() {
        assert!(triangle_mesh().validate().is_ok());
    }

    #[test]
    fn default_mesh_is_valid_and_has_one_submesh() {
        let mesh = Mesh::default();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.submesh_count(), 1);
        assert_eq!(mesh.submesh_ranges().next(), Some(0..0));
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let mut mesh = triangle_mesh();
        mesh.indices = vec![0, 1, 3];
        assert!(matches!(
            mesh.validate(),
            Err(GlintError::InvalidMesh(_))
        ));
    }

    #[test]
    fn ragged_triangle_list_is_rejected() {
        let mut mesh = triangle_mesh();
        mesh.indices = vec![0, 1];
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn submesh_starts_must_ascend_from_zero() {
        let vertices = vec![vertex(0.0), vertex(1.0), vertex(2.0), vertex(3.0)];
        let indices = vec![0, 1, 2, 1, 2, 3];

        let mesh = Mesh::with_submeshes(vertices.clone(), indices.clone(), vec![3, 0]);
        assert!(mesh.validate().is_err());

        let mesh = Mesh::with_submeshes(vertices.clone(), indices.clone(), vec![0, 2]);
        assert!(mesh.validate().is_err(), "start off triangle boundary");

        let mesh = Mesh::with_submeshes(vertices.clone(), indices.clone(), vec![0, 6]);
        assert!(mesh.validate().is_err(), "empty trailing submesh");

        let mesh = Mesh::with_submeshes(vertices, indices, vec![0, 3]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn submesh_ranges_cover_the_index_array() {
        let vertices = vec![vertex(0.0), vertex(1.0), vertex(2.0), vertex(3.0)];
        let indices = vec![0, 1, 2, 1, 2, 3, 0, 2, 3];
        let mesh = Mesh::with_submeshes(vertices, indices, vec![0, 3]);
        let ranges: Vec<_> = mesh.submesh_ranges().collect();
        assert_eq!(ranges, vec![0..3, 3..9]);
    }
}
