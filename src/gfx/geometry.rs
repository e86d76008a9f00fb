//! # Geometry Sources
//!
//! Generators and loaders that produce ready-to-upload [`Mesh`] values:
//! a unit cube for quick scenes and an OBJ/MTL loader that maps each model
//! in the file to one submesh with its own [`Material`].

use std::path::Path;

use crate::errors::{GlintError, Result};
use crate::gfx::material::Material;
use crate::gfx::mesh::{Mesh, Vertex};

/// A unit cube centered at the origin, from -0.5 to 0.5 on every axis.
///
/// Each face carries four vertices with an outward normal and UVs from 0 to
/// 1, so lighting and texturing work without shared-corner smearing. Vertex
/// colors are white.
pub fn cube() -> Mesh {
    let positions: [[f32; 3]; 24] = [
        // front (+Z)
        [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5],
        // back (-Z)
        [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5],
        // left (-X)
        [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5],
        // right (+X)
        [0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5],
        // top (+Y)
        [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5],
        // bottom (-Y)
        [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5],
    ];

    let normals: [[f32; 3]; 24] = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    let tex_coords: [[f32; 2]; 24] = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let vertices = positions
        .iter()
        .zip(normals.iter())
        .zip(tex_coords.iter())
        .map(|((&position, &normal), &tex_coord)| Vertex {
            position,
            normal,
            color: [1.0, 1.0, 1.0],
            tex_coord,
        })
        .collect();

    // two counter-clockwise triangles per face
    let indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 5, 6, 6, 7, 4, // back
        8, 9, 10, 10, 11, 8, // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    Mesh::new(vertices, indices)
}

/// Loads an OBJ file into a single mesh, one submesh per model in the file.
///
/// Faces are triangulated and re-indexed on load. The returned materials run
/// parallel to the submeshes: each model's MTL entry is translated to a
/// [`Material`], with the usual grey/white fallbacks for fields the library
/// leaves out, and vertex colors take the material's diffuse. Models without
/// faces are skipped with a warning; a file with no drawable geometry at all
/// is an error.
pub fn load_obj(path: impl AsRef<Path>) -> Result<(Mesh, Vec<Material>)> {
    let path = path.as_ref();
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &load_options)?;
    let obj_materials = materials.unwrap_or_else(|error| {
        log::warn!(
            "no usable material library for {}: {error}",
            path.display()
        );
        Vec::new()
    });

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut submesh_starts: Vec<u32> = Vec::new();
    let mut submesh_materials: Vec<Material> = Vec::new();

    for model in &models {
        let obj_mesh = &model.mesh;
        if obj_mesh.indices.is_empty() {
            log::warn!("skipping model '{}': no triangulated faces", model.name);
            continue;
        }

        let material = obj_mesh
            .material_id
            .and_then(|id| obj_materials.get(id))
            .map(material_from_mtl)
            .unwrap_or_default();
        let color = material.diffuse;

        submesh_starts.push(indices.len() as u32);
        let base = vertices.len() as u32;
        indices.extend(obj_mesh.indices.iter().map(|index| index + base));

        let vertex_count = obj_mesh.positions.len() / 3;
        for i in 0..vertex_count {
            let position = [
                obj_mesh.positions[3 * i],
                obj_mesh.positions[3 * i + 1],
                obj_mesh.positions[3 * i + 2],
            ];
            let normal = if obj_mesh.normals.len() >= 3 * i + 3 {
                [
                    obj_mesh.normals[3 * i],
                    obj_mesh.normals[3 * i + 1],
                    obj_mesh.normals[3 * i + 2],
                ]
            } else {
                [0.0, 0.0, 1.0]
            };
            let tex_coord = if obj_mesh.texcoords.len() >= 2 * i + 2 {
                [obj_mesh.texcoords[2 * i], obj_mesh.texcoords[2 * i + 1]]
            } else {
                [0.0, 0.0]
            };
            vertices.push(Vertex {
                position,
                normal,
                color,
                tex_coord,
            });
        }

        submesh_materials.push(material);
    }

    if submesh_starts.is_empty() {
        return Err(GlintError::InvalidMesh(format!(
            "{} contains no drawable geometry",
            path.display()
        )));
    }

    let mesh = Mesh::with_submeshes(vertices, indices, submesh_starts);
    mesh.validate()?;
    Ok((mesh, submesh_materials))
}

fn material_from_mtl(mtl: &tobj::Material) -> Material {
    Material {
        ambient: mtl.ambient.unwrap_or([0.2, 0.2, 0.2]),
        diffuse: mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]),
        specular: mtl.specular.unwrap_or([0.5, 0.5, 0.5]),
        shininess: mtl.shininess.unwrap_or(32.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn cube_has_a_vertex_per_face_corner() {
        let cube = cube();
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 corners
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.submesh_count(), 1);
        cube.validate().unwrap();
    }

    #[test]
    fn cube_normals_are_unit_and_axis_aligned() {
        for vertex in &cube().vertices {
            let [x, y, z] = vertex.normal;
            assert_eq!(x.abs() + y.abs() + z.abs(), 1.0);
        }
    }

    #[test]
    fn cube_fits_the_unit_box() {
        for vertex in &cube().vertices {
            for coordinate in vertex.position {
                assert!(coordinate.abs() <= 0.5);
            }
        }
    }

    fn write_temp_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glint-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn obj_models_become_submeshes() {
        let path = write_temp_obj(
            "two-models.obj",
            "o first\n\
             v 0.0 0.0 0.0\n\
             v 1.0 0.0 0.0\n\
             v 0.0 1.0 0.0\n\
             vn 0.0 0.0 1.0\n\
             f 1//1 2//1 3//1\n\
             o second\n\
             v 0.0 0.0 1.0\n\
             v 1.0 0.0 1.0\n\
             v 0.0 1.0 1.0\n\
             f 4 5 6\n",
        );

        let (mesh, materials) = load_obj(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(mesh.submesh_count(), 2);
        assert_eq!(mesh.submesh_starts, vec![0, 3]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(materials.len(), 2);
        // no mtllib, so both submeshes fall back to the default material
        assert_eq!(materials[0], Material::default());

        let ranges: Vec<_> = mesh.submesh_ranges().collect();
        assert_eq!(ranges, vec![0..3, 3..6]);
        // indices of the second model are rebased past the first's vertices
        assert!(mesh.indices[3..].iter().all(|&i| i >= 3));
    }

    #[test]
    fn obj_without_normals_gets_a_fallback() {
        let path = write_temp_obj(
            "no-normals.obj",
            "v 0.0 0.0 0.0\n\
             v 1.0 0.0 0.0\n\
             v 0.0 1.0 0.0\n\
             f 1 2 3\n",
        );

        let (mesh, _) = load_obj(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[0].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let result = load_obj("/definitely/not/here.obj");
        assert!(matches!(result, Err(GlintError::ModelLoad(_))));
    }
}
