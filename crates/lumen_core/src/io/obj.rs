//! Wavefront OBJ geometry loading.

use std::path::Path;

use lumen_math::{Point3, Vec3};

use crate::{Color, Material, Mesh, SceneError, SceneResult, Triangle};

/// Load every model in an OBJ file into a single mesh.
///
/// Faces are triangulated. File normals are kept with their own index
/// space; when any model lacks normals, smooth vertex normals are computed
/// for the whole mesh instead.
pub fn load_obj_mesh<P: AsRef<Path>>(
    path: P,
    name: &str,
    color: Color,
    material: Material,
) -> SceneResult<Mesh> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ..Default::default()
        },
    )?;

    if models.is_empty() {
        return Err(SceneError::invalid(format!(
            "{}: no models found in OBJ file",
            path.display()
        )));
    }

    let mut vertices: Vec<Point3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();
    let mut has_normals = true;

    for model in &models {
        let mesh = &model.mesh;
        let vertex_offset = vertices.len();
        let normal_offset = normals.len();

        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
        );
        normals.extend(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64)),
        );

        let model_has_normals = mesh.normal_indices.len() == mesh.indices.len();
        has_normals &= model_has_normals;

        for (face, idx) in mesh.indices.chunks_exact(3).enumerate() {
            let vertex_ids = [
                vertex_offset + idx[0] as usize,
                vertex_offset + idx[1] as usize,
                vertex_offset + idx[2] as usize,
            ];
            let normal_ids = if model_has_normals {
                let n = &mesh.normal_indices[face * 3..face * 3 + 3];
                [
                    normal_offset + n[0] as usize,
                    normal_offset + n[1] as usize,
                    normal_offset + n[2] as usize,
                ]
            } else {
                vertex_ids
            };
            triangles.push(Triangle::new(vertex_ids, normal_ids));
        }
    }

    log::info!(
        "Loaded {}: {} models, {} vertices, {} triangles",
        path.display(),
        models.len(),
        vertices.len(),
        triangles.len()
    );

    if has_normals {
        return Mesh::new(name, vertices, normals, triangles, color, material);
    }

    log::debug!("{}: missing normals, computing smooth normals", path.display());
    let faces: Vec<[usize; 3]> = triangles.iter().map(|t| t.vertices).collect();
    Mesh::with_computed_normals(name, vertices, &faces, color, material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(file_name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lumen_obj_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_with_normals() {
        let path = write_temp(
            "with_normals.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        );
        let mesh = load_obj_mesh(&path, "quad", Color::ONE, Material::default()).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        // Quad is triangulated
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.normals, vec![Vec3::Z]);
        assert_eq!(mesh.triangles[1].normals, [0, 0, 0]);
    }

    #[test]
    fn test_load_computes_missing_normals() {
        let path = write_temp("no_normals.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let mesh = load_obj_mesh(&path, "tri", Color::ONE, Material::default()).unwrap();

        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((n.z - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj_mesh(
            std::env::temp_dir().join("lumen_does_not_exist.obj"),
            "missing",
            Color::ONE,
            Material::default(),
        );
        assert!(matches!(result, Err(SceneError::Obj(_))));
    }
}
