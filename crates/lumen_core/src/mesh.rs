//! Triangle mesh geometry with per-vertex normals and surface appearance.

use lumen_math::{normalize, Aabb, Point3, Vec3};

use crate::{Color, Material, SceneError, SceneResult};

/// One face of a mesh: indices into the owning mesh's vertex and normal lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [usize; 3],
    pub normals: [usize; 3],
}

impl Triangle {
    pub fn new(vertices: [usize; 3], normals: [usize; 3]) -> Self {
        Self { vertices, normals }
    }

    /// A face whose normal indices coincide with its vertex indices.
    pub fn smooth(vertices: [usize; 3]) -> Self {
        Self::new(vertices, vertices)
    }
}

/// A mesh object: geometry plus base color and material.
///
/// A mesh is immutable once validated; the renderer shares it across sample
/// tasks without locking.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Point3>,
    pub triangles: Vec<Triangle>,
    /// Unit-length per-vertex normals.
    pub normals: Vec<Vec3>,
    pub color: Color,
    pub material: Material,
}

impl Mesh {
    /// Create a mesh, normalizing its normals and checking every index.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point3>,
        normals: Vec<Vec3>,
        triangles: Vec<Triangle>,
        color: Color,
        material: Material,
    ) -> SceneResult<Self> {
        let normals = normals
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()?;

        let mesh = Self {
            name: name.into(),
            vertices,
            triangles,
            normals,
            color,
            material,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Create a mesh from faces alone, generating smooth vertex normals.
    pub fn with_computed_normals(
        name: impl Into<String>,
        vertices: Vec<Point3>,
        faces: &[[usize; 3]],
        color: Color,
        material: Material,
    ) -> SceneResult<Self> {
        let mut mesh = Self {
            name: name.into(),
            vertices,
            triangles: faces.iter().map(|&f| Triangle::smooth(f)).collect(),
            normals: Vec::new(),
            color,
            material,
        };
        mesh.check_vertex_indices()?;
        mesh.compute_normals();
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check index ranges, normal lengths, color and material.
    pub fn validate(&self) -> SceneResult<()> {
        if self.vertices.is_empty() {
            return Err(SceneError::invalid(format!("{}: mesh has no vertices", self.name)));
        }
        self.check_vertex_indices()?;

        for (i, tri) in self.triangles.iter().enumerate() {
            if let Some(&n) = tri.normals.iter().find(|&&n| n >= self.normals.len()) {
                return Err(SceneError::invalid(format!(
                    "{}: triangle {i} references normal {n}, mesh has {}",
                    self.name,
                    self.normals.len()
                )));
            }
        }

        if let Some(n) = self.normals.iter().find(|n| (n.length() - 1.0).abs() > 1e-6) {
            return Err(SceneError::invalid(format!(
                "{}: normal {n} is not unit length",
                self.name
            )));
        }

        if !self.color.is_finite() || self.color.min_element() < 0.0 {
            return Err(SceneError::invalid(format!(
                "{}: color {} must have non-negative channels",
                self.name, self.color
            )));
        }

        self.material.validate(&self.name)
    }

    fn check_vertex_indices(&self) -> SceneResult<()> {
        for (i, tri) in self.triangles.iter().enumerate() {
            if let Some(&v) = tri.vertices.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(SceneError::invalid(format!(
                    "{}: triangle {i} references vertex {v}, mesh has {}",
                    self.name,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Replace the normals with smooth vertex normals.
    ///
    /// Each vertex normal is the normalized sum of the (area weighted) face
    /// normals around it, with counter-clockwise winding facing outward.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in &mut self.triangles {
            let [i0, i1, i2] = tri.vertices;
            let face_normal =
                (self.vertices[i1] - self.vertices[i0]).cross(self.vertices[i2] - self.vertices[i0]);
            for i in tri.vertices {
                normals[i] += face_normal;
            }
            tri.normals = tri.vertices;
        }

        // Default up normal for degenerate cases
        self.normals = normals
            .into_iter()
            .map(|n| normalize(n).unwrap_or(Vec3::Y))
            .collect();
    }

    /// Componentwise min/max over all vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::enclosing(&self.vertices)
            .unwrap_or_else(|| Aabb::from_points(Point3::ZERO, Point3::ZERO))
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Point3 {
        self.bounding_box().centroid()
    }

    /// The three corner positions of a triangle.
    #[inline]
    pub fn triangle_points(&self, tri: &Triangle) -> [Point3; 3] {
        tri.vertices.map(|i| self.vertices[i])
    }

    /// The three vertex normals of a triangle.
    #[inline]
    pub fn triangle_normals(&self, tri: &Triangle) -> [Vec3; 3] {
        tri.normals.map(|i| self.normals[i])
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
