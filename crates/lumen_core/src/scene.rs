//! The aggregated, read-only scene handed to the renderer.

use lumen_math::{Aabb, Point3};

use crate::{Light, Mesh, SceneResult};

/// A set of opaque meshes and a set of lights.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<Mesh>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an opaque object.
    pub fn add_object(&mut self, object: Mesh) {
        self.objects.push(object);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Validate every object and light.
    pub fn validate(&self) -> SceneResult<()> {
        for object in &self.objects {
            object.validate()?;
        }
        for light in &self.lights {
            light.validate()?;
        }
        log::debug!(
            "Scene: {} objects ({} triangles), {} lights",
            self.objects.len(),
            self.triangle_count(),
            self.lights.len()
        );
        Ok(())
    }

    /// Total number of opaque triangles.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(Mesh::triangle_count).sum()
    }

    /// Bounds of every object and light. `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.objects
            .iter()
            .chain(self.lights.iter().map(|l| &l.object))
            .map(Mesh::bounding_box)
            .reduce(|a, b| Aabb::surrounding(&a, &b))
    }

    /// The light whose centre is closest to `p`.
    pub fn nearest_light(&self, p: Point3) -> Option<&Light> {
        self.lights.iter().min_by(|a, b| {
            a.center()
                .distance_squared(p)
                .total_cmp(&b.center().distance_squared(p))
        })
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};
    use lumen_math::Vec3;

    fn tri_at(offset: Vec3) -> Mesh {
        Mesh::with_computed_normals(
            "tri",
            vec![offset, offset + Vec3::X, offset + Vec3::Y],
            &[[0, 1, 2]],
            Color::ONE,
            Material::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.bounding_box().is_none());

        scene.add_object(tri_at(Vec3::ZERO));
        scene.add_object(tri_at(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(scene.triangle_count(), 2);
        assert!(scene.validate().is_ok());

        let bbox = scene.bounding_box().unwrap();
        assert_eq!(bbox.max, Vec3::new(6.0, 1.0, 0.0));
    }

    #[test]
    fn test_nearest_light() {
        let mut scene = Scene::new();
        assert!(scene.nearest_light(Vec3::ZERO).is_none());

        scene.add_light(Light::new(tri_at(Vec3::new(10.0, 0.0, 0.0)), Color::ONE, 1.0).unwrap());
        scene.add_light(Light::new(tri_at(Vec3::new(-2.0, 0.0, 0.0)), Color::ONE, 3.0).unwrap());

        let nearest = scene.nearest_light(Vec3::ZERO).unwrap();
        assert_eq!(nearest.intensity, 3.0);
    }
}
