//! Hittable trait and HitRecord for ray-mesh intersection.

use lumen_core::{Light, Mesh, Scene};
use lumen_math::{interpolate, intersect_triangle, Interval, Point3, Ray, Vec3};

/// Record of a ray-mesh intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Interpolated shading normal (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Barycentric weights of the hit inside its triangle
    pub barycentric: Vec3,
    /// Whether the ray hit the side the vertex normals face
    pub front_face: bool,
    /// The mesh that was hit
    pub mesh: &'a Mesh,
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest hit with `t` inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        // Every triangle is tested; there is no acceleration structure.
        for tri in &self.triangles {
            let points = self.triangle_points(tri);
            let Some(hit) = intersect_triangle(ray, &points) else {
                continue;
            };
            if !ray_t.with_max(closest_so_far).contains(hit.t) {
                continue;
            }
            closest_so_far = hit.t;

            let normals = self.triangle_normals(tri);
            let shading = interpolate(hit.barycentric, &normals);
            // Interpolated normals can cancel out; fall back to the face normal.
            let outward = shading.try_normalize().unwrap_or_else(|| {
                (points[1] - points[0])
                    .cross(points[2] - points[0])
                    .normalize_or_zero()
            });

            let mut rec = HitRecord {
                p: ray.at(hit.t),
                normal: outward,
                t: hit.t,
                barycentric: hit.barycentric,
                front_face: true,
                mesh: self,
            };
            rec.set_face_normal(ray, outward);
            closest = Some(rec);
        }

        closest
    }
}

impl Hittable for Light {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.object.hit(ray, ray_t)
    }
}

/// Terminal classification of a traced ray.
#[derive(Debug, Clone, Copy)]
pub enum SceneHit<'a> {
    /// A light surface at or in front of the closest opaque surface.
    Light(&'a Light),
    /// The closest opaque surface.
    Surface(HitRecord<'a>),
    Nothing,
}

/// Closest opaque hit over every object in the scene.
pub fn closest_surface<'a>(scene: &'a Scene, ray: &Ray) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_so_far = Interval::HIT_RANGE.max;

    for object in &scene.objects {
        if let Some(rec) = object.hit(ray, Interval::HIT_RANGE.with_max(closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest
}

/// Intersect a ray against the scene's opaque objects and lights.
///
/// A light wins ties against opaque geometry.
pub fn intersect_scene<'a>(scene: &'a Scene, ray: &Ray) -> SceneHit<'a> {
    let surface = closest_surface(scene, ray);
    let limit = surface.map_or(Interval::HIT_RANGE.max, |rec| rec.t);

    let mut light_hit: Option<(f64, &'a Light)> = None;
    for light in &scene.lights {
        let max = light_hit.map_or(limit, |(t, _)| t);
        if let Some(rec) = light.hit(ray, Interval::HIT_RANGE.with_max(max)) {
            light_hit = Some((rec.t, light));
        }
    }

    match (light_hit, surface) {
        (Some((_, light)), _) => SceneHit::Light(light),
        (None, Some(rec)) => SceneHit::Surface(rec),
        (None, None) => SceneHit::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Color, Material};

    /// Square in the plane z = `z` facing -z, split into two triangles.
    fn wall(name: &str, z: f64, half: f64) -> Mesh {
        let vertices = vec![
            Vec3::new(-half, -half, z),
            Vec3::new(half, -half, z),
            Vec3::new(half, half, z),
            Vec3::new(-half, half, z),
        ];
        Mesh::with_computed_normals(
            name,
            vertices,
            &[[0, 2, 1], [0, 3, 2]],
            Color::new(0.5, 0.5, 0.5),
            Material::diffuse(0.5),
        )
        .unwrap()
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::Z)
    }

    #[test]
    fn test_mesh_hit_closest_triangle() {
        let mesh = wall("wall", 5.0, 1.0);
        let rec = mesh.hit(&forward_ray(), Interval::HIT_RANGE).unwrap();

        assert!((rec.t - 5.0).abs() < 1e-9);
        assert!((rec.p - Vec3::new(0.1, 0.2, 5.0)).length() < 1e-9);
        assert!((rec.barycentric.element_sum() - 1.0).abs() < 1e-9);
        // Normal faces back toward the ray origin
        assert!(rec.normal.dot(Vec3::Z) < 0.0);
        assert!((rec.normal.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_hit_respects_interval() {
        let mesh = wall("wall", 5.0, 1.0);
        assert!(mesh.hit(&forward_ray(), Interval::new(0.001, 4.0)).is_none());
    }

    #[test]
    fn test_back_face_normal_flipped() {
        let mesh = wall("wall", 5.0, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let rec = mesh.hit(&ray, Interval::HIT_RANGE).unwrap();
        assert!(rec.normal.dot(ray.direction) < 0.0);
    }

    #[test]
    fn test_scene_closest_object_wins() {
        let mut scene = Scene::new();
        scene.add_object(wall("far", 8.0, 2.0));
        scene.add_object(wall("near", 3.0, 2.0));

        match intersect_scene(&scene, &forward_ray()) {
            SceneHit::Surface(rec) => assert_eq!(rec.mesh.name, "near"),
            other => panic!("expected surface hit, got {:?}", other),
        }
    }

    #[test]
    fn test_light_in_front_wins() {
        let mut scene = Scene::new();
        scene.add_object(wall("far", 8.0, 2.0));
        scene.add_light(Light::new(wall("lamp", 3.0, 2.0), Color::ONE, 4.0).unwrap());

        assert!(matches!(
            intersect_scene(&scene, &forward_ray()),
            SceneHit::Light(light) if light.object.name == "lamp"
        ));
    }

    #[test]
    fn test_light_behind_surface_is_occluded() {
        let mut scene = Scene::new();
        scene.add_object(wall("near", 3.0, 2.0));
        scene.add_light(Light::new(wall("lamp", 8.0, 2.0), Color::ONE, 4.0).unwrap());

        assert!(matches!(
            intersect_scene(&scene, &forward_ray()),
            SceneHit::Surface(_)
        ));
    }

    #[test]
    fn test_light_tie_goes_to_light() {
        let mut scene = Scene::new();
        scene.add_object(wall("wall", 5.0, 2.0));
        scene.add_light(Light::new(wall("lamp", 5.0, 2.0), Color::ONE, 1.0).unwrap());

        assert!(matches!(
            intersect_scene(&scene, &forward_ray()),
            SceneHit::Light(_)
        ));
    }

    #[test]
    fn test_miss() {
        let mut scene = Scene::new();
        scene.add_object(wall("wall", 5.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(matches!(intersect_scene(&scene, &ray), SceneHit::Nothing));
    }
}
