//! Analytic ray/sphere intersection.

use crate::{Point3, Ray, EPSILON};

/// A sphere given by centre and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
}

/// Real roots of the ray/sphere quadratic, smallest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SphereIntersection {
    /// Negative discriminant.
    Miss,
    /// Discriminant within tolerance of zero: the ray grazes the sphere.
    Tangent(f64),
    /// The ray enters at the first parameter and leaves at the second.
    Through(f64, f64),
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Solve `t^2 |d|^2 + 2t d.(O - C) + |O - C|^2 - r^2 = 0`.
    ///
    /// Roots are reported whatever their sign; the caller decides which
    /// parameters are in front of the ray. The tangent test is relative to
    /// the magnitude of the two discriminant terms.
    pub fn intersect(&self, ray: &Ray) -> SphereIntersection {
        if ray.direction.length() < EPSILON {
            return SphereIntersection::Miss;
        }

        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        let tolerance = EPSILON * (half_b * half_b).max((a * c).abs());
        if discriminant.abs() <= tolerance {
            return SphereIntersection::Tangent(-half_b / a);
        }
        if discriminant < 0.0 {
            return SphereIntersection::Miss;
        }

        let sqrtd = discriminant.sqrt();
        SphereIntersection::Through((-half_b - sqrtd) / a, (-half_b + sqrtd) / a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_ray_through_center() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        match sphere.intersect(&ray) {
            SphereIntersection::Through(t0, t1) => {
                // Symmetric about the distance to the centre
                assert!((t0 - 8.0).abs() < 1e-12);
                assert!((t1 - 12.0).abs() < 1e-12);
                assert!(((t0 + t1) / 2.0 - 10.0).abs() < 1e-12);
            }
            other => panic!("expected two roots, got {:?}", other),
        }
    }

    #[test]
    fn test_tangent_ray() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z);
        assert_eq!(sphere.intersect(&ray), SphereIntersection::Tangent(5.0));
    }

    #[test]
    fn test_oblique_tangent_rays() {
        let sphere = Sphere::new(Vec3::new(0.3, -1.2, 2.5), 1.7);

        for k in 0..19 {
            let theta = k as f64 * 0.31;
            let n = Vec3::new(theta.cos() * 0.8, theta.sin(), 0.6 - 0.1 * theta).normalize();
            let touch = sphere.center + n * sphere.radius;
            let d = n.cross(Vec3::new(0.2, 0.9, -0.4)).normalize();
            let ray = Ray::new(touch - d * 5.0, d);

            match sphere.intersect(&ray) {
                SphereIntersection::Tangent(t) => assert!((t - 5.0).abs() < 1e-6),
                other => panic!("angle {}: expected tangent, got {:?}", theta, other),
            }
        }
    }

    #[test]
    fn test_near_tangent_ray_still_passes_through() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(0.99, 0.0, 0.0), Vec3::Z);
        assert!(matches!(sphere.intersect(&ray), SphereIntersection::Through(_, _)));
    }

    #[test]
    fn test_zero_direction_misses() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO);
        assert_eq!(sphere.intersect(&ray), SphereIntersection::Miss);
    }

    #[test]
    fn test_ray_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z);
        assert_eq!(sphere.intersect(&ray), SphereIntersection::Miss);
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, 2.0 * Vec3::Z);
        assert_eq!(sphere.intersect(&ray), SphereIntersection::Through(4.0, 6.0));
    }
}
