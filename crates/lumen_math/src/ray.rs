use crate::{Point3, Vec3};

/// A ray in 3D space with an origin and a direction.
///
/// Rays are used for raytracing - they represent a half-line starting at
/// `origin` and traveling in `direction`. The direction is not required to be
/// unit length, but every ray the renderer builds is normalized so that `t`
/// measures distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_walks_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X);
        assert_eq!(ray.at(0.0), ray.origin);
        assert_eq!(ray.at(2.0), Vec3::new(3.0, 2.0, 3.0));
        assert_eq!(ray.at(-1.0), Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_unit_direction_measures_distance() {
        let direction = Vec3::new(1.0, 1.0, 1.0).normalize();
        let ray = Ray::new(Vec3::ZERO, direction);
        assert!((ray.at(5.0).length() - 5.0).abs() < 1e-12);
    }
}
