//! Implicit planes `Ax + By + Cz + D = 0`.

use crate::{GeometryError, GeometryResult, Point3, Ray, Vec3, EPSILON};

/// A plane stored by its implicit coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Outcome of intersecting a ray with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneIntersection {
    /// The ray crosses the plane at parameter `t` (which may be negative).
    Hit(f64),
    /// The ray lies inside the plane; every `t` is a solution.
    Contains,
    /// The ray is parallel to the plane and off it.
    Miss,
}

impl Plane {
    /// Derive the plane through three points.
    ///
    /// The normal is `(p1 - p0) x (p2 - p0)`; collinear points have no normal
    /// and are rejected.
    pub fn from_points(p0: Point3, p1: Point3, p2: Point3) -> GeometryResult<Self> {
        let normal = (p1 - p0).cross(p2 - p0);
        if normal.length() < EPSILON {
            return Err(GeometryError::DegenerateGeometry("plane points are collinear"));
        }
        Ok(Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(p0),
        })
    }

    /// The (unnormalized) plane normal `(A, B, C)`.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }

    /// Evaluate `Ax + By + Cz + D` at a point.
    #[inline]
    pub fn evaluate(&self, p: Point3) -> f64 {
        self.normal().dot(p) + self.d
    }

    /// Intersect a ray with this plane: `t = -(N.O + D) / (N.dir)`.
    pub fn intersect(&self, ray: &Ray) -> PlaneIntersection {
        let projection = self.normal().dot(ray.direction);
        let offset = self.evaluate(ray.origin);

        if projection.abs() < EPSILON {
            if offset.abs() < EPSILON {
                return PlaneIntersection::Contains;
            }
            return PlaneIntersection::Miss;
        }

        PlaneIntersection::Hit(-offset / projection)
    }
}
