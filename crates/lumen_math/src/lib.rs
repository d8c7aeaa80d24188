//! Lumen geometry kernel.
//!
//! Vector/point algebra on top of glam's `f64` types, plus the closed-form
//! ray intersection tests the renderer is built on: planes, triangles
//! (Möller-Trumbore with barycentric weights) and spheres.

// Re-export glam for convenience
pub use glam::{DMat4, DVec3, DVec4};

mod aabb;
mod error;
mod interval;
mod plane;
mod ray;
mod sphere;
mod triangle;
mod vector;

pub use aabb::Aabb;
pub use error::{GeometryError, GeometryResult};
pub use interval::Interval;
pub use plane::{Plane, PlaneIntersection};
pub use ray::Ray;
pub use sphere::{Sphere, SphereIntersection};
pub use triangle::{barycentric_coordinates, interpolate, intersect_triangle, TriangleHit};
pub use vector::{
    extract_vector, normalize, point_from_slice, vector_from_slice, weighted_sum, Mat4, Point3,
    Vec3, EPSILON,
};
