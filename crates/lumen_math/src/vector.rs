//! Vector and point algebra.
//!
//! Directions and locations are both stored as `glam::DVec3`; the aliases
//! below keep signatures readable. Raw coordinate slices coming from loaders
//! are converted here, which is where arity is checked.

use crate::{GeometryError, GeometryResult};

/// A direction or magnitude in 3D space.
pub type Vec3 = glam::DVec3;

/// A location in 3D space.
pub type Point3 = glam::DVec3;

/// 4x4 homogeneous matrix.
pub type Mat4 = glam::DMat4;

/// Tolerance shared by every intersection and normalization test.
pub const EPSILON: f64 = 1e-7;

/// Normalize a vector, failing when its norm is too small to divide by.
pub fn normalize(v: Vec3) -> GeometryResult<Vec3> {
    let norm = v.length();
    if norm < EPSILON || !norm.is_finite() {
        return Err(GeometryError::DegenerateGeometry("cannot normalize a zero-length vector"));
    }
    Ok(v / norm)
}

/// Weighted sum `k1 * v1 + k2 * v2`.
#[inline]
pub fn weighted_sum(v1: Vec3, v2: Vec3, k1: f64, k2: f64) -> Vec3 {
    k1 * v1 + k2 * v2
}

/// Build a vector from a raw coordinate slice.
pub fn vector_from_slice(coords: &[f64]) -> GeometryResult<Vec3> {
    match coords {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(GeometryError::DimensionMismatch {
            expected: 3,
            found: coords.len(),
        }),
    }
}

/// Build a point from a raw coordinate slice.
pub fn point_from_slice(coords: &[f64]) -> GeometryResult<Point3> {
    vector_from_slice(coords)
}

/// Direction from `a` to `b` for raw coordinate slices of equal arity.
pub fn extract_vector(a: &[f64], b: &[f64]) -> GeometryResult<Vec3> {
    if a.len() != b.len() {
        return Err(GeometryError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(point_from_slice(b)? - point_from_slice(a)?)
}
