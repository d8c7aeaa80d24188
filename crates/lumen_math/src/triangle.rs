//! Ray/triangle intersection and barycentric coordinates.
//!
//! Uses the Möller-Trumbore algorithm, which solves for the ray parameter and
//! two barycentric weights directly from edge vectors without dividing by the
//! triangle's area.

use crate::{GeometryError, GeometryResult, Interval, Point3, Ray, Vec3, EPSILON};

/// A successful ray/triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit point.
    pub t: f64,
    /// Weights of the three vertices, `(1 - u - v, u, v)`.
    pub barycentric: Vec3,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns `None` when the ray is parallel to the triangle's plane, passes
/// outside the triangle, or meets it outside `(EPSILON, 1 / EPSILON)`.
pub fn intersect_triangle(ray: &Ray, points: &[Point3; 3]) -> Option<TriangleHit> {
    let [v0, v1, v2] = *points;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !Interval::HIT_RANGE.surrounds(t) {
        return None;
    }

    Some(TriangleHit {
        t,
        barycentric: Vec3::new(1.0 - u - v, u, v),
    })
}

/// Barycentric coordinates of `p` from ratios of sub-triangle areas.
///
/// Areas are unsigned, so this only agrees with [`intersect_triangle`] for
/// points inside the triangle; callers use it as an inside-test and cross
/// check. `γ` is derived as `1 - α - β`.
pub fn barycentric_coordinates(points: &[Point3; 3], p: Point3) -> GeometryResult<Vec3> {
    let [a, b, c] = *points;
    let area = (b - a).cross(c - a).length();
    if area < EPSILON {
        return Err(GeometryError::DegenerateGeometry("triangle has zero area"));
    }

    let pa = a - p;
    let pb = b - p;
    let pc = c - p;
    let alpha = pb.cross(pc).length() / area;
    let beta = pc.cross(pa).length() / area;
    Ok(Vec3::new(alpha, beta, 1.0 - alpha - beta))
}

/// Blend three per-vertex attributes with barycentric weights.
#[inline]
pub fn interpolate(barycentric: Vec3, attributes: &[Vec3; 3]) -> Vec3 {
    barycentric.x * attributes[0] + barycentric.y * attributes[1] + barycentric.z * attributes[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri_at_z(z: f64) -> [Point3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn test_hit_through_centroid() {
        let tri = [
            Vec3::new(2.0, 0.5, 3.0),
            Vec3::new(4.0, 1.0, 2.0),
            Vec3::new(3.0, 3.0, 4.0),
        ];
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let direction = Vec3::new(0.3, -0.2, 1.0).normalize();
        let ray = Ray::new(centroid - 5.0 * direction, direction);

        let hit = intersect_triangle(&ray, &tri).expect("ray through centroid must hit");
        assert!((hit.t - 5.0).abs() < 1e-9);

        let b = hit.barycentric;
        assert!((b.x + b.y + b.z - 1.0).abs() < 1e-12);
        for w in [b.x, b.y, b.z] {
            assert!((0.0..=1.0).contains(&w));
            assert!((w - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_miss_outside() {
        let ray = Ray::new(Vec3::new(5.0, 5.0, 0.0), Vec3::Z);
        assert!(intersect_triangle(&ray, &tri_at_z(1.0)).is_none());
    }

    #[test]
    fn test_miss_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(intersect_triangle(&ray, &tri_at_z(1.0)).is_none());
    }

    #[test]
    fn test_miss_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(intersect_triangle(&ray, &tri_at_z(1.0)).is_none());
    }

    #[test]
    fn test_miss_at_origin() {
        // t == 0 is rejected so a bounce never re-hits its own triangle
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(intersect_triangle(&ray, &tri_at_z(1.0)).is_none());
    }

    #[test]
    fn test_both_windings_hit() {
        let tri = tri_at_z(2.0);
        let flipped = [tri[0], tri[2], tri[1]];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(intersect_triangle(&ray, &tri).is_some());
        assert!(intersect_triangle(&ray, &flipped).is_some());
    }

    #[test]
    fn test_one_hot_interpolation_reproduces_vertices() {
        let tri = [
            Vec3::new(0.1, 0.2, 0.3),
            Vec3::new(-4.0, 5.5, 2.0),
            Vec3::new(7.0, -1.0, 0.25),
        ];
        assert_eq!(interpolate(Vec3::new(1.0, 0.0, 0.0), &tri), tri[0]);
        assert_eq!(interpolate(Vec3::new(0.0, 1.0, 0.0), &tri), tri[1]);
        assert_eq!(interpolate(Vec3::new(0.0, 0.0, 1.0), &tri), tri[2]);
    }

    #[test]
    fn test_area_coordinates_match_moller_trumbore() {
        let tri = tri_at_z(3.0);
        let ray = Ray::new(Vec3::new(0.2, -0.1, 0.0), Vec3::Z);
        let hit = intersect_triangle(&ray, &tri).unwrap();

        let by_area = barycentric_coordinates(&tri, ray.at(hit.t)).unwrap();
        assert!((by_area - hit.barycentric).length() < 1e-9);
        assert!((interpolate(by_area, &tri) - ray.at(hit.t)).length() < 1e-9);
    }

    #[test]
    fn test_area_coordinates_at_vertices() {
        let tri = tri_at_z(0.0);
        let b = barycentric_coordinates(&tri, tri[0]).unwrap();
        assert!((b - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_area_coordinates_degenerate() {
        let tri = [Vec3::ZERO, Vec3::X, 2.0 * Vec3::X];
        assert!(barycentric_coordinates(&tri, Vec3::ZERO).is_err());
    }
}
