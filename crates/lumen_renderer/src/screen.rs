//! Virtual screen: maps pixel addresses to world-space rays.

use lumen_core::Camera;
use lumen_math::{normalize, Mat4, Point3, Ray};

use crate::{RenderError, RenderResult};

/// Pixel grid in front of a camera.
#[derive(Debug, Clone)]
pub struct Screen {
    pub width: usize,
    pub height: usize,
    /// Camera-to-world transform
    to_world: Mat4,
    origin: Point3,
    near: f64,
}

impl Screen {
    /// Create a screen of `width` x `height` pixels for `camera`.
    pub fn new(camera: &Camera, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            to_world: camera.to_world_matrix(),
            origin: camera.position,
            near: camera.near,
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// World-space ray through pixel `(row, col)` offset by a sub-pixel jitter.
    ///
    /// `jitter_x` and `jitter_y` are in `[0, 1)`; `0.5` hits the pixel centre.
    /// Row 0 is the top of the image. Identical inputs always give an
    /// identical ray.
    pub fn pixel_to_world_ray(
        &self,
        row: usize,
        col: usize,
        jitter_x: f64,
        jitter_y: f64,
        fov_degrees: f64,
    ) -> RenderResult<Ray> {
        if row >= self.height || col >= self.width {
            return Err(RenderError::InvalidPixelCoordinate {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }

        let ndc_x = (col as f64 + jitter_x) / self.width as f64;
        let ndc_y = (row as f64 + jitter_y) / self.height as f64;

        let half_height = (fov_degrees.to_radians() / 2.0).tan() * self.near;
        let camera_point = Point3::new(
            (2.0 * ndc_x - 1.0) * self.aspect_ratio() * half_height,
            (1.0 - 2.0 * ndc_y) * half_height,
            self.near,
        );

        let world_point = self.to_world.transform_point3(camera_point);
        let direction = normalize(world_point - self.origin)?;
        Ok(Ray::new(self.origin, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    fn forward_camera() -> Camera {
        Camera::from_look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0))
            .unwrap()
            .with_fov(90.0)
    }

    #[test]
    fn test_center_ray_follows_look() {
        let screen = Screen::new(&forward_camera(), 1, 1);
        let ray = screen.pixel_to_world_ray(0, 0, 0.5, 0.5, 90.0).unwrap();

        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_ray_spans_fov() {
        let screen = Screen::new(&forward_camera(), 2, 2);

        // Top-left corner of the top-left pixel sits at 45 degrees on both axes
        let ray = screen.pixel_to_world_ray(0, 0, 0.0, 0.0, 90.0).unwrap();
        let expected = Vec3::new(-1.0, 1.0, 1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-9);
    }

    #[test]
    fn test_rows_grow_downward() {
        let screen = Screen::new(&forward_camera(), 4, 4);
        let top = screen.pixel_to_world_ray(0, 2, 0.5, 0.5, 60.0).unwrap();
        let bottom = screen.pixel_to_world_ray(3, 2, 0.5, 0.5, 60.0).unwrap();
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal_span() {
        let screen = Screen::new(&forward_camera(), 200, 100);
        let left = screen.pixel_to_world_ray(50, 0, 0.0, 0.5, 90.0).unwrap();
        // x/z of the left edge is aspect * tan(45)
        assert!((left.direction.x / left.direction.z + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_is_pure() {
        let screen = Screen::new(&forward_camera(), 32, 24);
        let a = screen.pixel_to_world_ray(7, 11, 0.25, 0.75, 50.0).unwrap();
        let b = screen.pixel_to_world_ray(7, 11, 0.25, 0.75, 50.0).unwrap();
        assert_eq!(a, b);
        assert!((a.direction.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_bounds_pixel() {
        let screen = Screen::new(&forward_camera(), 4, 3);
        let err = screen.pixel_to_world_ray(3, 0, 0.5, 0.5, 90.0).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidPixelCoordinate { row: 3, col: 0, width: 4, height: 3 }
        ));
        assert!(screen.pixel_to_world_ray(0, 4, 0.5, 0.5, 90.0).is_err());
    }
}
