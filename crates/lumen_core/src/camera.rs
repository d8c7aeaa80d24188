//! Pinhole camera with an explicit orthonormal basis.

use lumen_math::{normalize, Aabb, GeometryError, Mat4, Point3, Vec3};

use crate::{SceneError, SceneResult};

/// Field of view given to look-at cameras, in degrees.
pub const DEFAULT_FOV: f64 = 50.0;

/// Distance from the camera to its screen for look-at cameras.
pub const DEFAULT_NEAR: f64 = 1.0;

/// Tolerance for the orthonormality check on camera bases.
const BASIS_TOLERANCE: f64 = 1e-6;

/// Camera for generating rays into the scene.
///
/// `look` points into the scene, `right` and `up` span the screen. Camera
/// space is therefore `x = right`, `y = up`, `z = look`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3,
    pub right: Vec3,
    pub up: Vec3,
    pub look: Vec3,
    /// Field of view in degrees.
    pub fov: f64,
    /// Distance to the screen.
    pub near: f64,
}

impl Camera {
    /// Create a camera from an explicit basis.
    ///
    /// The basis vectors are normalized; they must already be mutually
    /// orthogonal.
    pub fn new(
        position: Point3,
        look: Vec3,
        up: Vec3,
        right: Vec3,
        fov: f64,
        near: f64,
    ) -> SceneResult<Self> {
        let camera = Self {
            position,
            right: normalize(right)?,
            up: normalize(up)?,
            look: normalize(look)?,
            fov,
            near,
        };
        camera.validate()?;
        Ok(camera)
    }

    /// Build a camera at `position` looking at `target`.
    ///
    /// `right = normalize(Y x look)`, `up = normalize(look x right)`. Fails
    /// when the view direction is parallel to world up.
    pub fn from_look_at(position: Point3, target: Point3) -> SceneResult<Self> {
        let look = normalize(target - position)?;
        let right = normalize(Vec3::Y.cross(look)).map_err(|_| {
            GeometryError::DegenerateGeometry("camera looks along the world up axis")
        })?;
        let up = normalize(look.cross(right))?;

        Ok(Self {
            position,
            right,
            up,
            look,
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
        })
    }

    /// Aim a look-at camera at the centre of a bounding box.
    pub fn frame_bounding_box(position: Point3, bbox: &Aabb) -> SceneResult<Self> {
        Self::from_look_at(position, bbox.centroid())
    }

    /// Replace the field of view.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Check that the basis is orthonormal and the lens parameters are usable.
    pub fn validate(&self) -> SceneResult<()> {
        let basis = [("right", self.right), ("up", self.up), ("look", self.look)];
        for (name, v) in basis {
            if (v.length() - 1.0).abs() > BASIS_TOLERANCE {
                return Err(SceneError::invalid(format!(
                    "camera {name} vector {v} is not unit length"
                )));
            }
        }

        let pairs = [
            ("right", self.right, "up", self.up),
            ("right", self.right, "look", self.look),
            ("up", self.up, "look", self.look),
        ];
        for (na, a, nb, b) in pairs {
            if a.dot(b).abs() > BASIS_TOLERANCE {
                return Err(SceneError::invalid(format!(
                    "camera {na} and {nb} vectors are not orthogonal"
                )));
            }
        }

        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SceneError::invalid(format!(
                "camera field of view must be in (0, 180) degrees, got {}",
                self.fov
            )));
        }
        if !self.near.is_finite() || self.near <= 0.0 {
            return Err(SceneError::invalid(format!(
                "camera near distance must be positive, got {}",
                self.near
            )));
        }
        if !self.position.is_finite() {
            return Err(SceneError::invalid("camera position is not finite"));
        }
        Ok(())
    }

    /// Camera-to-world transform.
    ///
    /// The rotation block's columns are `right, up, look`; the translation
    /// column is the camera position.
    pub fn to_world_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.look.extend(0.0),
            self.position.extend(1.0),
        )
    }
}
