//! Emissive geometry.

use lumen_math::Point3;

use crate::{Color, Mesh, SceneError, SceneResult};

/// A light source: an emissive mesh with a color and intensity.
///
/// Lights are intersected with the same routines as opaque meshes; a path
/// that reaches one ends there with the light's radiance.
#[derive(Debug, Clone)]
pub struct Light {
    pub object: Mesh,
    pub color: Color,
    pub intensity: f64,
}

impl Light {
    /// Create a new light, validating its geometry and emission.
    pub fn new(object: Mesh, color: Color, intensity: f64) -> SceneResult<Self> {
        let light = Self {
            object,
            color,
            intensity,
        };
        light.validate()?;
        Ok(light)
    }

    pub fn validate(&self) -> SceneResult<()> {
        self.object.validate()?;
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(SceneError::invalid(format!(
                "{}: light intensity must be a non-negative number, got {}",
                self.object.name, self.intensity
            )));
        }
        if !self.color.is_finite() || self.color.min_element() < 0.0 {
            return Err(SceneError::invalid(format!(
                "{}: light color {} must have non-negative channels",
                self.object.name, self.color
            )));
        }
        Ok(())
    }

    /// Radiance returned by a path that hits this light.
    #[inline]
    pub fn radiance(&self) -> Color {
        self.color * self.intensity
    }

    /// Centre of the emissive geometry's bounding box.
    pub fn center(&self) -> Point3 {
        self.object.center()
    }
}
