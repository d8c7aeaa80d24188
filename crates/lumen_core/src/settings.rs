//! Render parameters.

use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// Concurrent sample computations allowed per pixel by default.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 12;

/// Which light transport algorithm fills the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Recursive stochastic path tracing.
    #[default]
    PathTracing,
    /// One ray per sample, nearest surface's base color.
    RayCasting,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: usize,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Field of view in degrees; the camera's own value is used when unset.
    pub fov: Option<f64>,
    /// Upper bound on concurrently computed samples.
    pub max_in_flight: usize,
    /// Seed for reproducible renders; a fresh one is drawn when unset.
    pub seed: Option<u64>,
    pub integrator: Integrator,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            samples_per_pixel: 16,
            max_depth: 4,
            fov: None,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            seed: None,
            integrator: Integrator::PathTracing,
        }
    }
}

impl RenderSettings {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: usize, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::invalid("samples per pixel must be at least 1"));
        }
        if self.max_in_flight == 0 {
            return Err(SceneError::invalid("max in-flight samples must be at least 1"));
        }
        if let Some(fov) = self.fov {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(SceneError::invalid(format!(
                    "field of view must be in (0, 180) degrees, got {fov}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RenderSettings::default();
        assert_eq!(settings.max_in_flight, 12);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(RenderSettings::default().with_resolution(0, 10).validate().is_err());
        assert!(RenderSettings::default().with_quality(0, 3).validate().is_err());

        let settings = RenderSettings {
            max_in_flight: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = RenderSettings {
            fov: Some(0.0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{"width": 64, "integrator": "ray_casting"}"#).unwrap();
        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 200);
        assert_eq!(settings.integrator, Integrator::RayCasting);
    }
}
