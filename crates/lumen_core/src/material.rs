//! Surface reflectance coefficients.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Convert an 8-bit RGB triple into a linear `[0, 1]` color.
pub fn color_from_rgb8(rgb: [u8; 3]) -> Color {
    Color::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0
}

/// Reflectance coefficients of a surface.
///
/// The path tracer chooses between the diffuse and specular lobes in
/// proportion to `diffuse` and `specular`. `ambient`, `transmission` and
/// `specular_decay` are carried for scene round-tripping; transmission is
/// never sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub transmission: f64,
    pub specular_decay: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.0,
            diffuse: 1.0,
            specular: 0.0,
            transmission: 0.0,
            specular_decay: 1.0,
        }
    }
}

impl Material {
    /// A purely diffuse material with the given reflectance.
    pub fn diffuse(k_d: f64) -> Self {
        Self {
            diffuse: k_d,
            ..Default::default()
        }
    }

    /// A material mixing the diffuse and specular lobes.
    pub fn glossy(k_d: f64, k_s: f64, specular_decay: f64) -> Self {
        Self {
            diffuse: k_d,
            specular: k_s,
            specular_decay,
            ..Default::default()
        }
    }

    /// Combined weight of the two sampled lobes.
    #[inline]
    pub fn lobe_total(&self) -> f64 {
        self.diffuse + self.specular
    }

    /// Reject coefficients the sampler cannot use.
    ///
    /// Sums above one are allowed but logged: they make a surface return more
    /// energy than it receives, and are left as configured.
    pub fn validate(&self, owner: &str) -> SceneResult<()> {
        let coefficients = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("transmission", self.transmission),
            ("specular_decay", self.specular_decay),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::invalid(format!(
                    "{owner}: material coefficient {name} must be a non-negative number, got {value}"
                )));
            }
        }

        let total = self.ambient + self.diffuse + self.specular + self.transmission;
        if total > 1.0 {
            log::warn!("{owner}: material coefficients sum to {total:.3} (> 1), surface is over-bright");
        }
        Ok(())
    }
}
