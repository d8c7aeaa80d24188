//! Bounce sampling for the two reflectance lobes.

use lumen_core::{Material, Scene};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::HitRecord;

/// Which reflectance lobe a bounce samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lobe {
    Diffuse,
    Specular,
}

/// Pick a lobe with `r ~ U(0, k_d + k_s)`; `r <= k_d` is diffuse.
///
/// A material with both coefficients at zero always scatters diffusely.
pub fn choose_lobe(material: &Material, rng: &mut dyn RngCore) -> Lobe {
    let r = gen_f64(rng) * material.lobe_total();
    if r <= material.diffuse {
        Lobe::Diffuse
    } else {
        Lobe::Specular
    }
}

/// Direction of the next bounce from `rec`.
pub fn scatter(
    ray_in: &Ray,
    rec: &HitRecord,
    scene: &Scene,
    rng: &mut dyn RngCore,
) -> Vec3 {
    match choose_lobe(&rec.mesh.material, rng) {
        Lobe::Diffuse => diffuse_direction(rec.normal, rng),
        Lobe::Specular => specular_direction(ray_in, rec, scene),
    }
}

/// Cosine-weighted direction in the hemisphere around `normal`.
pub fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    direction.try_normalize().unwrap_or(normal)
}

/// Reflection of the direction toward the nearest light: `R = 2N(N·L) - L`.
///
/// With no lights, or a hit at the light's centre, the incoming ray is
/// mirrored instead.
pub fn specular_direction(ray_in: &Ray, rec: &HitRecord, scene: &Scene) -> Vec3 {
    let to_light = scene
        .nearest_light(rec.p)
        .and_then(|light| (light.center() - rec.p).try_normalize());

    match to_light {
        Some(l) => reflect(-l, rec.normal),
        None => reflect(ray_in.direction, rec.normal),
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Use rejection sampling for uniform distribution on sphere
    loop {
        let v = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
