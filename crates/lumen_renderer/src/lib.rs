//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for triangle-mesh scenes. Every ray is tested
//! against every triangle; per-pixel samples run on a bounded worker pool
//! and are averaged into an 8-bit color grid.

mod error;
mod hittable;
mod material;
mod output;
mod renderer;
mod scheduler;
mod screen;

pub use error::{RenderError, RenderResult};
pub use hittable::{closest_surface, intersect_scene, HitRecord, Hittable, SceneHit};
pub use material::{choose_lobe, diffuse_direction, reflect, scatter, specular_direction, Lobe};
pub use output::{save_image, write_ppm};
pub use renderer::{
    cast_ray, color_to_rgb8, linear_to_gamma, ray_color, render, tone_map, ColorGrid, RenderStats,
    Renderer,
};
pub use scheduler::SampleScheduler;
pub use screen::Screen;

/// Re-export common math and scene types
pub use lumen_core::{Camera, Color, Integrator, RenderSettings, Scene};
pub use lumen_math::{Interval, Ray, Vec3};
