//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with an explicit depth bound
//! - Square-root gamma tone mapping
//! - Anti-aliasing via jittered multi-sampling
//!
//! A ray casting integrator shares the same intersection routines and
//! returns the nearest surface's base color.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};
use lumen_core::{Camera, Color, Integrator, RenderSettings, Scene};
use lumen_math::Ray;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::hittable::{intersect_scene, SceneHit};
use crate::material::{gen_f64, scatter};
use crate::{RenderResult, SampleScheduler, Screen};

/// Compute the color seen by a ray.
///
/// Lights end a path with their radiance; surfaces bounce while `depth`
/// remains and tint the returned radiance with their base color; misses and
/// exhausted paths are black. `rays` counts every traced ray.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    rng: &mut dyn RngCore,
    rays: &mut u64,
) -> Color {
    *rays += 1;

    match intersect_scene(scene, ray) {
        SceneHit::Light(light) => light.radiance(),
        SceneHit::Nothing => Color::ZERO,
        SceneHit::Surface(_) if depth == 0 => Color::ZERO,
        SceneHit::Surface(rec) => {
            let direction = scatter(ray, &rec, scene, rng);
            let scattered = Ray::new(rec.p, direction);
            ray_color(&scattered, scene, depth - 1, rng, rays) * rec.mesh.color
        }
    }
}

/// Single-bounce visibility: the nearest surface's base color.
///
/// A visible light is white whatever its color; a miss is black.
pub fn cast_ray(ray: &Ray, scene: &Scene, rays: &mut u64) -> Color {
    *rays += 1;

    match intersect_scene(scene, ray) {
        SceneHit::Surface(rec) => rec.mesh.color,
        SceneHit::Light(_) => Color::ONE,
        SceneHit::Nothing => Color::ZERO,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn quantize(x: f64) -> u8 {
    // NaN saturates to 0 in the cast
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert an averaged radiance to 8-bit RGB:
/// `clamp(round(sqrt(c) * 255), 0, 255)`.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [
        quantize(linear_to_gamma(color.x)),
        quantize(linear_to_gamma(color.y)),
        quantize(linear_to_gamma(color.z)),
    ]
}

/// Tone map for the chosen integrator.
///
/// Ray casting returns stored base colors, so it is quantized linearly and
/// an 8-bit input color comes back unchanged.
pub fn tone_map(color: Color, integrator: Integrator) -> [u8; 3] {
    match integrator {
        Integrator::PathTracing => color_to_rgb8(color),
        Integrator::RayCasting => [quantize(color.x), quantize(color.y), quantize(color.z)],
    }
}

/// Seed for one sample's generator.
///
/// Derived from the render seed and the sample's address only, so a render
/// is reproducible whatever order the samples run in.
fn sample_seed(seed: u64, row: usize, col: usize, sample: usize) -> u64 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    for v in [row as u64, col as u64, sample as u64] {
        h = (h ^ v).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h ^= h >> 31;
    }
    h
}

/// Height x width grid of 8-bit RGB, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    pub width: usize,
    pub height: usize,
    pixels: Vec<[u8; 3]>,
}

impl ColorGrid {
    /// Create a new grid filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
        }
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: usize, col: usize) -> [u8; 3] {
        self.pixels[row * self.width + col]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        self.pixels[row * self.width + col] = rgb;
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks(self.width.max(1))
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Convert to an `image` buffer for saving.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self.get(y as usize, x as usize))
        })
    }
}

/// Counters collected over one render.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub rays_traced: u64,
    /// Most samples computing at once
    pub peak_in_flight: usize,
    pub elapsed: Duration,
}

/// A validated render job.
pub struct Renderer<'a> {
    scene: &'a Scene,
    screen: Screen,
    settings: RenderSettings,
    fov: f64,
    seed: u64,
    scheduler: SampleScheduler,
    rays_traced: AtomicU64,
}

impl<'a> Renderer<'a> {
    /// Validate every input and set up the sample pool.
    ///
    /// Nothing is rendered if any check fails.
    pub fn new(scene: &'a Scene, camera: &Camera, settings: &RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        camera.validate()?;
        scene.validate()?;

        let fov = settings.fov.unwrap_or(camera.fov);
        let seed = settings.seed.unwrap_or_else(rand::random);

        Ok(Self {
            scene,
            screen: Screen::new(camera, settings.width, settings.height),
            settings: settings.clone(),
            fov,
            seed,
            scheduler: SampleScheduler::new(settings.max_in_flight)?,
            rays_traced: AtomicU64::new(0),
        })
    }

    /// Seed in use; pass it back through the settings to repeat a render.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Average of every sample for one pixel, tone mapped.
    pub fn render_pixel(&self, row: usize, col: usize) -> RenderResult<[u8; 3]> {
        let samples = self.settings.samples_per_pixel;
        let results = self.scheduler.run(samples, |s| self.sample(row, col, s));

        let mut sum = Color::ZERO;
        let mut rays = 0;
        for result in results {
            let (color, traced) = result?;
            sum += color;
            rays += traced;
        }
        self.rays_traced.fetch_add(rays, Ordering::Relaxed);

        Ok(tone_map(sum / samples as f64, self.settings.integrator))
    }

    fn sample(&self, row: usize, col: usize, index: usize) -> RenderResult<(Color, u64)> {
        let mut rng = StdRng::seed_from_u64(sample_seed(self.seed, row, col, index));
        let jitter_x = gen_f64(&mut rng);
        let jitter_y = gen_f64(&mut rng);
        let ray = self
            .screen
            .pixel_to_world_ray(row, col, jitter_x, jitter_y, self.fov)?;

        let mut rays = 0;
        let color = match self.settings.integrator {
            Integrator::PathTracing => {
                ray_color(&ray, self.scene, self.settings.max_depth, &mut rng, &mut rays)
            }
            Integrator::RayCasting => cast_ray(&ray, self.scene, &mut rays),
        };
        Ok((color, rays))
    }

    /// Render every pixel, row by row.
    pub fn render(&self) -> RenderResult<(ColorGrid, RenderStats)> {
        let (width, height) = (self.screen.width, self.screen.height);
        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, {:?}, seed {}",
            width,
            height,
            self.settings.samples_per_pixel,
            self.settings.max_depth,
            self.settings.integrator,
            self.seed
        );

        let start = Instant::now();
        let mut grid = ColorGrid::new(width, height);

        for row in 0..height {
            for col in 0..width {
                grid.set(row, col, self.render_pixel(row, col)?);
            }
            log::debug!("Row {}/{} done", row + 1, height);
        }

        let stats = RenderStats {
            rays_traced: self.rays_traced.load(Ordering::Relaxed),
            peak_in_flight: self.scheduler.peak_in_flight(),
            elapsed: start.elapsed(),
        };
        log::info!(
            "Rendered in {:.2?}: {} rays, peak {} samples in flight",
            stats.elapsed,
            stats.rays_traced,
            stats.peak_in_flight
        );

        Ok((grid, stats))
    }
}

/// Render the scene to a color grid.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<(ColorGrid, RenderStats)> {
    Renderer::new(scene, camera, settings)?.render()
}
