use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use lumen_core::io::{load_scene, save_scene, SceneDescription};
use lumen_core::{Camera, Integrator, RenderSettings, Scene};
use lumen_math::Vec3;
use lumen_renderer::{render, save_image};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AvailableIntegrator {
    /// Recursive stochastic path tracing
    PathTracing,
    /// Nearest surface color, no bounces
    RayCasting,
}

impl From<AvailableIntegrator> for Integrator {
    fn from(value: AvailableIntegrator) -> Self {
        match value {
            AvailableIntegrator::PathTracing => Integrator::PathTracing,
            AvailableIntegrator::RayCasting => Integrator::RayCasting,
        }
    }
}

/// Render a JSON scene file to an image.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Args {
    /// Scene description (JSON)
    scene: PathBuf,

    #[arg(short, long, default_value = "render.ppm")]
    /// Output image; `.ppm` is written as text, other extensions by format
    output: PathBuf,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    /// Samples per pixel
    spp: Option<usize>,

    #[arg(long)]
    /// Maximum number of bounces
    depth: Option<u32>,

    #[arg(long)]
    /// Field of view in degrees
    fov: Option<f64>,

    #[arg(long)]
    /// Seed for a reproducible render
    seed: Option<u64>,

    #[arg(long)]
    /// Upper bound on samples computed concurrently
    max_in_flight: Option<usize>,

    #[arg(short, long, value_enum)]
    integrator: Option<AvailableIntegrator>,

    #[arg(long)]
    /// Write the resolved scene, camera and settings back out as JSON
    dump_scene: Option<PathBuf>,

    #[arg(short, long)]
    /// Debug logging
    verbose: bool,
}

impl Args {
    /// Command line values win over the scene file's settings.
    fn apply(&self, mut settings: RenderSettings) -> RenderSettings {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(spp) = self.spp {
            settings.samples_per_pixel = spp;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(fov) = self.fov {
            settings.fov = Some(fov);
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(cap) = self.max_in_flight {
            settings.max_in_flight = cap;
        }
        if let Some(integrator) = self.integrator {
            settings.integrator = integrator.into();
        }
        settings
    }
}

/// Frame the whole scene from in front (-z) when the file has no camera.
fn default_camera(scene: &Scene) -> Result<Camera> {
    let Some(bbox) = scene.bounding_box() else {
        bail!("scene has no camera and no geometry to frame");
    };
    let distance = bbox.extent().max_element().max(1.0) * 2.0;
    let position = bbox.centroid() - Vec3::Z * distance;
    log::info!("No camera in scene file, framing scene from {}", position);
    Ok(Camera::frame_bounding_box(position, &bbox)?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Starting lumen");

    let loaded = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let settings = args.apply(loaded.render.clone().unwrap_or_default());
    let camera = match loaded.camera {
        Some(camera) => camera,
        None => default_camera(&loaded.scene)?,
    };

    if let Some(path) = &args.dump_scene {
        let description = SceneDescription::from_scene(&loaded.scene, Some(&camera), Some(&settings));
        save_scene(&description, path)
            .with_context(|| format!("failed to write scene {}", path.display()))?;
    }

    let (grid, stats) = render(&loaded.scene, &camera, &settings).context("render failed")?;
    log::info!(
        "{} rays in {:.2?} ({} samples in flight at peak)",
        stats.rays_traced,
        stats.elapsed,
        stats.peak_in_flight
    );

    save_image(&grid, &args.output)
        .with_context(|| format!("failed to save image {}", args.output.display()))?;

    Ok(())
}
