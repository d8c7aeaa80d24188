//! Simple path tracer example.
//!
//! Renders a small box room lit from the ceiling and saves it as PPM.

use lumen_core::{Camera, Color, Light, Material, Mesh, RenderSettings, Scene};
use lumen_math::Vec3;
use lumen_renderer::{render, save_image};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let scene = match build_scene() {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::from_look_at(Vec3::new(0.0, 1.0, -3.5), Vec3::new(0.0, 1.0, 0.0))
        .map(|c| c.with_fov(55.0));
    let camera = match camera {
        Ok(camera) => camera,
        Err(e) => {
            eprintln!("Failed to build camera: {}", e);
            std::process::exit(1);
        }
    };

    let settings = RenderSettings::default()
        .with_resolution(160, 120)
        .with_quality(32, 4)
        .with_seed(7);

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.width, settings.height, settings.samples_per_pixel
    );

    let (grid, stats) = match render(&scene, &camera, &settings) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("Rendered in {:?} ({} rays)", stats.elapsed, stats.rays_traced);

    let filename = "output.ppm";
    if let Err(e) = save_image(&grid, filename) {
        eprintln!("Failed to save image: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

/// Axis-aligned quad from four corners in counter-clockwise order.
fn quad(
    name: &str,
    corners: [Vec3; 4],
    color: Color,
    material: Material,
) -> lumen_core::SceneResult<Mesh> {
    Mesh::with_computed_normals(name, corners.to_vec(), &[[0, 1, 2], [0, 2, 3]], color, material)
}

fn build_scene() -> lumen_core::SceneResult<Scene> {
    let mut scene = Scene::new();
    let white = Color::new(0.73, 0.73, 0.73);

    scene.add_object(quad(
        "floor",
        [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ],
        white,
        Material::diffuse(0.8),
    )?);
    scene.add_object(quad(
        "ceiling",
        [
            Vec3::new(-1.0, 2.0, -1.0),
            Vec3::new(1.0, 2.0, -1.0),
            Vec3::new(1.0, 2.0, 1.0),
            Vec3::new(-1.0, 2.0, 1.0),
        ],
        white,
        Material::diffuse(0.8),
    )?);
    scene.add_object(quad(
        "back",
        [
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(-1.0, 2.0, 1.0),
            Vec3::new(1.0, 2.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
        white,
        Material::glossy(0.6, 0.3, 20.0),
    )?);
    scene.add_object(quad(
        "left",
        [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 2.0, -1.0),
            Vec3::new(-1.0, 2.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ],
        Color::new(0.65, 0.05, 0.05),
        Material::diffuse(0.8),
    )?);
    scene.add_object(quad(
        "right",
        [
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 1.0),
            Vec3::new(1.0, 2.0, -1.0),
        ],
        Color::new(0.12, 0.45, 0.15),
        Material::diffuse(0.8),
    )?);

    let lamp = quad(
        "lamp",
        [
            Vec3::new(-0.3, 1.99, -0.3),
            Vec3::new(0.3, 1.99, -0.3),
            Vec3::new(0.3, 1.99, 0.3),
            Vec3::new(-0.3, 1.99, 0.3),
        ],
        Color::ONE,
        Material::default(),
    )?;
    scene.add_light(Light::new(lamp, Color::ONE, 12.0)?);

    println!("Created {} objects, {} lights", scene.objects.len(), scene.lights.len());
    Ok(scene)
}
