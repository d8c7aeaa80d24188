//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/cornell.json

use std::env;

use lumen_core::io::load_scene;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/cornell.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(loaded) => {
            let scene = &loaded.scene;
            println!("\n=== Scene ===");
            println!("Objects: {}", scene.objects.len());
            println!("Lights: {}", scene.lights.len());
            println!("Total triangles: {}", scene.triangle_count());

            println!("\n--- Objects ---");
            for (i, object) in scene.objects.iter().enumerate() {
                let bounds = object.bounding_box();
                println!(
                    "  [{}] {} - {} vertices, {} triangles, k_d {:.2} k_s {:.2}",
                    i,
                    object.name,
                    object.vertex_count(),
                    object.triangle_count(),
                    object.material.diffuse,
                    object.material.specular
                );
                println!(
                    "       Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                    bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                let c = light.center();
                println!(
                    "  [{}] {} at ({:.2}, {:.2}, {:.2}), intensity {:.2}",
                    i, light.object.name, c.x, c.y, c.z, light.intensity
                );
            }

            match &loaded.camera {
                Some(camera) => println!(
                    "\nCamera at ({:.2}, {:.2}, {:.2}), fov {:.1}",
                    camera.position.x, camera.position.y, camera.position.z, camera.fov
                ),
                None => println!("\nNo camera in file"),
            }

            if let Some(render) = &loaded.render {
                println!(
                    "Render: {}x{}, {} spp, depth {}",
                    render.width, render.height, render.samples_per_pixel, render.max_depth
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
