//! Scene loading and saving.
//!
//! Scenes are JSON documents (see [`SceneDescription`]); mesh geometry can be
//! inline or referenced from Wavefront OBJ files next to the scene file.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::io::load_scene;
//!
//! let loaded = load_scene("scenes/cornell.json")?;
//! println!("Loaded {} objects", loaded.scene.objects.len());
//! ```

mod description;
mod obj;

use std::fs;
use std::path::Path;

pub use description::{
    CameraDescription, LightDescription, LoadedScene, ObjectDescription, SceneDescription,
    TriangleDescription,
};
pub use obj::load_obj_mesh;

use crate::SceneResult;

/// Load, check and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    log::info!("Loading scene {}", path.display());
    load_scene_from_str(&content, base_dir)
}

/// Load a scene from JSON text; OBJ paths resolve against `base_dir`.
pub fn load_scene_from_str(content: &str, base_dir: &Path) -> SceneResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(content)?;
    description.build(base_dir)
}

/// Write a scene description as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_scene<P: AsRef<Path>>(description: &SceneDescription, path: P) -> SceneResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(description)?;
    fs::write(path, json)?;
    log::info!("Saved scene to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Integrator, SceneError};

    const SCENE: &str = r#"{
        "objects": [{
            "name": "floor",
            "vertices": [[-5, 0, -5], [5, 0, -5], [0, 0, 5]],
            "normals": [[0, 1, 0]],
            "triangles": [{"vertices": [0, 1, 2], "normals": [0, 0, 0]}],
            "color": [0.5, 0.5, 0.5],
            "material": {"diffuse": 0.8, "specular": 0.1}
        }],
        "lights": [{
            "object": {
                "name": "lamp",
                "vertices": [[-1, 4, -1], [1, 4, -1], [0, 4, 1]],
                "normals": [[0, -1, 0]],
                "triangles": [{"vertices": [0, 1, 2], "normals": [0, 0, 0]}]
            },
            "color": [1, 1, 1],
            "intensity": 5
        }],
        "camera": {"position": [0, 2, -8], "target": [0, 0, 0], "fov": 70},
        "render": {"width": 32, "height": 24, "integrator": "ray_casting"}
    }"#;

    #[test]
    fn test_load_from_str() {
        let loaded = load_scene_from_str(SCENE, Path::new(".")).unwrap();

        assert_eq!(loaded.scene.objects[0].material.specular, 0.1);
        assert_eq!(loaded.scene.lights[0].intensity, 5.0);
        assert_eq!(loaded.camera.unwrap().fov, 70.0);
        let render = loaded.render.unwrap();
        assert_eq!((render.width, render.height), (32, 24));
        assert_eq!(render.integrator, Integrator::RayCasting);
    }

    #[test]
    fn test_malformed_json() {
        let result = load_scene_from_str("{ \"objects\": [", Path::new("."));
        assert!(matches!(result, Err(SceneError::Json(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let loaded = load_scene_from_str(SCENE, Path::new(".")).unwrap();
        let description = SceneDescription::from_scene(
            &loaded.scene,
            loaded.camera.as_ref(),
            loaded.render.as_ref(),
        );

        let path = std::env::temp_dir()
            .join(format!("lumen_scene_{}", std::process::id()))
            .join("saved.json");
        save_scene(&description, &path).unwrap();

        let reloaded = load_scene(&path).unwrap();
        assert_eq!(reloaded.scene.triangle_count(), 1);
        assert_eq!(reloaded.scene.lights.len(), 1);
        assert_eq!(reloaded.render, loaded.render);
        let (a, b) = (reloaded.camera.unwrap(), loaded.camera.unwrap());
        assert!((a.look - b.look).length() < 1e-12);
    }

    #[test]
    fn test_obj_reference_resolves_against_scene_dir() {
        let dir = std::env::temp_dir().join(format!("lumen_objref_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tri.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        fs::write(
            dir.join("scene.json"),
            r#"{"objects": [{"name": "tri", "obj": "tri.obj", "color": [1, 0, 0]}]}"#,
        )
        .unwrap();

        let loaded = load_scene(dir.join("scene.json")).unwrap();
        assert_eq!(loaded.scene.objects[0].triangle_count(), 1);
        assert!(loaded.camera.is_none());
    }
}
