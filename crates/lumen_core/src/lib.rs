//! Lumen Core - scene model, camera and scene IO.
//!
//! This crate provides:
//!
//! - **Scene model**: `Mesh`, `Material`, `Light`, `Scene`
//! - **Camera**: orthonormal camera basis and camera-to-world transform
//! - **Render settings**: image size, sampling and recursion parameters
//! - **IO**: JSON scene files with inline or OBJ geometry
//!
//! Everything here is built once, validated, and then only read by the
//! renderer.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::io::load_scene;
//!
//! let loaded = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     loaded.scene.objects.len(),
//!     loaded.scene.lights.len());
//! ```

pub mod camera;
pub mod error;
pub mod io;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use camera::Camera;
pub use error::{SceneError, SceneResult};
pub use light::Light;
pub use material::{color_from_rgb8, Color, Material};
pub use mesh::{Mesh, Triangle};
pub use scene::Scene;
pub use settings::{Integrator, RenderSettings, DEFAULT_MAX_IN_FLIGHT};
