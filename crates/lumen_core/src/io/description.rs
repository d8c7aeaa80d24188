//! Serializable scene description.
//!
//! Coordinates and colors are kept as plain `Vec<f64>` so that a malformed
//! file deserializes fine and is rejected by `check_integrity` with a message
//! naming the offending element.

use std::path::{Path, PathBuf};

use lumen_math::{point_from_slice, vector_from_slice, Aabb, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::io::obj::load_obj_mesh;
use crate::{
    Camera, Color, Light, Material, Mesh, RenderSettings, Scene, SceneError, SceneResult,
    Triangle,
};

fn default_color() -> Vec<f64> {
    vec![1.0, 1.0, 1.0]
}

fn default_fov() -> f64 {
    crate::camera::DEFAULT_FOV
}

fn default_near() -> f64 {
    crate::camera::DEFAULT_NEAR
}

/// A face as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleDescription {
    pub vertices: Vec<usize>,
    pub normals: Vec<usize>,
}

/// A mesh object, either inline or backed by an OBJ file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normals: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triangles: Vec<TriangleDescription>,
    /// OBJ file, relative to the scene file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obj: Option<PathBuf>,
    #[serde(default = "default_color")]
    pub color: Vec<f64>,
    #[serde(default)]
    pub material: Material,
}

/// An emissive object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub object: ObjectDescription,
    #[serde(default = "default_color")]
    pub color: Vec<f64>,
    pub intensity: f64,
}

/// A camera given by an explicit basis, a look-at target, or only a position.
///
/// With only a position the camera is aimed at the first object's bounding
/// box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub position: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub look: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub up: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<f64>>,
    #[serde(default = "default_fov")]
    pub fov: f64,
    #[serde(default = "default_near")]
    pub near: f64,
}

/// A whole scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
}

/// The in-memory result of building a scene description.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Option<Camera>,
    pub render: Option<RenderSettings>,
}

fn check_arity(what: &str, owner: &str, index: usize, found: usize) -> SceneResult<()> {
    if found != 3 {
        return Err(SceneError::invalid(format!(
            "{owner}: {what} {index} has {found} components, expected 3"
        )));
    }
    Ok(())
}

fn color_from_slice(owner: &str, channels: &[f64]) -> SceneResult<Color> {
    if channels.len() != 3 {
        return Err(SceneError::invalid(format!(
            "{owner}: color has {} channels, expected 3",
            channels.len()
        )));
    }
    Ok(vector_from_slice(channels)?)
}

impl ObjectDescription {
    /// Check the arity of every vertex, normal, face and the color.
    pub fn check_integrity(&self) -> SceneResult<()> {
        let owner = self.name.as_str();
        match (&self.obj, self.vertices.is_empty()) {
            (Some(_), false) => {
                return Err(SceneError::invalid(format!(
                    "{owner}: give either inline geometry or an OBJ file, not both"
                )))
            }
            (None, true) => {
                return Err(SceneError::invalid(format!("{owner}: object has no vertices")))
            }
            _ => {}
        }

        for (i, v) in self.vertices.iter().enumerate() {
            check_arity("vertex", owner, i, v.len())?;
        }
        for (i, n) in self.normals.iter().enumerate() {
            check_arity("normal", owner, i, n.len())?;
        }
        for (i, tri) in self.triangles.iter().enumerate() {
            check_arity("triangle vertex list", owner, i, tri.vertices.len())?;
            check_arity("triangle normal list", owner, i, tri.normals.len())?;
        }
        color_from_slice(owner, &self.color)?;
        Ok(())
    }

    /// Build the mesh, loading OBJ geometry relative to `base_dir`.
    pub fn build(&self, base_dir: &Path) -> SceneResult<Mesh> {
        self.check_integrity()?;
        let color = color_from_slice(&self.name, &self.color)?;

        if let Some(obj) = &self.obj {
            return load_obj_mesh(base_dir.join(obj), &self.name, color, self.material);
        }

        let vertices = self
            .vertices
            .iter()
            .map(|v| point_from_slice(v))
            .collect::<Result<Vec<Point3>, _>>()?;
        let normals = self
            .normals
            .iter()
            .map(|n| vector_from_slice(n))
            .collect::<Result<Vec<Vec3>, _>>()?;
        let triangles = self
            .triangles
            .iter()
            .map(|t| {
                Triangle::new(
                    [t.vertices[0], t.vertices[1], t.vertices[2]],
                    [t.normals[0], t.normals[1], t.normals[2]],
                )
            })
            .collect();

        Mesh::new(self.name.clone(), vertices, normals, triangles, color, self.material)
    }

    /// Describe an in-memory mesh with inline geometry.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            name: mesh.name.clone(),
            vertices: mesh.vertices.iter().map(|v| v.to_array().to_vec()).collect(),
            normals: mesh.normals.iter().map(|n| n.to_array().to_vec()).collect(),
            triangles: mesh
                .triangles
                .iter()
                .map(|t| TriangleDescription {
                    vertices: t.vertices.to_vec(),
                    normals: t.normals.to_vec(),
                })
                .collect(),
            obj: None,
            color: mesh.color.to_array().to_vec(),
            material: mesh.material,
        }
    }
}

impl LightDescription {
    pub fn check_integrity(&self) -> SceneResult<()> {
        self.object.check_integrity()?;
        color_from_slice(&self.object.name, &self.color)?;
        Ok(())
    }

    pub fn build(&self, base_dir: &Path) -> SceneResult<Light> {
        self.check_integrity()?;
        let color = color_from_slice(&self.object.name, &self.color)?;
        Light::new(self.object.build(base_dir)?, color, self.intensity)
    }

    pub fn from_light(light: &Light) -> Self {
        Self {
            object: ObjectDescription::from_mesh(&light.object),
            color: light.color.to_array().to_vec(),
            intensity: light.intensity,
        }
    }
}

impl CameraDescription {
    /// Resolve the camera. `framing` is the box a position-only camera aims at.
    pub fn build(&self, framing: Option<&Aabb>) -> SceneResult<Camera> {
        let position = point_from_slice(&self.position)?;
        let basis = [&self.look, &self.up, &self.right];

        let camera = if basis.iter().all(|v| v.len() == 3) {
            Camera::new(
                position,
                vector_from_slice(&self.look)?,
                vector_from_slice(&self.up)?,
                vector_from_slice(&self.right)?,
                self.fov,
                self.near,
            )?
        } else if basis.iter().any(|v| !v.is_empty()) {
            return Err(SceneError::invalid(
                "camera look, up and right must all have 3 components",
            ));
        } else if let Some(target) = &self.target {
            let mut camera = Camera::from_look_at(position, point_from_slice(target)?)?;
            camera.fov = self.fov;
            camera.near = self.near;
            camera
        } else if let Some(bbox) = framing {
            let mut camera = Camera::frame_bounding_box(position, bbox)?;
            camera.fov = self.fov;
            camera.near = self.near;
            camera
        } else {
            return Err(SceneError::invalid(
                "camera has neither a basis nor a target, and there is no object to frame",
            ));
        };

        camera.validate()?;
        Ok(camera)
    }
}

impl From<&Camera> for CameraDescription {
    fn from(camera: &Camera) -> Self {
        Self {
            position: camera.position.to_array().to_vec(),
            look: camera.look.to_array().to_vec(),
            up: camera.up.to_array().to_vec(),
            right: camera.right.to_array().to_vec(),
            target: None,
            fov: camera.fov,
            near: camera.near,
        }
    }
}

impl SceneDescription {
    /// Check, load and validate everything the file describes.
    pub fn build(&self, base_dir: &Path) -> SceneResult<LoadedScene> {
        let mut scene = Scene::new();
        for object in &self.objects {
            scene.add_object(object.build(base_dir)?);
        }
        for light in &self.lights {
            scene.add_light(light.build(base_dir)?);
        }
        scene.validate()?;

        let framing = scene.objects.first().map(Mesh::bounding_box);
        let camera = self
            .camera
            .as_ref()
            .map(|c| c.build(framing.as_ref()))
            .transpose()?;

        if let Some(render) = &self.render {
            render.validate()?;
        }

        Ok(LoadedScene {
            scene,
            camera,
            render: self.render.clone(),
        })
    }

    /// Describe an in-memory scene with all geometry inline.
    pub fn from_scene(
        scene: &Scene,
        camera: Option<&Camera>,
        render: Option<&RenderSettings>,
    ) -> Self {
        Self {
            objects: scene.objects.iter().map(ObjectDescription::from_mesh).collect(),
            lights: scene.lights.iter().map(LightDescription::from_light).collect(),
            camera: camera.map(CameraDescription::from),
            render: render.cloned(),
        }
    }
}
