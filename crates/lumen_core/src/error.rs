//! Errors raised while building, validating or loading a scene.

use lumen_math::GeometryError;
use thiserror::Error;

/// Errors that can occur while assembling the scene model.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
}

impl SceneError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
