//! Errors raised while rendering.

use lumen_core::SceneError;
use lumen_math::GeometryError;
use thiserror::Error;

/// Errors that abort a render.
///
/// Every variant except `Io` and `Image` is raised before the first pixel
/// is produced; there is no partial-image fallback.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("pixel ({row}, {col}) is outside the {width}x{height} screen")]
    InvalidPixelCoordinate {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("failed to build sample thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
