use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised by the frame renderer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render called before the first resize")]
    NotInitialized,
    #[error("camera supplied {actual} ray directions, viewport needs {expected}")]
    RayCountMismatch { expected: usize, actual: usize },
}

/// Errors raised while loading a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid scene description: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Errors raised while writing the final image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no frame has been rendered at the current size")]
    NoImage,
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),
}
