use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a render. A missing logo is not one of them.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Font file not found: {0}")]
    FontNotFound(PathBuf),
    #[error("Invalid font {path}: {reason}")]
    InvalidFont { path: PathBuf, reason: String },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to open image viewer: {0}")]
    Viewer(String),
}
