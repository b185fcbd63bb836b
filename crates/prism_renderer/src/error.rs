//! Errors for user-supplied scenes and render settings.
//!
//! Programmer errors (building a sphere with a negative radius directly, say)
//! panic at construction instead; these types cover input that arrives from
//! files or the command line and is validated first.

use thiserror::Error;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scene has no objects")]
    Empty,

    #[error("Object {index}: radius must be positive, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Object {index}: metal roughness must be non-negative, got {roughness}")]
    InvalidRoughness { index: usize, roughness: f32 },

    #[error("Object {index}: refractive index must be positive, got {refractive_index}")]
    InvalidRefractiveIndex { index: usize, refractive_index: f32 },

    #[error("Object {index}: albedo channels must be finite and non-negative")]
    InvalidAlbedo { index: usize },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Errors that can occur while setting up a render or writing its output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Pixel buffer does not match a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
