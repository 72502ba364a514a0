//! Renderer errors.

use rt_scene::SceneError;
use thiserror::Error;

/// Errors surfaced to whoever drives the renderer.
///
/// Out-of-range queries and bad buffers are caller contract violations;
/// they are reported here instead of writing garbage into the output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("A {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("Samples per pixel must be positive")]
    ZeroSamples,

    #[error("Maximum bounce depth must be positive")]
    ZeroMaxDepth,

    #[error("Bucket size must be positive")]
    ZeroBucketSize,

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Output buffer must hold exactly 3 bytes, got {0}")]
    BufferSize(usize),

    #[error("Pixel ({x}, {y}) produced a non-finite color")]
    NonFiniteColor { x: u32, y: u32 },

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
