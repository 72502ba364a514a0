//! Scene validation and loading errors.

use rt_math::Vec3;
use thiserror::Error;

/// Errors raised while building or loading a scene.
///
/// Numeric problems (zero radius, NaN colors, degenerate cameras) are
/// caught here, at construction time, so the per-pixel path never has to
/// deal with them.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{what} must be finite, got {value:?}")]
    NonFinite { what: &'static str, value: Vec3 },

    #[error("Albedo must be finite and non-negative, got {0:?}")]
    InvalidAlbedo(Vec3),

    #[error("Metal fuzz must be in [0, 1], got {0}")]
    InvalidFuzz(f32),

    #[error("Refractive index must be positive and finite, got {0}")]
    InvalidRefractiveIndex(f32),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Object {index}: {source}")]
    Object {
        index: usize,
        #[source]
        source: Box<SceneError>,
    },

    #[error("Unknown scene preset: {0}")]
    UnknownPreset(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Check that a sphere radius is usable.
pub fn validate_radius(radius: f32) -> SceneResult<f32> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(SceneError::InvalidRadius(radius))
    }
}

/// Check that a position or direction has no NaN/infinite components.
pub fn validate_finite(what: &'static str, value: Vec3) -> SceneResult<Vec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::NonFinite { what, value })
    }
}

/// Check that an albedo is a physical reflectance color.
pub fn validate_albedo(albedo: Vec3) -> SceneResult<Vec3> {
    if albedo.is_finite() && albedo.min_element() >= 0.0 {
        Ok(albedo)
    } else {
        Err(SceneError::InvalidAlbedo(albedo))
    }
}

/// Check that a metal fuzz factor lies in [0, 1].
pub fn validate_fuzz(fuzz: f32) -> SceneResult<f32> {
    if (0.0..=1.0).contains(&fuzz) {
        Ok(fuzz)
    } else {
        Err(SceneError::InvalidFuzz(fuzz))
    }
}

/// Check that a refractive index is usable with Snell's law.
pub fn validate_refractive_index(ior: f32) -> SceneResult<f32> {
    if ior.is_finite() && ior > 0.0 {
        Ok(ior)
    } else {
        Err(SceneError::InvalidRefractiveIndex(ior))
    }
}
