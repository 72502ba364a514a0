//! Scene descriptions for the path tracer.
//!
//! This crate provides:
//!
//! - **Description types**: `SceneDescription`, `SphereDescription`,
//!   `MaterialDescription`, `CameraSettings`, `Background`
//! - **Presets**: the built-in scenes the renderer can be constructed with
//! - **Loading**: JSON scene files via serde
//! - **Validation**: every numeric parameter is checked before rendering
//!
//! # Example
//!
//! ```ignore
//! use rt_scene::{load_scene, ScenePreset};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects", scene.objects.len());
//!
//! let cover = ScenePreset::Random.build(42);
//! ```

pub mod description;
pub mod error;
pub mod presets;

// Re-export commonly used types
pub use description::{
    load_scene, Background, CameraSettings, MaterialDescription, SceneDescription,
    SphereDescription,
};
pub use error::{SceneError, SceneResult};
pub use presets::{ScenePreset, DEFAULT_SCENE_SEED};
