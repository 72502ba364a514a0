//! Renderer-agnostic scene description.
//!
//! A `SceneDescription` is plain data: a camera, a background and a list of
//! spheres with their materials. It can be built in code (see
//! [`crate::presets`]) or deserialized from JSON, and is validated before
//! the renderer turns it into intersectable geometry.

use std::path::Path;

use rt_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{
    validate_albedo, validate_finite, validate_fuzz, validate_radius, validate_refractive_index,
    SceneError, SceneResult,
};

/// Camera placement and lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Eye position
    pub look_from: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// World up direction
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f32,
    /// Lens diameter, 0 for a pinhole camera
    #[serde(default)]
    pub aperture: f32,
    /// Distance to the plane of perfect focus. Defaults to the distance
    /// between `look_from` and `look_at`.
    #[serde(default)]
    pub focus_dist: Option<f32>,
}

fn default_vup() -> Vec3 {
    Vec3::Y
}

fn default_vfov() -> f32 {
    90.0
}

impl CameraSettings {
    /// Pinhole camera at the origin looking down -Z with a 90° field of view.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: None,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = Some(focus_dist);
        self
    }

    /// Set the vertical field of view only, keeping a pinhole lens.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// The focus distance actually used for ray generation.
    pub fn focus_distance(&self) -> f32 {
        self.focus_dist
            .unwrap_or_else(|| (self.look_from - self.look_at).length())
    }

    /// Reject cameras that would produce NaN rays.
    pub fn validate(&self) -> SceneResult<()> {
        validate_finite("camera look_from", self.look_from)?;
        validate_finite("camera look_at", self.look_at)?;
        validate_finite("camera vup", self.vup)?;

        let view = self.look_from - self.look_at;
        if view.length_squared() <= f32::EPSILON {
            return Err(SceneError::InvalidCamera(
                "look_from and look_at must differ".to_string(),
            ));
        }
        if self.vup.cross(view).length_squared() <= f32::EPSILON {
            return Err(SceneError::InvalidCamera(
                "vup must not be parallel to the view direction".to_string(),
            ));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vfov must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "aperture must be finite and non-negative, got {}",
                self.aperture
            )));
        }
        let focus = self.focus_distance();
        if !(focus.is_finite() && focus > 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "focus distance must be positive, got {}",
                focus
            )));
        }
        Ok(())
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// What a ray that escapes the scene sees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// Vertical gradient from white (down) to sky blue (up).
    #[default]
    Sky,
    /// A constant color.
    Solid { color: Color },
}

/// Surface material parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refractive_index: f32,
    },
}

impl MaterialDescription {
    pub fn validate(&self) -> SceneResult<()> {
        match *self {
            MaterialDescription::Lambertian { albedo } => {
                validate_albedo(albedo)?;
            }
            MaterialDescription::Metal { albedo, fuzz } => {
                validate_albedo(albedo)?;
                validate_fuzz(fuzz)?;
            }
            MaterialDescription::Dielectric { refractive_index } => {
                validate_refractive_index(refractive_index)?;
            }
        }
        Ok(())
    }
}

/// A sphere and the material it is made of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialDescription,
}

impl SphereDescription {
    pub fn new(center: Vec3, radius: f32, material: MaterialDescription) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        validate_finite("sphere center", self.center)?;
        validate_radius(self.radius)?;
        self.material.validate()
    }
}

/// A complete scene: camera, background and objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraSettings,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub objects: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            camera,
            background: Background::Sky,
            objects: Vec::new(),
        }
    }

    /// Add a sphere.
    pub fn add(&mut self, sphere: SphereDescription) {
        self.objects.push(sphere);
    }

    /// Builder form of [`SceneDescription::add`].
    pub fn with_sphere(mut self, center: Vec3, radius: f32, material: MaterialDescription) -> Self {
        self.add(SphereDescription::new(center, radius, material));
        self
    }

    /// Validate the camera, background and every object.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        if let Background::Solid { color } = self.background {
            validate_albedo(color)?;
        }
        for (index, object) in self.objects.iter().enumerate() {
            object.validate().map_err(|e| SceneError::Object {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene to pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load and validate a JSON scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = SceneDescription::from_json(&text)?;
    log::info!(
        "Loaded scene {} with {} objects",
        path.display(),
        scene.objects.len()
    );
    Ok(scene)
}
