//! Built-in scenes.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rt_math::{Color, Vec3};

use crate::description::{CameraSettings, MaterialDescription, SceneDescription};
use crate::error::SceneError;

/// Seed used for the procedural `Random` preset when none is given.
pub const DEFAULT_SCENE_SEED: u64 = 2084;

/// The scenes that ship with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenePreset {
    /// One grey diffuse sphere in front of a pinhole camera, lit by the sky.
    #[default]
    Diffuse,
    /// Ground, diffuse, metal and glass spheres seen through a wide lens.
    Materials,
    /// A large field of small random spheres around three big ones.
    Random,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 3] = [
        ScenePreset::Diffuse,
        ScenePreset::Materials,
        ScenePreset::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Diffuse => "diffuse",
            ScenePreset::Materials => "materials",
            ScenePreset::Random => "random",
        }
    }

    /// Build the scene. `seed` only affects procedural presets.
    pub fn build(self, seed: u64) -> SceneDescription {
        let scene = match self {
            ScenePreset::Diffuse => diffuse(),
            ScenePreset::Materials => materials(),
            ScenePreset::Random => random(seed),
        };
        log::debug!("Built preset '{}' with {} objects", self.name(), scene.objects.len());
        scene
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SceneError::UnknownPreset(s.to_string()))
    }
}

fn lambertian(r: f32, g: f32, b: f32) -> MaterialDescription {
    MaterialDescription::Lambertian {
        albedo: Color::new(r, g, b),
    }
}

/// A single Lambertian sphere of radius 0.5 at (0, 0, -1), no ground.
pub fn diffuse() -> SceneDescription {
    SceneDescription::new(CameraSettings::new()).with_sphere(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        lambertian(0.5, 0.5, 0.5),
    )
}

/// One sphere of each material on a large ground sphere.
pub fn materials() -> SceneDescription {
    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let focus_dist = (look_from - look_at).length();
    let camera = CameraSettings::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 2.0, focus_dist);

    SceneDescription::new(camera)
        .with_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, lambertian(0.1, 0.2, 0.5))
        .with_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, lambertian(0.8, 0.8, 0.0))
        .with_sphere(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            MaterialDescription::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.3,
            },
        )
        .with_sphere(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            MaterialDescription::Dielectric {
                refractive_index: 1.5,
            },
        )
}

/// The classic cover scene: a grid of small spheres with randomly chosen
/// materials around one glass, one diffuse and one metal sphere.
pub fn random(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);

    let camera = CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    let mut scene = SceneDescription::new(camera)
        .with_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, lambertian(0.5, 0.5, 0.5))
        .with_sphere(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            MaterialDescription::Dielectric {
                refractive_index: 1.5,
            },
        )
        .with_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, lambertian(0.4, 0.2, 0.1))
        .with_sphere(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            MaterialDescription::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        );

    let radius = 0.2;
    let keep_clear = Vec3::new(4.0, radius, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                radius,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let mut product = || rng.gen::<f32>() * rng.gen::<f32>();
                lambertian(product(), product(), product())
            } else if choose_mat < 0.95 {
                let mut half = || 0.5 * (1.0 + rng.gen::<f32>());
                MaterialDescription::Metal {
                    albedo: Color::new(half(), half(), half()),
                    fuzz: 0.5 * rng.gen::<f32>(),
                }
            } else {
                MaterialDescription::Dielectric {
                    refractive_index: 1.5,
                }
            };
            scene = scene.with_sphere(center, radius, material);
        }
    }

    scene
}
