//! CPU path tracing renderer core.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. [`Renderer::pixel_color`] is the per-pixel entry point;
//! [`Renderer::render`] and [`Renderer::render_parallel`] produce a whole
//! [`ImageBuffer`].

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
mod sampler;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use output::ImageBuffer;
pub use renderer::{
    background_color, color_to_rgb, linear_to_gamma, ray_color, sky_gradient, RenderConfig,
    Renderer, Tracer, DEFAULT_MAX_DEPTH, SHADOW_ACNE_EPSILON,
};
pub use sampler::{derive_seed, Sampler, MAX_REJECTION_ATTEMPTS};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export common math types from rt_math
pub use rt_math::{Color, Interval, Ray, Vec3};
pub use rt_scene::{
    Background, CameraSettings, MaterialDescription, SceneDescription, SceneError, ScenePreset,
    SphereDescription,
};
