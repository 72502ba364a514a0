//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounded bounce depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma-2 correction to 8-bit output
//!
//! Pixel coordinates have their origin at the bottom-left: `y = 0` is the
//! bottom row of the image, matching the camera's `t = 0` edge. Whole-image
//! rendering flips rows so the returned [`ImageBuffer`] is top-left based.

use rand::rngs::StdRng;
use rand::RngCore;
use rayon::prelude::*;
use rt_math::{Color, Interval, Ray};
use rt_scene::{Background, SceneDescription, ScenePreset, DEFAULT_SCENE_SEED};

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::error::{RenderError, RenderResult};
use crate::sampler::{derive_seed, Sampler};
use crate::{Camera, Hittable, ImageBuffer, Scene};

/// Default maximum number of bounces per path.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Minimum ray parameter for scene queries, keeps scattered rays from
/// re-hitting the surface they start on.
pub const SHADOW_ACNE_EPSILON: f32 = 1e-3;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Sampler seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Configuration for a `width` x `height` image with `samples_per_pixel` samples.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            ..Default::default()
        }
    }

    /// Set the maximum bounce depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Use a fixed sampler seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Reject configurations that cannot render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::ZeroMaxDepth);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces so far; paths that reach `max_depth` carry no
/// more energy and return black.
pub fn ray_color<R: RngCore>(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    max_depth: u32,
    background: &Background,
    sampler: &mut Sampler<R>,
) -> Color {
    if depth >= max_depth {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return background_color(background, ray);
    };

    match rec.material.scatter(ray, &rec, sampler) {
        Some(scatter) => {
            scatter.attenuation
                * ray_color(
                    &scatter.scattered,
                    world,
                    depth + 1,
                    max_depth,
                    background,
                    sampler,
                )
        }
        None => Color::ZERO,
    }
}

/// Color of a ray that escaped the scene.
pub fn background_color(background: &Background, ray: &Ray) -> Color {
    match *background {
        Background::Sky => sky_gradient(ray),
        Background::Solid { color } => color,
    }
}

/// White looking down, sky blue looking up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::ONE.lerp(Color::new(0.5, 0.7, 1.0), a)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| (255.0 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// The immutable half of a renderer: scene, camera and sampling settings.
///
/// Shared by reference between worker threads; each caller supplies its
/// own [`Sampler`].
pub struct Tracer {
    scene: Scene,
    camera: Camera,
    background: Background,
    config: RenderConfig,
}

impl Tracer {
    /// Bundle a validated configuration with its scene and camera.
    pub fn new(
        config: RenderConfig,
        scene: Scene,
        camera: Camera,
        background: Background,
    ) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            camera,
            background,
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn check_bounds(&self, x: u32, y: u32) -> RenderResult<()> {
        if x >= self.config.width || y >= self.config.height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width: self.config.width,
                height: self.config.height,
            });
        }
        Ok(())
    }

    /// Average linear color of pixel (x, y) over all samples.
    pub fn sample_pixel<R: RngCore>(
        &self,
        x: u32,
        y: u32,
        sampler: &mut Sampler<R>,
    ) -> RenderResult<Color> {
        self.check_bounds(x, y)?;

        let width = self.config.width as f32;
        let height = self.config.height as f32;
        let mut sum = Color::ZERO;

        for _ in 0..self.config.samples_per_pixel {
            let u = (x as f32 + sampler.uniform()) / width;
            let v = (y as f32 + sampler.uniform()) / height;
            let ray = self.camera.get_ray(u, v, sampler);
            sum += ray_color(
                &ray,
                &self.scene,
                0,
                self.config.max_depth,
                &self.background,
                sampler,
            );
        }

        let color = sum / self.config.samples_per_pixel as f32;
        if !color.is_finite() {
            return Err(RenderError::NonFiniteColor { x, y });
        }
        Ok(color)
    }

    /// Gamma-corrected 8-bit color of pixel (x, y).
    pub fn pixel_color<R: RngCore>(
        &self,
        x: u32,
        y: u32,
        sampler: &mut Sampler<R>,
    ) -> RenderResult<[u8; 3]> {
        self.sample_pixel(x, y, sampler).map(color_to_rgb)
    }
}

/// A path tracer for one image size and scene, queried per pixel.
///
/// Dropping the renderer releases the scene.
pub struct Renderer {
    tracer: Tracer,
    sampler: Sampler<StdRng>,
    seed: u64,
}

impl Renderer {
    /// Create a renderer for the default scene: a single diffuse sphere
    /// lit by the sky.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> RenderResult<Self> {
        Self::with_config(RenderConfig::new(width, height, samples_per_pixel))
    }

    /// Create a renderer for the default scene with full configuration.
    pub fn with_config(config: RenderConfig) -> RenderResult<Self> {
        let scene = ScenePreset::default().build(DEFAULT_SCENE_SEED);
        Self::from_description(config, &scene)
    }

    /// Create a renderer for a described scene.
    pub fn from_description(config: RenderConfig, desc: &SceneDescription) -> RenderResult<Self> {
        config.validate()?;
        desc.validate()?;

        let scene = Scene::from_description(desc)?;
        let camera = Camera::new(&desc.camera, config.aspect_ratio())?;
        Self::with_scene(config, scene, camera, desc.background)
    }

    /// Create a renderer from already-built geometry and camera.
    pub fn with_scene(
        config: RenderConfig,
        scene: Scene,
        camera: Camera,
        background: Background,
    ) -> RenderResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!(
            "Renderer {}x{} @ {} spp, max depth {}, {} objects, seed {}",
            config.width,
            config.height,
            config.samples_per_pixel,
            config.max_depth,
            scene.len(),
            seed
        );

        Ok(Self {
            tracer: Tracer::new(config, scene, camera, background)?,
            sampler: Sampler::new(seed),
            seed,
        })
    }

    pub fn width(&self) -> u32 {
        self.config().width
    }

    pub fn height(&self) -> u32 {
        self.config().height
    }

    pub fn config(&self) -> &RenderConfig {
        self.tracer.config()
    }

    /// Seed the sampler was last (re)started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the sampler sequence, making subsequent output reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.sampler.reseed(seed);
    }

    /// Compute the color of pixel (x, y); `y = 0` is the bottom row.
    pub fn pixel_color(&mut self, x: u32, y: u32) -> RenderResult<[u8; 3]> {
        self.tracer.pixel_color(x, y, &mut self.sampler)
    }

    /// Write `[R, G, B]` of pixel (x, y) into a caller-owned 3-byte buffer.
    ///
    /// On error the buffer is left untouched.
    pub fn pixel_color_into(&mut self, x: u32, y: u32, out: &mut [u8]) -> RenderResult<()> {
        if out.len() != 3 {
            return Err(RenderError::BufferSize(out.len()));
        }
        let rgb = self.pixel_color(x, y)?;
        out.copy_from_slice(&rgb);
        Ok(())
    }

    /// Render every pixel on the calling thread with the owned sampler.
    pub fn render(&mut self) -> RenderResult<ImageBuffer> {
        let (width, height) = (self.width(), self.height());
        let mut image = ImageBuffer::new(width, height)?;

        for y in 0..height {
            for x in 0..width {
                let rgb = self.pixel_color(x, y)?;
                image.set(x, height - 1 - y, rgb)?;
            }
        }

        Ok(image)
    }

    /// Render every pixel in parallel, one bucket per task.
    ///
    /// Each bucket gets its own sampler derived from the renderer seed and
    /// the bucket index, so the result does not depend on thread count or
    /// scheduling.
    pub fn render_parallel(&self, bucket_size: u32) -> RenderResult<ImageBuffer> {
        if bucket_size == 0 {
            return Err(RenderError::ZeroBucketSize);
        }

        let (width, height) = (self.width(), self.height());
        let mut image = ImageBuffer::new(width, height)?;
        let buckets = generate_buckets(width, height, bucket_size);
        log::debug!("Rendering {} buckets of {} px", buckets.len(), bucket_size);

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let mut sampler = Sampler::new(derive_seed(self.seed, bucket.index as u64));
                render_bucket(bucket, &self.tracer, &mut sampler)
            })
            .collect::<RenderResult<_>>()?;

        for result in &results {
            result.write_to(&mut image)?;
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere, DEFAULT_BUCKET_SIZE};
    use rt_math::Vec3;
    use rt_scene::CameraSettings;

    #[test]
    fn test_sky_gradient() {
        // Ray pointing up should be more blue (less red than white)
        let up_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new(Vec3::ZERO, -Vec3::Y));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down_color - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, -0.5, 1.0)), [127, 0, 255]);
    }

    #[test]
    fn test_miss_returns_background_exactly() {
        let scene = Scene::new();
        let mut sampler = Sampler::new(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, -1.0));

        let sky = ray_color(&ray, &scene, 0, 50, &Background::Sky, &mut sampler);
        assert_eq!(sky, sky_gradient(&ray));

        let solid = Background::Solid {
            color: Color::new(0.1, 0.2, 0.3),
        };
        assert_eq!(
            ray_color(&ray, &scene, 3, 5, &solid, &mut sampler),
            Color::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn test_depth_limit_returns_black() {
        let scene = Scene::new();
        let mut sampler = Sampler::new(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(
            ray_color(&ray, &scene, 50, 50, &Background::Sky, &mut sampler),
            Color::ZERO
        );
    }

    #[test]
    fn test_mirror_box_terminates() {
        // Inside a perfect mirror sphere every path bounces until the depth
        // limit, which must end the recursion.
        let mirror = Material::metal(Color::ONE, 0.0).unwrap();
        let scene = Scene::new().with(Sphere::new(Vec3::ZERO, 10.0, mirror).unwrap());
        let mut sampler = Sampler::new(9);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.1, 1.0));

        let color = ray_color(&ray, &scene, 0, 8, &Background::Sky, &mut sampler);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::new(1, 1, 1).validate().is_ok());
        assert!(matches!(
            RenderConfig::new(0, 10, 1).validate(),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(matches!(
            RenderConfig::new(10, 0, 1).validate(),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            RenderConfig::new(10, 10, 0).validate(),
            Err(RenderError::ZeroSamples)
        ));
        assert!(matches!(
            RenderConfig::new(10, 10, 1).with_max_depth(0).validate(),
            Err(RenderError::ZeroMaxDepth)
        ));
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.5, 0.5, 0.5)).unwrap(),
        )
        .unwrap();
        let config = RenderConfig::new(10, 10, 4).with_max_depth(5).with_seed(42);
        let camera = Camera::new(&CameraSettings::new(), config.aspect_ratio()).unwrap();
        let tracer = Tracer::new(config, Scene::new().with(sphere), camera, Background::Sky).unwrap();

        let mut sampler = Sampler::new(42);
        let color = tracer.sample_pixel(5, 5, &mut sampler).unwrap();

        // Diffuse grey absorbs at least half of the sky light
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 0.5 + 1e-4);
    }

    #[test]
    fn test_out_of_bounds_pixel() {
        let mut renderer = Renderer::new(4, 3, 1).unwrap();
        assert!(matches!(
            renderer.pixel_color(4, 0),
            Err(RenderError::PixelOutOfBounds { x: 4, y: 0, width: 4, height: 3 })
        ));
        assert!(renderer.pixel_color(0, 3).is_err());
    }

    #[test]
    fn test_pixel_color_into_checks_buffer() {
        let mut renderer = Renderer::with_config(RenderConfig::new(4, 4, 2).with_seed(1)).unwrap();

        let mut short = [9u8; 2];
        assert!(matches!(
            renderer.pixel_color_into(0, 0, &mut short),
            Err(RenderError::BufferSize(2))
        ));
        assert_eq!(short, [9, 9]);

        let mut out = [0u8; 3];
        renderer.reseed(5);
        renderer.pixel_color_into(1, 2, &mut out).unwrap();
        renderer.reseed(5);
        assert_eq!(out, renderer.pixel_color(1, 2).unwrap());

        // Failed query leaves the buffer alone
        let before = out;
        assert!(renderer.pixel_color_into(10, 0, &mut out).is_err());
        assert_eq!(out, before);
    }

    #[test]
    fn test_oversized_render_is_an_error() {
        let mut renderer =
            Renderer::with_config(RenderConfig::new(u32::MAX, u32::MAX, 1).with_seed(2)).unwrap();

        // Single pixels are still fine
        assert!(renderer.pixel_color(u32::MAX - 1, u32::MAX - 1).is_ok());

        assert!(matches!(
            renderer.render(),
            Err(RenderError::ImageTooLarge { .. })
        ));
        assert!(matches!(
            renderer.render_parallel(DEFAULT_BUCKET_SIZE),
            Err(RenderError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_bucket_size_rejected() {
        let renderer = Renderer::new(4, 4, 1).unwrap();
        assert!(matches!(
            renderer.render_parallel(0),
            Err(RenderError::ZeroBucketSize)
        ));
    }
}
