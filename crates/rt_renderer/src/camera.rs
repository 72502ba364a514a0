//! Camera for ray generation.

use crate::{Ray, Sampler};
use rand::RngCore;
use rt_math::Vec3;
use rt_scene::{CameraSettings, SceneError, SceneResult};

/// Thin-lens camera mapping normalized image coordinates to world rays.
///
/// `s` runs left to right and `t` bottom to top, both in [0, 1].
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build a camera for an image with the given width/height ratio.
    pub fn new(settings: &CameraSettings, aspect_ratio: f32) -> SceneResult<Self> {
        settings.validate()?;
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                aspect_ratio
            )));
        }

        let focus_dist = settings.focus_distance();

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width = viewport_height * aspect_ratio;

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        })
    }

    /// Generate a ray through normalized image-plane point (s, t).
    ///
    /// With a non-zero aperture the ray starts from a random point on the
    /// lens disk and passes through the focus plane.
    pub fn get_ray<R: RngCore>(&self, s: f32, t: f32, sampler: &mut Sampler<R>) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * sampler.in_unit_disk();
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }
}
