//! Surface scattering.
//!
//! The material set is closed, so it is a plain enum with an exhaustive
//! `scatter` instead of a trait object.

use rand::RngCore;
use rt_math::{is_near_zero, reflect, refract, Color};
use rt_scene::error::{validate_albedo, validate_fuzz, validate_refractive_index};
use rt_scene::{MaterialDescription, SceneError, SceneResult};

use crate::{hittable::HitRecord, Ray, Sampler};

/// Result of a ray scattering off a surface.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Color the continued path is multiplied by
    pub attenuation: Color,
    /// Outgoing ray
    pub scattered: Ray,
}

/// Ideal diffuse reflector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> SceneResult<Self> {
        Ok(Self {
            albedo: validate_albedo(albedo)?,
        })
    }
}

/// Mirror-like reflector; `fuzz` in [0, 1] roughens the reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// - `fuzz`: 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> SceneResult<Self> {
        Ok(Self {
            albedo: validate_albedo(albedo)?,
            fuzz: validate_fuzz(fuzz)?,
        })
    }
}

/// Clear refractive material such as glass or water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    refractive_index: f32,
}

impl Dielectric {
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn new(refractive_index: f32) -> SceneResult<Self> {
        Ok(Self {
            refractive_index: validate_refractive_index(refractive_index)?,
        })
    }
}

/// How light interacts with a surface.
///
/// Parameters are only reachable through the validating constructors, so a
/// `Material` always holds physically usable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> SceneResult<Self> {
        Lambertian::new(albedo).map(Material::Lambertian)
    }

    /// Metal with the given albedo and roughness.
    pub fn metal(albedo: Color, fuzz: f32) -> SceneResult<Self> {
        Metal::new(albedo, fuzz).map(Material::Metal)
    }

    /// Dielectric with the given index of refraction.
    pub fn dielectric(refractive_index: f32) -> SceneResult<Self> {
        Dielectric::new(refractive_index).map(Material::Dielectric)
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter<R: RngCore>(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        sampler: &mut Sampler<R>,
    ) -> Option<Scatter> {
        match *self {
            Material::Lambertian(Lambertian { albedo }) => {
                let mut direction = rec.normal + sampler.in_unit_sphere();

                // Catch degenerate scatter direction
                if is_near_zero(direction) {
                    direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Metal(Metal { albedo, fuzz }) => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * sampler.in_unit_sphere();

                // Fuzz pushed the ray below the surface
                if direction.dot(rec.normal) <= 0.0 {
                    return None;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Dielectric(Dielectric { refractive_index }) => {
                let ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    refractive_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction =
                    if cannot_refract || reflectance(cos_theta, ratio) > sampler.uniform() {
                        reflect(unit_direction, rec.normal)
                    } else {
                        refract(unit_direction, rec.normal, ratio)
                    };

                Some(Scatter {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

impl TryFrom<&MaterialDescription> for Material {
    type Error = SceneError;

    fn try_from(desc: &MaterialDescription) -> Result<Self, Self::Error> {
        match *desc {
            MaterialDescription::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDescription::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDescription::Dielectric { refractive_index } => {
                Material::dielectric(refractive_index)
            }
        }
    }
}

/// Schlick's approximation for reflectance
fn reflectance(cosine: f32, ratio: f32) -> f32 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_math::Vec3;

    /// Hit on the top of a unit sphere at the origin, seen from above.
    fn top_hit(material: &Material) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::Y,
            normal: Vec3::Y,
            t: 1.0,
            front_face: true,
            material,
        }
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let mat = Material::lambertian(Color::new(0.2, 0.4, 0.6)).unwrap();
        let rec = top_hit(&mat);
        let ray_in = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        let mut sampler = Sampler::new(11);

        for _ in 0..1000 {
            let s = mat.scatter(&ray_in, &rec, &mut sampler).expect("diffuse scatters");
            assert_eq!(s.attenuation, Color::new(0.2, 0.4, 0.6));
            assert_eq!(s.scattered.origin(), rec.p);
            // normal + point in unit sphere stays in the upper hemisphere
            assert!(s.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mat = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0).unwrap();
        let rec = top_hit(&mat);
        let ray_in = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut sampler = Sampler::new(12);

        let s = mat.scatter(&ray_in, &rec, &mut sampler).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((s.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(s.attenuation, Color::splat(0.8));
    }

    #[test]
    fn test_fuzzy_metal_absorbs_grazing_rays() {
        let mat = Material::metal(Color::ONE, 1.0).unwrap();
        let rec = top_hit(&mat);
        // Nearly tangent incoming ray
        let ray_in = Ray::new(Vec3::new(-1.0, 1.001, 0.0), Vec3::new(1.0, -0.001, 0.0));
        let mut sampler = Sampler::new(13);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match mat.scatter(&ray_in, &rec, &mut sampler) {
                Some(s) => assert!(s.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_is_transparent_and_never_absorbs() {
        let mat = Material::dielectric(1.5).unwrap();
        let rec = top_hit(&mat);
        let ray_in = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(0.5, -1.0, 0.0));
        let mut sampler = Sampler::new(14);

        let mut reflected = 0;
        let mut refracted = 0;
        for _ in 0..2000 {
            let s = mat.scatter(&ray_in, &rec, &mut sampler).unwrap();
            assert_eq!(s.attenuation, Color::ONE);
            if s.scattered.direction().y > 0.0 {
                reflected += 1;
            } else {
                refracted += 1;
            }
        }
        // Entering glass at a moderate angle mostly refracts
        assert!(refracted > reflected);
        assert!(reflected > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Material::dielectric(1.5).unwrap();
        // Leaving the glass upward at a steep angle: back face, normal
        // flipped to point against the ray.
        let rec = HitRecord {
            p: Vec3::Y,
            normal: -Vec3::Y,
            t: 1.0,
            front_face: false,
            material: &mat,
        };
        let ray_in = Ray::new(Vec3::new(-1.0, 0.9, 0.0), Vec3::new(1.0, 0.1, 0.0));
        let mut sampler = Sampler::new(15);

        for _ in 0..100 {
            let s = mat.scatter(&ray_in, &rec, &mut sampler).unwrap();
            let expected = reflect(ray_in.direction().normalize(), rec.normal);
            assert!((s.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Head-on at an air/glass interface reflects about 4%
        assert!((reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-3);
        // Grazing incidence reflects everything
        assert!((reflectance(0.0, 1.0 / 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_variant_structs_validate() {
        assert!(Metal::new(Color::ONE, 5.0).is_err());
        assert!(Dielectric::new(0.0).is_err());
        assert!(Lambertian::new(Color::splat(-1.0)).is_err());

        assert_eq!(
            Material::lambertian(Color::splat(0.3)).unwrap(),
            Material::Lambertian(Lambertian::new(Color::splat(0.3)).unwrap())
        );
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Material::metal(Color::ONE, 1.5).is_err());
        assert!(Material::metal(Color::ONE, -0.1).is_err());
        assert!(Material::dielectric(0.0).is_err());
        assert!(Material::lambertian(Color::new(f32::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_from_description() {
        let desc = MaterialDescription::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.2,
        };
        assert_eq!(
            Material::try_from(&desc).unwrap(),
            Material::metal(Color::new(0.7, 0.6, 0.5), 0.2).unwrap()
        );

        let bad = MaterialDescription::Dielectric {
            refractive_index: -1.0,
        };
        assert!(Material::try_from(&bad).is_err());
    }
}
