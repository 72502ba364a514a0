//! The intersectable world: an ordered list of objects.

use crate::{HitRecord, Hittable, Material, Ray, Sphere};
use rt_math::Interval;
use rt_scene::{SceneDescription, SceneError, SceneResult};

/// A list of hittable objects. Insertion order does not matter, the
/// nearest hit wins.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build the geometry of a scene description.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let mut scene = Scene::new();

        for (index, object) in desc.objects.iter().enumerate() {
            let sphere = Material::try_from(&object.material)
                .and_then(|material| Sphere::new(object.center, object.radius, material))
                .map_err(|e| SceneError::Object {
                    index,
                    source: Box::new(e),
                })?;
            scene.add(Box::new(sphere));
        }

        log::debug!("Scene built with {} objects", scene.len());
        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Builder form of [`Scene::add`].
    pub fn with(mut self, object: impl Hittable + 'static) -> Self {
        self.add(Box::new(object));
        self
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}
