//! Scene objects and the nearest-hit resolver.

use crate::hittable::{HitRecord, Hittable};
use crate::{Material, Sphere};
use prism_math::{Interval, Ray};

/// Smallest accepted ray parameter. Rays leaving a surface would otherwise
/// re-hit it at t ~ 0 (shadow acne).
pub const MIN_T: f32 = 0.001;

/// A sphere paired with its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderObject {
    pub geometry: Sphere,
    pub material: Material,
}

impl RenderObject {
    pub fn new(geometry: Sphere, material: Material) -> Self {
        Self { geometry, material }
    }
}

impl Hittable for RenderObject {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = self.geometry.intersect(ray)?;
        if !ray_t.surrounds(t) {
            return None;
        }

        let point = ray.at(t);
        Some(HitRecord {
            point,
            normal: self.geometry.outward_normal(point),
            material: &self.material,
            t,
        })
    }
}

/// An ordered, immutable list of render objects.
///
/// Traversal is linear in the object count. Order only matters for ties,
/// where the earlier object wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    objects: Vec<RenderObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the end of the list.
    pub fn add(&mut self, object: RenderObject) {
        self.objects.push(object);
    }

    /// Builder-style [`Scene::add`].
    pub fn with(mut self, object: RenderObject) -> Self {
        self.add(object);
        self
    }

    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit beyond [`MIN_T`].
    pub fn hit_nearest(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.hit(ray, Interval::from_min(MIN_T))
    }
}

impl FromIterator<RenderObject> for Scene {
    fn from_iter<I: IntoIterator<Item = RenderObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            // Strict upper bound keeps the first object on exact ties
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
