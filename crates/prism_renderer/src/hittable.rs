//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use prism_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Borrows the material from the scene, so it only lives for the
/// intersection and scatter step of a single ray.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest hit with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}
