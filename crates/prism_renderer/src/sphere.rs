//! Sphere primitive for ray tracing.

use prism_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Panics if `radius` is not a positive finite number.
    pub fn new(center: Vec3, radius: f32) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "sphere radius must be positive, got {radius}"
        );
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Ray parameter of the near surface, or `None` when the ray's line misses.
    ///
    /// Only the smaller root is returned. A ray starting inside the sphere gets
    /// a negative t here, so the far wall is never reported for it.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        // a = dot(D, D) = 1 since ray directions are normalized
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        Some((-b - discriminant.sqrt()) / 2.0)
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn outward_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_near_surface() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.intersect(&ray).expect("ray should hit the sphere");
        assert!((t - 4.0).abs() < 1e-4, "t={t}");
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_tangent_ray() {
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.intersect(&ray).expect("tangent ray touches the sphere");
        assert!((t - 5.0).abs() < 1e-3, "t={t}");
    }

    #[test]
    fn test_sphere_behind_ray_gives_negative_root() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.intersect(&ray).unwrap();
        assert!(t < 0.0);
    }

    #[test]
    fn test_ray_from_inside_reports_only_near_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = sphere.intersect(&ray).unwrap();
        assert!((t + 2.0).abs() < 1e-5, "t={t}");
    }

    #[test]
    fn test_outward_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let n = sphere.outward_normal(Vec3::new(0.0, 0.0, -4.0));
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_sphere_rejects_zero_radius() {
        Sphere::new(Vec3::ZERO, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_sphere_rejects_negative_radius() {
        Sphere::new(Vec3::ZERO, -1.0);
    }
}
