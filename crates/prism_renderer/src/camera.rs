//! Pinhole camera for ray generation.

use crate::sampling::gen_f32;
use prism_math::{Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// The defaults look down -Z from the origin with +Y up, through an image
/// plane 2 units tall placed 1.5 units in front of the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    focal_length: f32,    // Distance from camera to image plane
    viewport_height: f32, // Height of the image plane in world units

    // Cached computed values (set by initialize())
    center: Vec3,
    upper_left: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    pub const DEFAULT_FOCAL_LENGTH: f32 = 1.5;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 2.0;

    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 360,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            focal_length: Self::DEFAULT_FOCAL_LENGTH,
            viewport_height: Self::DEFAULT_VIEWPORT_HEIGHT,
            // Cached values (initialized to defaults)
            center: Vec3::ZERO,
            upper_left: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, focal_length: f32, viewport_height: f32) -> Self {
        self.focal_length = focal_length;
        self.viewport_height = viewport_height;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// Panics on a zero resolution, non-positive lens values or a degenerate
    /// orientation.
    pub fn initialize(&mut self) {
        assert!(
            self.image_width > 0 && self.image_height > 0,
            "image resolution must be non-zero, got {}x{}",
            self.image_width,
            self.image_height
        );
        assert!(
            self.focal_length > 0.0 && self.viewport_height > 0.0,
            "lens values must be positive (focal length {}, viewport height {})",
            self.focal_length,
            self.viewport_height
        );

        self.center = self.look_from;

        // Square pixels: width follows the aspect ratio
        let viewport_width =
            self.viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);
        assert!(
            w.is_finite() && u.is_finite(),
            "camera orientation is degenerate (look_at equals look_from or is parallel to up)"
        );

        // Calculate viewport vectors, v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -self.viewport_height * v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Top-left corner of the image plane; pixels cover [x, x+1) x [y, y+1)
        self.upper_left = self.center - self.focal_length * w - viewport_u / 2.0 - viewport_v / 2.0;
    }

    /// Generate a ray through a uniformly jittered point of pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_u = gen_f32(rng);
        let offset_v = gen_f32(rng);

        let pixel_sample = self.upper_left
            + ((x as f32) + offset_u) * self.pixel_delta_u
            + ((y as f32) + offset_v) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_default_matches_image_plane_layout() {
        let mut camera = Camera::new().with_resolution(640, 360);
        camera.initialize();

        assert_eq!(camera.center, Vec3::ZERO);
        let plane_width = 2.0 * 640.0 / 360.0;
        let expected = Vec3::new(-plane_width / 2.0, 1.0, -1.5);
        assert!((camera.upper_left - expected).length() < 1e-5);
        assert!((camera.pixel_delta_u.length() - plane_width / 640.0).abs() < 1e-6);
        // Square pixels
        assert!((camera.pixel_delta_v.length() - camera.pixel_delta_u.length()).abs() < 1e-6);
    }

    #[test]
    fn test_camera_rays_stay_inside_pixel_footprint() {
        let mut camera = Camera::new().with_resolution(4, 2);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(42);

        // Pixel (0, 0) covers x in [-2, -1], y in [0, 1] on the plane z = -1.5
        for _ in 0..1_000 {
            let ray = camera.get_ray(0, 0, &mut rng);
            let d = ray.direction();
            assert!((d.length() - 1.0).abs() < 1e-5);
            let hit = ray.at(-1.5 / d.z);
            assert!(hit.x >= -2.0 - 1e-5 && hit.x <= -1.0 + 1e-5, "x={}", hit.x);
            assert!(hit.y >= -1e-5 && hit.y <= 1.0 + 1e-5, "y={}", hit.y);
        }
    }

    #[test]
    fn test_camera_look_at() {
        let mut camera = Camera::new()
            .with_resolution(100, 100)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(1);

        // Center pixel should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert!(ray.direction().z < -0.99);
    }

    #[test]
    #[should_panic]
    fn test_camera_rejects_zero_resolution() {
        let mut camera = Camera::new().with_resolution(0, 10);
        camera.initialize();
    }
}
