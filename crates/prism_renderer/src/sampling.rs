//! Uniform random helpers shared by the camera and the materials.
//!
//! Everything takes `&mut dyn RngCore` so each render worker can drive its own
//! private stream.

use prism_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in [min, max).
///
/// Panics if `min >= max`.
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    assert!(min < max, "empty random range [{min}, {max})");
    gen_f32(rng) * (max - min) + min
}

/// Uniform point inside the unit ball, by rejection from the [-1, 1) cube.
///
/// Roughly half the candidates are accepted, so the loop has no cap.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere surface.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // The origin itself has no direction
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the ball at `center` with the given `radius`.
pub fn random_in_sphere(rng: &mut dyn RngCore, center: Vec3, radius: f32) -> Vec3 {
    center + random_in_unit_sphere(rng) * radius
}
