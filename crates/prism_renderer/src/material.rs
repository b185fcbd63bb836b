//! Surface materials and the scatter engine.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_sphere, random_unit_vector};
use prism_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Index of refraction of the medium the camera sits in.
pub const AIR_REFRACTIVE_INDEX: f32 = 1.0;

/// Scatter directions shorter than this are treated as degenerate.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian reflector.
    Diffuse { albedo: Color },
    /// Mirror whose reflections are blurred by `roughness` (0 = perfect mirror).
    Metal { albedo: Color, roughness: f32 },
    /// Colourless refracting medium such as glass or water.
    Dielectric { refractive_index: f32 },
}

/// An outgoing ray and how much of its light reaches the incoming ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

impl Material {
    pub fn diffuse(albedo: Color) -> Self {
        Self::Diffuse { albedo }
    }

    /// Panics if `roughness` is negative or not finite.
    pub fn metal(albedo: Color, roughness: f32) -> Self {
        assert!(
            roughness.is_finite() && roughness >= 0.0,
            "metal roughness must be non-negative, got {roughness}"
        );
        Self::Metal { albedo, roughness }
    }

    /// Panics if `refractive_index` is not a positive finite number.
    pub fn dielectric(refractive_index: f32) -> Self {
        assert!(
            refractive_index.is_finite() && refractive_index > 0.0,
            "refractive index must be positive, got {refractive_index}"
        );
        Self::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `Some` with the outgoing ray and its attenuation, or `None` if
    /// the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Diffuse { albedo } => Some(scatter_diffuse(albedo, rec, rng)),
            Material::Metal { albedo, roughness } => {
                scatter_metal(albedo, roughness, ray_in, rec, rng)
            }
            Material::Dielectric { refractive_index } => {
                Some(scatter_dielectric(refractive_index, ray_in, rec, rng))
            }
        }
    }
}

fn scatter_diffuse(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if scatter_direction.length_squared() < NEAR_ZERO_EPSILON * NEAR_ZERO_EPSILON {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.point, scatter_direction),
    }
}

fn scatter_metal(
    albedo: Color,
    roughness: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let mut reflected = reflect(ray_in.direction(), rec.normal);

    if roughness > 0.0 {
        // Aim at a random point near the mirror target instead
        let target = random_in_sphere(rng, rec.point + reflected, roughness);
        reflected = target - rec.point;
    }

    // Only scatter if the reflected ray leaves the surface
    if reflected.dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.point, reflected),
    })
}

fn scatter_dielectric(
    refractive_index: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let direction = ray_in.direction();

    let mut refraction_ratio = AIR_REFRACTIVE_INDEX / refractive_index;
    // Ray and outward normal agree: the ray is leaving the medium
    if direction.dot(rec.normal) > 0.0 {
        refraction_ratio = 1.0 / refraction_ratio;
    }

    let cos_theta = (-direction).dot(rec.normal);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let schlick_reflects =
        reflectance(cos_theta as f64, refraction_ratio as f64) > gen_f32(rng) as f64;

    let scattered_direction = if cannot_refract || schlick_reflects {
        reflect(direction, rec.normal)
    } else {
        refract(direction, rec.normal, cos_theta, refraction_ratio)
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.point, scattered_direction),
    }
}

/// Schlick's approximation of the Fresnel reflectance.
pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law, vector form).
#[inline]
fn refract(uv: Vec3, n: Vec3, cos_theta: f32, refraction_ratio: f32) -> Vec3 {
    let r_out_perp = refraction_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
