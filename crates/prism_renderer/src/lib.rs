//! Prism renderer - CPU ray tracing of sphere scenes.
//!
//! A stochastic recursive ray tracer: spheres, Lambertian / metal / dielectric
//! materials, a sky gradient background and jittered supersampling, rendered
//! in parallel buckets.

mod bucket;
mod camera;
mod description;
mod error;
mod hittable;
mod image_buffer;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use description::{CameraDescription, MaterialDescription, ObjectDescription, SceneDescription};
pub use error::{RenderError, SceneError};
pub use hittable::{HitRecord, Hittable};
pub use image_buffer::{color_to_rgb, linear_to_gamma, ImageBuffer, PixelSink};
pub use material::{reflectance, Color, Material, ScatterResult, AIR_REFRACTIVE_INDEX};
pub use renderer::{
    background, render, render_pixel, render_with_progress, shade, trace, RenderConfig,
    RenderProgress,
};
pub use sampling::{
    gen_f32, gen_range_f32, random_in_sphere, random_in_unit_sphere, random_unit_vector,
};
pub use scene::{RenderObject, Scene, MIN_T};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec3};
