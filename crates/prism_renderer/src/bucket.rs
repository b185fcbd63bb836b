//! Square image tiles, the unit of parallel work and of progress reporting.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, PixelSink, RenderConfig};
use rand::RngCore;

/// A tile of the image; edge tiles are clipped to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Top-left pixel column
    pub x: u32,
    /// Top-left pixel row
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order, also the key of the tile's random stream
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Squared distance from the tile's midpoint to `(px, py)`.
    fn distance_sq_to(&self, px: f32, py: f32) -> f32 {
        let mx = self.x as f32 + self.width as f32 / 2.0;
        let my = self.y as f32 + self.height as f32 / 2.0;
        (mx - px).powi(2) + (my - py).powi(2)
    }
}

/// Tile edge length used when the caller does not pick one.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Cover a `width` x `height` image with tiles of `bucket_size`, ordered
/// from the image centre outwards and re-indexed in that order.
///
/// Panics if `bucket_size` is zero.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    assert!(bucket_size > 0, "bucket size must be non-zero");
    let step = bucket_size as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width).step_by(step).map(move |x| {
                Bucket::new(
                    x,
                    y,
                    bucket_size.min(width - x),
                    bucket_size.min(height - y),
                    0,
                )
            })
        })
        .collect();

    // Stable: equally distant tiles stay in row-major order
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }
    buckets
}

/// Seed for a bucket's private random stream.
pub(crate) fn bucket_seed(base_seed: u64, index: usize) -> u64 {
    base_seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Sample every pixel of `bucket`, row by row, drawing only from `rng`.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());
    for y in bucket.y..bucket.y + bucket.height {
        for x in bucket.x..bucket.x + bucket.width {
            pixels.push(render_pixel(camera, world, x, y, config, rng));
        }
    }
    pixels
}

/// A finished tile waiting to be copied into the full image.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Row-major within the tile
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    pub fn write_to(&self, sink: &mut dyn PixelSink) {
        let rows = self.pixels.chunks(self.bucket.width.max(1) as usize);
        for (y, row) in (self.bucket.y..).zip(rows) {
            for (x, color) in (self.bucket.x..).zip(row) {
                sink.set_pixel(x, y, *color);
            }
        }
    }
}
