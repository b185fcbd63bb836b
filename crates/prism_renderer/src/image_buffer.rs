//! Image storage and 8-bit conversion for render output.

use std::path::Path;

use crate::{Color, RenderError};
use prism_math::Interval;

/// Anything the renderer can write finished pixels into.
pub trait PixelSink {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Simple image buffer for storing render output.
///
/// Pixels are row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_index(width, 0, height)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[pixel_index(self.width, x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[pixel_index(self.width, x, y)] = color;
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self, gamma_correct: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color, gamma_correct));
        }
        bytes
    }

    /// Encode and write the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>, gamma_correct: bool) -> Result<(), RenderError> {
        let path = path.as_ref();
        let buffer = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8(gamma_correct))
            .ok_or(RenderError::BufferSize {
                width: self.width,
                height: self.height,
            })?;
        buffer.save(path)?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl PixelSink for ImageBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

/// Row-major offset of (x, y), computed in `usize` so large images cannot wrap.
#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb(color: Color, gamma_correct: bool) -> [u8; 3] {
    let encode = |c: f32| {
        let c = if gamma_correct { linear_to_gamma(c) } else { c };
        (255.0 * Interval::UNIT.clamp(c)).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}
