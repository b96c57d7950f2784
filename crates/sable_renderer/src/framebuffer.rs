//! Per-worker partial images and the merge into the final frame.
//!
//! Partial images keep linear, per-pixel averaged color. Gamma correction
//! happens once, when converting to 8-bit, so merging several workers does
//! not average already gamma-encoded values.

use crate::renderer::color_to_rgb8;
use crate::{Color, RenderError, RenderResult};
use image::RgbImage;
use rayon::prelude::*;

/// Full-resolution frame rendered by one worker.
///
/// Rows are stored top to bottom, pixels left to right. Each pixel is the
/// mean of `samples_per_pixel` radiance estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialImage {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl PartialImage {
    /// Create a new partial image filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples behind every pixel of this image.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Get the pixel at (x, y), y counted from the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y), y counted from the top row.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Mutable access to one row, y counted from the top.
    pub fn row_mut(&mut self, y: u32) -> &mut [Color] {
        let start = (y * self.width) as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// All pixels in row-major, top-to-bottom order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mean color over the whole image.
    pub fn mean(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }

    /// Gamma-correct into an 8-bit RGB image.
    pub fn to_rgb8(&self) -> RgbImage {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        // Length is width * height * 3 by construction
        RgbImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    /// Merge partial images by per-pixel averaging.
    ///
    /// Each image is weighted by its sample count, so the result is the
    /// same estimate a single worker would produce with the summed budget.
    /// With equal sample counts this is the plain elementwise mean.
    pub fn average(images: &[PartialImage]) -> RenderResult<PartialImage> {
        let first = images.first().ok_or(RenderError::NothingToMerge)?;
        let expected = (first.width, first.height);

        for image in images {
            let actual = (image.width, image.height);
            if actual != expected {
                return Err(RenderError::DimensionMismatch { expected, actual });
            }
        }

        let total_samples: u32 = images.iter().map(|image| image.samples_per_pixel).sum();
        let weights: Vec<f32> = images
            .iter()
            .map(|image| image.samples_per_pixel as f32 / total_samples.max(1) as f32)
            .collect();

        let mut merged = PartialImage::new(first.width, first.height, total_samples);
        merged
            .pixels
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, pixel)| {
                *pixel = images
                    .iter()
                    .zip(&weights)
                    .map(|(image, &weight)| image.pixels[index] * weight)
                    .sum();
            });

        log::debug!(
            "Merged {} partial images into {} samples per pixel",
            images.len(),
            total_samples
        );

        Ok(merged)
    }
}
