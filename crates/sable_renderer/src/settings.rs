//! Render settings.
//!
//! All knobs are startup constants: `RenderSettings::default()` is the
//! configuration the `sable` binary renders with.

use crate::{RenderError, RenderResult};

/// Image size, sample budget and threading for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Total samples per pixel, split across all workers
    pub samples_per_pixel: u32,
    /// Number of worker threads, each rendering the full frame
    pub threads: usize,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Fixed seed for reproducible renders; worker `i` uses `seed + i`
    pub seed: Option<u64>,
    /// Whether to print the in-place progress line to stderr
    pub report_progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 600,
            image_height: (600.0 / (16.0 / 9.0)) as u32,
            samples_per_pixel: 16,
            threads: 16,
            max_depth: 10,
            seed: None,
            report_progress: true,
        }
    }
}

impl RenderSettings {
    /// Set image width and derive the height from the aspect ratio.
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f32) -> Self {
        self.image_width = width;
        self.image_height = (width as f32 / aspect_ratio) as u32;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Use a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the progress line.
    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    /// Width over height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Check that the settings describe a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width < 2 || self.image_height < 2 {
            return Err(RenderError::InvalidSettings(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSettings(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidSettings(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Split the per-pixel sample budget across workers.
    ///
    /// Every worker gets `samples / threads`; the first `samples % threads`
    /// workers take one extra sample so the whole budget is spent. Workers
    /// that would get no samples at all are not created, so the result may
    /// be shorter than `threads`.
    pub fn sample_split(&self) -> Vec<u32> {
        let threads = self.threads.max(1) as u32;
        let base = self.samples_per_pixel / threads;
        let remainder = self.samples_per_pixel % threads;

        (0..threads)
            .map(|worker| base + u32::from(worker < remainder))
            .filter(|&samples| samples > 0)
            .collect()
    }
}
