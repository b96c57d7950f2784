//! Multi-threaded rendering by splitting the sample budget.
//!
//! Every worker renders the whole frame with its share of the samples per
//! pixel. Each partial image is an independent, lower-sample estimate of the
//! same picture, so averaging them gives the full-budget result. There is
//! no work queue: one rayon thread per worker, one job per thread.

use image::RgbImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::ThreadPoolBuilder;

use crate::renderer::render_pixel;
use crate::{Camera, Hittable, PartialImage, Progress, RenderError, RenderResult, RenderSettings};

/// Everything a worker needs, shared read-only by all workers.
pub struct RenderJob<'a> {
    pub world: &'a dyn Hittable,
    pub camera: &'a Camera,
    pub settings: &'a RenderSettings,
    pub progress: &'a Progress,
}

impl RenderJob<'_> {
    /// Render the full frame with `samples` samples per pixel.
    ///
    /// Scanlines go from the top of the image (`j = height - 1`) down to the
    /// bottom, and progress is reported after each one.
    pub fn render_partial(
        &self,
        worker: usize,
        samples: u32,
        rng: &mut dyn RngCore,
    ) -> PartialImage {
        let width = self.settings.image_width;
        let height = self.settings.image_height;
        let mut image = PartialImage::new(width, height, samples);

        self.progress.start(worker);

        for j in (0..height).rev() {
            let row = image.row_mut(height - 1 - j);
            for (i, pixel) in (0..width).zip(row.iter_mut()) {
                *pixel = render_pixel(
                    self.camera,
                    self.world,
                    (i, j),
                    (width, height),
                    samples,
                    self.settings.max_depth,
                    rng,
                );
            }
            self.progress.update(worker, j);
        }

        log::debug!("Worker {} finished {} spp", worker, samples);
        image
    }
}

/// Random generator for one worker.
fn worker_rng(seed: Option<u64>, worker: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Render one partial image per worker, in worker order.
///
/// Blocks until every worker has finished.
pub fn render_partials(
    world: &dyn Hittable,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<Vec<PartialImage>> {
    settings.validate()?;

    let split = settings.sample_split();
    let workers = split.len();
    log::debug!("Sample split across {} workers: {:?}", workers, split);
    if workers < settings.threads {
        log::warn!(
            "Only {} samples per pixel for {} threads; running {} workers",
            settings.samples_per_pixel,
            settings.threads,
            workers
        );
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("sable-worker-{index}"))
        .build()?;
    log::info!(
        "Rendering {}x{} @ {} spp on {} threads",
        settings.image_width,
        settings.image_height,
        settings.samples_per_pixel,
        workers
    );

    let progress = Progress::new(workers, settings.image_height, settings.report_progress);
    let job = RenderJob {
        world,
        camera,
        settings,
        progress: &progress,
    };

    let mut slots: Vec<Option<PartialImage>> = (0..workers).map(|_| None).collect();
    pool.scope(|scope| {
        for (worker, (slot, &samples)) in slots.iter_mut().zip(&split).enumerate() {
            let job = &job;
            scope.spawn(move |_| {
                let mut rng = worker_rng(settings.seed, worker);
                *slot = Some(job.render_partial(worker, samples, &mut rng));
            });
        }
    });
    progress.finish();

    slots
        .into_iter()
        .enumerate()
        .map(|(worker, slot)| slot.ok_or(RenderError::MissingPartial(worker)))
        .collect()
}

/// Render and merge into one linear image.
pub fn render_linear(
    world: &dyn Hittable,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<PartialImage> {
    let partials = render_partials(world, camera, settings)?;
    PartialImage::average(&partials)
}

/// Render the scene into a gamma-corrected 8-bit image.
pub fn render(
    world: &dyn Hittable,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<RgbImage> {
    Ok(render_linear(world, camera, settings)?.to_rgb8())
}
