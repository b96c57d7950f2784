use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sable_renderer::{output, render, scene, CameraSettings, RenderSettings};
use std::time::Instant;

/// Where the finished frame is written; the extension picks the format.
const OUTPUT_PATH: &str = "output.png";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = RenderSettings::default();
    let camera = CameraSettings::default().build(settings.aspect_ratio());

    let start = Instant::now();
    let world = scene::random_scene(&mut StdRng::from_entropy());
    log::info!("Scene built in {:?}", start.elapsed());

    let start = Instant::now();
    let image = render(&world, &camera, &settings).context("render failed")?;
    log::info!("Rendered in {:?}", start.elapsed());

    output::save(&image, OUTPUT_PATH)
        .with_context(|| format!("failed to write {}", OUTPUT_PATH))?;

    Ok(())
}
