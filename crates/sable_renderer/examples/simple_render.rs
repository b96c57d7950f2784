//! Simple path tracer example.
//!
//! Renders three spheres on a ground plane and saves to PPM format.

use std::sync::Arc;

use sable_renderer::{
    output, render, CameraSettings, Color, Dielectric, HittableList, Lambertian, Metal,
    RenderSettings, Sphere, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Sable Path Tracer - Simple Example");
    println!("==================================");

    let mut world = sable_renderer::scene::ground_only();

    // A hollow glass bubble: outer surface plus an inverted inner one
    let glass = Arc::new(Dielectric::new(1.5));
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass.clone()));
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), -0.9, glass));

    world.add(Sphere::new(
        Vec3::new(-2.2, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    ));
    world.add(Sphere::new(
        Vec3::new(2.2, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    ));

    let settings = RenderSettings::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(32, 10)
        .with_threads(8);

    let camera = CameraSettings::default()
        .with_position(Vec3::new(0.0, 2.0, 8.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_lens(30.0, 0.0, 8.0)
        .build(settings.aspect_ratio());

    let start = std::time::Instant::now();
    let image = render(&world, &camera, &settings)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.ppm";
    output::save(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}
