//! Demo scene construction.

use std::sync::Arc;

use rand::RngCore;
use sable_math::sampling::{gen_f32, gen_range_f32, random_vec3, random_vec3_range};

use crate::{Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3};

/// Radius of the ground sphere; large enough to look like a plane.
pub const GROUND_RADIUS: f32 = 1000.0;

/// Small spheres closer than this to the metal hero sphere are skipped.
const KEEP_OUT: f32 = 0.9;

/// Ground only: a huge grey diffuse sphere whose top touches y = 0.
pub fn ground_only() -> HittableList {
    let mut world = HittableList::new();
    world.add(ground());
    world
}

fn ground() -> Sphere {
    Sphere::new(
        Vec3::new(0.0, -GROUND_RADIUS, 0.0),
        GROUND_RADIUS,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )
}

/// The classic cover scene: ground, a 22x22 grid of small random spheres
/// and three large hero spheres (glass, diffuse, metal).
pub fn random_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();
    world.add(ground());

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= KEEP_OUT {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng) * random_vec3(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                // Glass
                Arc::new(Dielectric::new(1.5))
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    log::info!("Created {} objects", world.len());
    world
}
