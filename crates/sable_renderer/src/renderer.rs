//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounded depth
//! - A sky gradient that acts as the only light source
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction on output

use crate::{Camera, Color, Hittable, Ray};
use rand::RngCore;
use sable_math::sampling::gen_f32;
use sable_math::Interval;

/// Minimum hit distance; avoids self-intersection ("shadow acne").
pub const T_MIN: f32 = 0.001;

/// Sky color straight down (and at the horizon blend start).
pub const SKY_BOTTOM: Color = Color::new(1.0, 1.0, 1.0);

/// Sky color straight up.
pub const SKY_TOP: Color = Color::new(0.5, 0.7, 1.0);

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and multiplying
/// in each material's attenuation, until it escapes to the sky, gets
/// absorbed, or runs out of depth.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background gradient, blended on the ray's vertical direction.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    SKY_BOTTOM * (1.0 - a) + SKY_TOP * a
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

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Estimate the color of pixel `(i, j)` from `samples` jittered rays.
///
/// `j` counts scanlines from the bottom of the image, matching the camera's
/// image-plane coordinates. Returns the mean of the samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    (i, j): (u32, u32),
    (width, height): (u32, u32),
    samples: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let u = (i as f32 + gen_f32(rng)) / (width - 1) as f32;
        let v = (j as f32 + gen_f32(rng)) / (height - 1) as f32;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, max_depth, rng);
    }

    pixel_color / samples.max(1) as f32
}
