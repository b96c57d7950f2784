//! Sable - multi-threaded CPU path tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres with diffuse,
//! metal and glass materials, lit by a sky gradient.
//!
//! Rendering splits the per-pixel sample budget across worker threads.
//! Each worker renders the full frame into its own partial image, and the
//! partial images are averaged into the final picture.

mod camera;
mod error;
mod framebuffer;
mod hittable;
mod material;
pub mod output;
mod parallel;
mod progress;
mod renderer;
pub mod scene;
mod settings;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{OutputError, OutputResult, RenderError, RenderResult};
pub use framebuffer::PartialImage;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use parallel::{render, render_linear, render_partials, RenderJob};
pub use progress::{format_status, Progress, ProgressSnapshot, WorkerState};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render_pixel, sky_color, SKY_BOTTOM, SKY_TOP,
    T_MIN,
};
pub use settings::RenderSettings;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from sable_math
pub use sable_math::{Color, Interval, Ray, Vec3};
