//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use sable_math::{Interval, Vec3};

/// A sphere primitive.
///
/// A negative radius keeps the same surface but flips the outward normal,
/// which turns the sphere inside out. Nested inside a glass sphere this
/// models a hollow bubble.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Both parameters where the ray meets the sphere surface, smaller first.
    ///
    /// Returns `None` when the ray misses the sphere entirely.
    pub fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(((h - sqrtd) / a, (h + sqrtd) / a))
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (near, far) = self.roots(ray)?;

        // Find the nearest root in the acceptable range
        let root = if ray_t.surrounds(near) {
            near
        } else if ray_t.surrounds(far) {
            far
        } else {
            return None;
        };

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};

    fn sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Color::splat(0.5))))
    }

    const FORWARD: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    #[test]
    fn test_sphere_hit() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, FORWARD).expect("should hit");
        assert!((rec.t - 0.5).abs() < 0.001);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_roots_symmetric_about_center_projection() {
        let center = Vec3::new(0.0, 0.0, -5.0);
        let sphere = sphere(center, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let (near, far) = sphere.roots(&ray).expect("ray through center");
        // The center projects onto the ray at t = 5
        assert!(((near + far) / 2.0 - 5.0).abs() < 1e-4);
        assert!((near - 3.0).abs() < 1e-4);
        assert!((far - 7.0).abs() < 1e-4);

        let rec = sphere.hit(&ray, FORWARD).expect("should hit");
        assert!((rec.t - near).abs() < 1e-6);
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -5.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let rec = sphere.hit(&ray, FORWARD).expect("should hit");
        assert!((rec.t - 1.5).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, FORWARD).expect("should hit");
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal faces back toward the origin
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_roots_outside_interval_rejected() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        // Sphere entirely behind the ray origin
        let behind = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.hit(&behind, FORWARD).is_none());
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let solid = sphere(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let hollow = sphere(Vec3::new(0.0, 0.0, -2.0), -1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let outer = solid.hit(&ray, FORWARD).expect("solid hit");
        let inner = hollow.hit(&ray, FORWARD).expect("hollow hit");

        // Same surface point, opposite orientation
        assert!((outer.t - inner.t).abs() < 1e-6);
        assert!(outer.front_face);
        assert!(!inner.front_face);
        assert!((outer.normal - inner.normal).length() < 1e-5);
    }
}
