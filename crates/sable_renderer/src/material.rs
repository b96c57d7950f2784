//! Material trait for surface scattering.

use crate::{hittable::HitRecord, Color, Ray};
use rand::RngCore;
use sable_math::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use sable_math::Vec3;

/// Result of a successful scatter: how much light survives the bounce and
/// where the path continues.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel attenuation applied to the light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are shared read-only between primitives and render threads.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Normal plus a point in the unit sphere approximates a cosine lobe.
        // A near-zero direction is left alone; the next hit test just misses.
        let scatter_direction = rec.normal + random_in_unit_sphere(rng);

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Roughness after clamping into `[0, 1]`.
    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_unit_vector(rng)
        } else {
            reflected
        };

        // Fuzz can push the ray below the surface; absorb it
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material. Colorless: attenuation is always white.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).clamp(-1.0, 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).clamp(-1.0, 1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, material: &'a dyn Material, outward_normal: Vec3) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, outward_normal, material)
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let material = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let mut rng = StdRng::seed_from_u64(1);

        for normal in [Vec3::Y, Vec3::X, -Vec3::Z, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            let ray = Ray::new(normal * 2.0, -normal);
            let rec = record(&ray, &material, normal);
            for _ in 0..200 {
                let result = material
                    .scatter(&ray, &rec, &mut rng)
                    .expect("diffuse never absorbs");
                assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
                assert_eq!(result.scattered.origin(), rec.p);
                // Direction stays in the hemisphere of the normal
                assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            }
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let mut rng = StdRng::seed_from_u64(2);

        let incoming = Vec3::new(1.0, -1.0, 0.5);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, -0.5), incoming);
        let rec = record(&ray, &material, Vec3::Y);

        let result = material.scatter(&ray, &rec, &mut rng).expect("mirror scatters");
        let reflected = result.scattered.direction();
        let unit_in = incoming.normalize();

        assert!((reflected.dot(rec.normal) - (-unit_in).dot(rec.normal)).abs() < 1e-5);
        // Tangential component is preserved
        assert!((reflected.x - unit_in.x).abs() < 1e-5);
        assert!((reflected.z - unit_in.z).abs() < 1e-5);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        let material = Metal::new(Color::ONE, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        // Grazing incidence: fuzz sends a good share of rays under the surface
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, &material, Vec3::Y);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_always_scatters_white() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(4);

        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.3, -1.0, 0.1));
        let rec = record(&ray, &material, Vec3::Y);

        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("glass scatters");
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_splits_by_reflectance() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(6);

        // Straight down into glass: r0 = 0.04, so about 4% of rays reflect
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        let rec = record(&ray, &material, Vec3::Y);
        assert!(rec.front_face);

        let total = 10_000;
        let mut refracted = 0;
        for _ in 0..total {
            let result = material.scatter(&ray, &rec, &mut rng).expect("glass scatters");
            let direction = result.scattered.direction();
            if direction.y < 0.0 {
                assert!((direction - -Vec3::Y).length() < 1e-5);
                refracted += 1;
            } else {
                assert!((direction - Vec3::Y).length() < 1e-5);
            }
        }

        let reflected = total - refracted;
        assert!((250..=550).contains(&reflected), "reflected {reflected}/{total}");
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(5);

        // Leaving glass at a grazing angle: ratio 1.5, sin ~ 0.99
        let direction = Vec3::new(1.0, 0.1, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, -0.1, 0.0), direction);
        let rec = record(&ray, &material, Vec3::Y);
        assert!(!rec.front_face);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("glass scatters");
            let expected = reflect(direction.normalize(), rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_refract_normal_incidence_passes_straight() {
        let refracted = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5);
        assert!((refracted - -Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ratio = 1.0 / 1.5;
        let refracted = refract(incoming, Vec3::Y, ratio);

        let sin_in = incoming.x;
        let sin_out = refracted.x / refracted.length();
        assert!((sin_out - ratio * sin_in).abs() < 1e-5);
    }

    #[test]
    fn test_schlick_reflectance() {
        // Head-on, reflectance is r0 = ((1 - n) / (1 + n))^2
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing, everything reflects
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
