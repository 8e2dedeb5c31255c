//! Hittable trait and HitRecord for ray-sphere intersection.

use prism_core::{Material, Scene, Sphere};
use prism_math::{Interval, Ray, Vec3};

/// Directions shorter than this (squared) can't produce a hit.
const DEGENERATE_DIRECTION: f32 = 1e-12;

/// Record of the nearest ray-sphere intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the sphere in scan order
    pub index: usize,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: &'a Material,
    /// Whether the ray hit the outside of the sphere
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    fn new(ray: &Ray, t: f32, index: usize, sphere: &'a Sphere) -> Self {
        let p = ray.at(t);
        let mut rec = Self {
            t,
            index,
            p,
            normal: Vec3::ZERO,
            material: &sphere.material,
            front_face: false,
        };
        rec.set_face_normal(ray, sphere.outward_normal(p));
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// A normal that is perpendicular to the ray counts as a back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Parametric distance of the nearest hit strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        if a < DEGENERATE_DIRECTION {
            return None;
        }
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Prefer the near surface, fall back to the far one
        let near = (-b - sqrtd) / (2.0 * a);
        if ray_t.surrounds(near) {
            return Some(near);
        }
        let far = (-b + sqrtd) / (2.0 * a);
        ray_t.surrounds(far).then_some(far)
    }
}

/// Find the closest sphere hit by `ray`.
///
/// Spheres are scanned in index order and a later sphere only replaces the
/// current best when it is strictly closer, so ties keep the lower index.
pub fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
    let mut closest: Option<(usize, f32)> = None;

    for (index, sphere) in scene.spheres().iter().enumerate() {
        if let Some(t) = sphere.hit(ray, ray_t) {
            if closest.map_or(true, |(_, best)| t < best) {
                closest = Some((index, t));
            }
        }
    }

    closest.map(|(index, t)| HitRecord::new(ray, t, index, &scene.spheres()[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, SPHERE_COUNT};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const MIN_T: Interval = Interval::above(0.001);

    fn grey() -> Material {
        Material::new(Color::splat(0.5), 0.5, 0.0, 0.0, 0.0, 0.0)
    }

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if v.length_squared() > 1e-4 && v.length_squared() <= 1.0 {
                return v.normalize();
            }
        }
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.hit(&ray, MIN_T).expect("ray should hit");
        assert!((t - 0.5).abs() < 0.001); // Should hit at t=0.5
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, MIN_T).is_none());
    }

    #[test]
    fn test_pointing_away_never_hits() {
        let mut rng = StdRng::seed_from_u64(42);
        let sphere = Sphere::new(Vec3::new(0.5, -0.2, 1.0), 0.75, grey());

        for _ in 0..500 {
            let outward = random_unit(&mut rng);
            let origin = sphere.center + outward * rng.gen_range(0.8..20.0);
            let mut direction = random_unit(&mut rng);
            // Make the direction point away from the center
            if direction.dot(origin - sphere.center) < 0.0 {
                direction = -direction;
            }
            let ray = Ray::new(origin, direction);
            assert!(sphere.hit(&ray, MIN_T).is_none());
        }
    }

    #[test]
    fn test_hit_distance_towards_center() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let center = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let radius = rng.gen_range(0.25..3.0);
            let distance = radius + rng.gen_range(0.01..8.0);
            let direction = random_unit(&mut rng);
            let sphere = Sphere::new(center, radius, grey());
            let ray = Ray::new(center - direction * distance, direction);

            let t = sphere.hit(&ray, MIN_T).expect("ray aimed at center should hit");
            assert!(
                (t - (distance - radius)).abs() < 1e-3,
                "t={} expected={}",
                t,
                distance - radius
            );
        }
    }

    #[test]
    fn test_inside_returns_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = sphere.hit(&ray, MIN_T).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_direction_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(sphere.hit(&ray, MIN_T).is_none());

        // Origin on the sphere surface as well
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::ZERO);
        assert!(sphere.hit(&ray, MIN_T).is_none());
    }

    #[test]
    fn test_normals_face_the_ray() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = Scene::default();
        let mut hits = 0;

        for _ in 0..2000 {
            let origin = Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-0.4..2.0),
                rng.gen_range(-4.0..1.0),
            );
            let direction = random_unit(&mut rng);
            let ray = Ray::new(origin, direction);

            if let Some(rec) = nearest_hit(&scene, &ray, MIN_T) {
                hits += 1;
                assert!((rec.normal.length() - 1.0).abs() < 1e-4);
                assert!(rec.normal.dot(direction) <= 0.0);
                assert!(rec.t > 0.001);
            }
        }

        assert!(hits > 0);
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let scene = Scene::default();

        // Looking down -X from the right passes through sphere 0 only
        let ray = Ray::new(Vec3::new(5.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0));
        let rec = nearest_hit(&scene, &ray, MIN_T).unwrap();
        assert_eq!(rec.index, 0);
        assert!((rec.t - 1.5).abs() < 1e-4);

        // From behind sphere 0 along -Z, sphere 0 is closer than sphere 1
        let ray = Ray::new(Vec3::new(3.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = nearest_hit(&scene, &ray, MIN_T).unwrap();
        assert_eq!(rec.index, 0);
        assert!(std::ptr::eq(rec.material, &scene.spheres()[0].material));
    }

    #[test]
    fn test_ties_keep_first_index() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey());
        let scene = Scene::new([sphere; SPHERE_COUNT]).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = nearest_hit(&scene, &ray, MIN_T).unwrap();
        assert_eq!(rec.index, 0);
    }

    #[test]
    fn test_sky_ray_misses_scene() {
        let scene = Scene::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(nearest_hit(&scene, &ray, MIN_T).is_none());
    }
}
