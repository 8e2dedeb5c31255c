//! Soft shadow and ambient occlusion estimate.
//!
//! This is a stylized approximation rather than a physical visibility test:
//! any sphere along the light direction darkens the point through a smooth
//! penumbra, a tighter contact term darkens points right next to an occluder,
//! and a handful of fixed occlusion probes darken creases between spheres.
//! The result is always inside [`SHADOW_RANGE`], so no surface goes black.

use prism_core::{Scene, ShadingConfig};
use prism_math::{mix, smoothstep, Interval, Ray, Vec3};

use crate::hittable::Hittable;

/// Output range of [`shadow_factor`].
pub const SHADOW_RANGE: Interval = Interval::new(0.3, 1.0);

/// Distance over which an occluder fades from full to no penumbra.
const LIGHT_RADIUS: f32 = 0.05;
/// How far the penumbra pulls the shadow away from full light.
const SHADOW_SOFTNESS: f32 = 0.5;
/// Falloff distance of the contact shadow.
const CONTACT_RADIUS: f32 = 0.1;
const CONTACT_STRENGTH: f32 = 0.8;
/// Fraction of light that leaks into the shadowed side.
const LIGHT_LEAK: f32 = 0.3;
/// Shadow origins move off the surface proportionally to their distance
/// from the world origin.
const DISTANCE_BIAS_SCALE: f32 = 0.0001;

const AO_RADIUS: f32 = 0.2;
const AO_SAMPLES: usize = 4;

/// Deterministic ambient occlusion probe direction, bent towards `normal`.
///
/// Returns zero when the probe cancels the normal exactly.
pub fn ao_sample_direction(sample: usize, normal: Vec3) -> Vec3 {
    let i = sample as f32;
    let jitter = Vec3::new(
        (i * 123.456).sin(),
        (i * 456.789).cos(),
        (i * 789.123).sin() * (i * 321.654).cos(),
    )
    .normalize_or_zero();

    (jitter + normal).normalize_or_zero()
}

/// Light attenuation at `point` for light arriving from `light_dir`.
pub fn shadow_factor(
    scene: &Scene,
    config: &ShadingConfig,
    point: Vec3,
    normal: Vec3,
    light_dir: Vec3,
) -> f32 {
    let ray_t = Interval::above(config.min_ray_distance);
    let bias = config.shadow_bias.max(point.length() * DISTANCE_BIAS_SCALE);
    let shadow_ray = Ray::new(point + normal * bias, light_dir);

    let mut shadow = 1.0_f32;
    let mut contact_shadow = 1.0_f32;
    for sphere in scene.spheres() {
        if let Some(t) = sphere.hit(&shadow_ray, ray_t) {
            let penumbra = 1.0 - smoothstep(0.0, LIGHT_RADIUS, t);
            shadow = shadow.min(mix(1.0, penumbra, SHADOW_SOFTNESS));

            let contact = 1.0 - smoothstep(0.0, CONTACT_RADIUS, t) * CONTACT_STRENGTH;
            contact_shadow = contact_shadow.min(contact);
        }
    }

    let ao = ambient_occlusion(scene, config, point, normal);

    let shadow = mix(shadow, 1.0, LIGHT_LEAK).min(contact_shadow) * ao;
    SHADOW_RANGE.clamp(shadow)
}

/// Occlusion from nearby spheres, in [`SHADOW_RANGE`].
fn ambient_occlusion(scene: &Scene, config: &ShadingConfig, point: Vec3, normal: Vec3) -> f32 {
    let ray_t = Interval::above(config.min_ray_distance);
    let origin = point + normal * config.ray_bias;
    let occluders = scene.occluders();

    let mut ao = 1.0_f32;
    for sample in 0..AO_SAMPLES {
        let probe = Ray::new(origin, ao_sample_direction(sample, normal));
        let occluder = &occluders[sample % occluders.len()];

        if let Some(t) = occluder.hit(&probe, ray_t) {
            if t < AO_RADIUS {
                ao -= (AO_RADIUS - t) / AO_RADIUS / AO_SAMPLES as f32;
            }
        }
    }

    SHADOW_RANGE.clamp(ao)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

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
    fn test_open_sky_is_fully_lit() {
        let scene = Scene::default();
        let config = ShadingConfig::default();

        // High above everything, facing the sun
        let point = Vec3::new(0.0, 5.0, 0.0);
        let shadow = shadow_factor(&scene, &config, point, Vec3::Y, config.sun_dir);
        assert!((shadow - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_occluded_point_is_darkened_but_not_black() {
        let scene = Scene::default();
        let config = ShadingConfig::default();

        // On the ground directly "below" sphere 2 along the light direction
        let center = scene.spheres()[2].center;
        let point = center - config.sun_dir * 1.0;
        let shadow = shadow_factor(&scene, &config, point, config.sun_dir, config.sun_dir);

        // Any occluder past the contact radius drives the factor to the floor
        assert!((shadow - SHADOW_RANGE.min).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_is_clamped() {
        let scene = Scene::default();
        let config = ShadingConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2000 {
            let point = Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-0.6..2.0),
                rng.gen_range(-4.0..1.0),
            );
            let normal = random_unit(&mut rng);
            let light_dir = random_unit(&mut rng);

            let shadow = shadow_factor(&scene, &config, point, normal, light_dir);
            assert!(
                SHADOW_RANGE.contains(shadow),
                "shadow {} out of range at {:?}",
                shadow,
                point
            );
        }
    }

    #[test]
    fn test_surface_points_stay_in_range() {
        let scene = Scene::default();
        let config = ShadingConfig::default();

        for sphere in scene.spheres() {
            for axis in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
                let point = sphere.center + axis * sphere.radius;
                let shadow = shadow_factor(&scene, &config, point, axis, config.sun_dir);
                assert!(SHADOW_RANGE.contains(shadow));
            }
        }
    }

    #[test]
    fn test_ao_directions() {
        // First probe is straight up before bending
        let dir = ao_sample_direction(0, Vec3::Z);
        assert!((dir - Vec3::new(0.0, 1.0, 1.0).normalize()).length() < 1e-6);

        // Probes lean into the normal's hemisphere
        for sample in 0..AO_SAMPLES {
            let dir = ao_sample_direction(sample, Vec3::Y);
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!(dir.dot(Vec3::Y) >= 0.0);
        }

        // Probe cancelling the normal is degenerate
        assert_eq!(ao_sample_direction(0, Vec3::NEG_Y), Vec3::ZERO);
    }

    #[test]
    fn test_ambient_occlusion_penalty() {
        let scene = Scene::default();
        let config = ShadingConfig::default();

        // Just under sphere 0, facing up: the first probe goes straight up into it
        let point = Vec3::new(3.0, -0.6, -1.0);
        let ao = ambient_occlusion(&scene, &config, point, Vec3::Y);

        let t = 0.6 - config.ray_bias - 0.5;
        let expected = 1.0 - (AO_RADIUS - t) / AO_RADIUS / AO_SAMPLES as f32;
        assert!(ao < 1.0);
        assert!((ao - expected).abs() < 1e-4, "ao={} expected={}", ao, expected);

        // Facing away, no probe reaches an occluder
        let open = ambient_occlusion(&scene, &config, point, Vec3::NEG_Y);
        assert_eq!(open, 1.0);
    }

    #[test]
    fn test_deterministic() {
        let scene = Scene::default();
        let config = ShadingConfig::default();
        let point = Vec3::new(-0.6, -0.2, -0.8);
        let normal = Vec3::new(0.4, -0.3, 0.2).normalize();

        let a = shadow_factor(&scene, &config, point, normal, config.sun_dir);
        let b = shadow_factor(&scene, &config, point, normal, config.sun_dir);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
