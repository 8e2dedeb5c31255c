//! Bounded reflection tracing.
//!
//! Reflections are traced with an explicit loop instead of recursion. Each
//! iteration ends in one of three ways: the reflected ray hits a surface and
//! keeps bouncing, it hits a surface and stops, or it escapes to the sky.

use prism_core::{Color, Material, Scene, ShadingConfig};
use prism_math::{reflect, Interval, Ray, Vec3};

use crate::{hittable::nearest_hit, lighting::direct_lighting, sky::sky_color};

/// Outcome of a single reflection bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounce {
    /// Hit a surface, keep tracing from the hit point.
    Continue { origin: Vec3, direction: Vec3, normal: Vec3 },
    /// Hit a surface or the sky, nothing left to trace.
    Terminate,
}

/// Color reflected at a surface point seen along `incoming`.
///
/// `material` is the material of the surface the reflection starts on. Its
/// reflection factor and roughness weight every bounce, so surfaces hit along
/// the way only contribute their lit color.
pub fn trace_reflection(
    scene: &Scene,
    config: &ShadingConfig,
    incoming: Vec3,
    point: Vec3,
    normal: Vec3,
    material: &Material,
) -> Color {
    let ray_t = Interval::above(config.min_ray_distance);
    let bounce_weight = material.reflection_factor() * (1.0 - material.roughness);

    let mut color = Color::ZERO;
    let mut weight = 1.0_f32;
    let mut state = Bounce::Continue {
        origin: point,
        direction: incoming,
        normal,
    };

    for _ in 0..config.max_recursion_depth {
        let Bounce::Continue {
            origin,
            direction,
            normal,
        } = state
        else {
            break;
        };

        let reflected = reflect(direction, normal);
        let ray = Ray::new(origin, reflected).offset(normal * config.ray_bias);

        state = match nearest_hit(scene, &ray, ray_t) {
            Some(rec) => {
                let lit =
                    direct_lighting(scene, config, rec.p, rec.normal, -reflected, rec.material);
                if material.is_reflective() {
                    weight *= bounce_weight;
                    color += lit * weight;
                    Bounce::Continue {
                        origin: rec.p,
                        direction: reflected,
                        normal: rec.normal,
                    }
                } else {
                    color += lit * weight;
                    Bounce::Terminate
                }
            }
            None => {
                color += sky_color(config, reflected) * weight;
                Bounce::Terminate
            }
        };
    }

    color
}
