//! Direct sun lighting.

use prism_core::{Color, Material, Scene, ShadingConfig};
use prism_math::{mix, reflect, Vec3};

use crate::shadow::shadow_factor;

/// Base Blinn-Phong exponent, divided by roughness squared.
const SPECULAR_SHARPNESS: f32 = 32.0;
/// Clear coat uses a quarter of the roughness squared, i.e. a 4x sharper lobe.
const CLEAR_COAT_ROUGHNESS_SCALE: f32 = 0.25;
const CLEAR_COAT_STRENGTH: f32 = 0.5;
const SUBSURFACE_STRENGTH: f32 = 0.5;

/// Radiance reflected towards `view_dir` from the sun at a surface point.
///
/// Sums the diffuse, subsurface, specular and clear coat terms. Every term is
/// attenuated by the same shadow factor and none is clamped on its own.
pub fn direct_lighting(
    scene: &Scene,
    config: &ShadingConfig,
    point: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    material: &Material,
) -> Color {
    let sun_dir = config.sun_dir;
    let shadow = shadow_factor(scene, config, point, normal, sun_dir);

    let diffuse = normal.dot(sun_dir).max(0.0);
    let mut result = material.albedo * diffuse * shadow * config.sun_intensity;

    if material.subsurface > 0.0 {
        let back_light = (-sun_dir).dot(normal).max(0.0) * SUBSURFACE_STRENGTH;
        result +=
            material.albedo * back_light * material.subsurface * config.sun_intensity * shadow;
    }

    let roughness_sq = material.roughness * material.roughness;

    if material.specular > 0.0 || material.metallic > 0.0 {
        let half_vec = (sun_dir + view_dir).normalize_or_zero();
        let spec_angle = normal.dot(half_vec).max(0.0);
        let strength = mix(material.specular, 1.0, material.metallic);
        let highlight = spec_angle.powf(SPECULAR_SHARPNESS / roughness_sq);
        result += config.sun_color * highlight * shadow * strength;
    }

    if material.clear_coat > 0.0 {
        let reflect_dir = reflect(-view_dir, normal);
        let exponent = SPECULAR_SHARPNESS / (roughness_sq * CLEAR_COAT_ROUGHNESS_SCALE);
        let highlight = reflect_dir.dot(sun_dir).max(0.0).powf(exponent);
        result += config.sun_color * highlight * shadow * material.clear_coat * CLEAR_COAT_STRENGTH;
    }

    result
}
