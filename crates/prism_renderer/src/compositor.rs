//! Final color assembly: reflection blend, fog, tone mapping and gamma.

use prism_core::{Color, Material, ShadingConfig};
use prism_math::{Interval, Vec4};

/// Metals above this metallic value are pushed further towards their reflection.
const METAL_OVERRIDE_THRESHOLD: f32 = 0.5;
const METAL_OVERRIDE_BLEND: f32 = 0.9;

const GAMMA: f32 = 2.2;

/// Blend a surface's direct lighting with what it reflects.
pub fn blend_reflection(direct: Color, reflected: Color, material: &Material) -> Color {
    let amount = material.reflection_factor() * (1.0 - material.roughness);
    let color = direct.lerp(reflected, amount);

    if material.metallic > METAL_OVERRIDE_THRESHOLD {
        color.lerp(reflected, METAL_OVERRIDE_BLEND)
    } else {
        color
    }
}

/// Fraction of fog at `distance` from the camera, in [0, 1].
pub fn fog_amount(config: &ShadingConfig, distance: f32) -> f32 {
    if distance < config.fog_start {
        return 0.0;
    }
    let fog = 1.0 - (-(distance - config.fog_start) * config.fog_density).exp();
    Interval::UNIT.clamp(fog)
}

/// Fade `color` towards `sky` with distance.
pub fn apply_fog(config: &ShadingConfig, color: Color, sky: Color, distance: f32) -> Color {
    color.lerp(sky, fog_amount(config, distance))
}

/// Reinhard tone mapping, `c / (c + 1)` per channel.
#[inline]
pub fn tone_map(color: Color) -> Color {
    color / (color + Color::ONE)
}

/// Gamma-encode a linear color.
#[inline]
pub fn gamma_encode(color: Color) -> Color {
    let inv = 1.0 / GAMMA;
    Color::new(color.x.powf(inv), color.y.powf(inv), color.z.powf(inv))
}

/// Map linear radiance to a displayable RGBA color with alpha 1.
pub fn finalize(radiance: Color) -> Vec4 {
    gamma_encode(tone_map(radiance)).extend(1.0)
}
