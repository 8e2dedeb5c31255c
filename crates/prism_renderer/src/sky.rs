//! Analytic sky with a sun disk.

use prism_core::{Color, ShadingConfig};
use prism_math::Vec3;

/// Sky color looking straight up or down.
const ZENITH_COLOR: Color = Color::new(0.5, 0.7, 1.0);
/// Sky color at the horizon.
const HORIZON_COLOR: Color = Color::new(0.1, 0.2, 0.4);

const SUN_DISK_EXPONENT: f32 = 256.0;
const SUN_GLOW_EXPONENT: f32 = 16.0;
const SUN_GLOW_STRENGTH: f32 = 0.6;

/// Radiance seen along `direction` when nothing is hit.
pub fn sky_color(config: &ShadingConfig, direction: Vec3) -> Color {
    let sun_dot = direction.dot(config.sun_dir).max(0.0);
    let horizon = 1.0 - direction.y.abs();

    let mut color = ZENITH_COLOR.lerp(HORIZON_COLOR, horizon * horizon);
    color += config.sun_color * sun_dot.powf(SUN_DISK_EXPONENT) * config.sun_intensity;
    color += config.sun_color * sun_dot.powf(SUN_GLOW_EXPONENT) * SUN_GLOW_STRENGTH;
    color
}
