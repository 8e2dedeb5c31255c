//! Shading configuration.
//!
//! These values are fixed for the lifetime of a renderer. Hosts may override
//! them from a settings file, so they deserialize with every field optional.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Color;

pub const SUN_INTENSITY: f32 = 1.5;
pub const SHADOW_BIAS: f32 = 0.001;
pub const RAY_BIAS: f32 = 0.0001;
pub const MAX_RECURSION_DEPTH: u32 = 1;
pub const MIN_RAY_DISTANCE: f32 = 0.001;
pub const FOG_START: f32 = 5.0;
pub const FOG_DENSITY: f32 = 0.05;

/// Unnormalized default sun direction.
pub const SUN_DIRECTION: Vec3 = Vec3::new(0.2, 0.5, -1.0);
pub const SUN_COLOR: Color = Color::new(1.0, 0.9, 0.7);

/// Tolerance on the length of the sun direction.
const UNIT_TOLERANCE: f32 = 1e-3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Sun direction must be a unit vector, got length {0}")]
    SunDirectionNotUnit(f32),

    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("Maximum recursion depth must be at least 1")]
    ZeroRecursionDepth,
}

/// Constants read by the shading pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Unit direction towards the sun
    pub sun_dir: Vec3,
    pub sun_color: Color,
    pub sun_intensity: f32,
    /// Minimum offset of shadow rays along the normal
    pub shadow_bias: f32,
    /// Offset of reflection and occlusion rays along the normal
    pub ray_bias: f32,
    /// Reflection bounces after the primary hit
    pub max_recursion_depth: u32,
    /// Hits closer than this are ignored
    pub min_ray_distance: f32,
    /// Distance where fog starts
    pub fog_start: f32,
    pub fog_density: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            sun_dir: SUN_DIRECTION.normalize(),
            sun_color: SUN_COLOR,
            sun_intensity: SUN_INTENSITY,
            shadow_bias: SHADOW_BIAS,
            ray_bias: RAY_BIAS,
            max_recursion_depth: MAX_RECURSION_DEPTH,
            min_ray_distance: MIN_RAY_DISTANCE,
            fog_start: FOG_START,
            fog_density: FOG_DENSITY,
        }
    }
}

impl ShadingConfig {
    /// Builder method to point the sun somewhere else (normalized here).
    pub fn with_sun_direction(mut self, direction: Vec3) -> Self {
        self.sun_dir = direction.normalize_or_zero();
        self
    }

    /// Builder method to change the reflection bounce budget.
    pub fn with_max_recursion_depth(mut self, depth: u32) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Check that the configuration keeps the shading functions well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let length = self.sun_dir.length();
        if !((length - 1.0).abs() <= UNIT_TOLERANCE) {
            return Err(ConfigError::SunDirectionNotUnit(length));
        }

        let positive = [
            ("shadow_bias", self.shadow_bias),
            ("ray_bias", self.ray_bias),
            ("min_ray_distance", self.min_ray_distance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("sun_intensity", self.sun_intensity),
            ("fog_start", self.fog_start),
            ("fog_density", self.fog_density),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.max_recursion_depth == 0 {
            return Err(ConfigError::ZeroRecursionDepth);
        }

        Ok(())
    }
}
