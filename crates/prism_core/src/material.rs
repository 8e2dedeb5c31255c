//! Surface material parameters.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::SceneError;

/// Color type alias (linear RGB, typically 0-1 before lighting)
pub type Color = Vec3;

/// Reflection factors at or below this value skip the reflection pass.
pub const REFLECTION_THRESHOLD: f32 = 0.01;

/// Analytic surface description owned by a sphere.
///
/// All scalar parameters are in [0, 1] except `roughness`, which must be
/// strictly positive because the specular exponents divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance (RGB, 0-1)
    pub albedo: Color,

    /// Roughness (0 exclusive = mirror-sharp highlight, 1 = broad highlight)
    pub roughness: f32,

    /// Metallic factor; pulls specular strength towards 1 and drives reflections
    pub metallic: f32,

    /// Specular strength for non-metallic surfaces
    pub specular: f32,

    /// Strength of the back-lit scattering term
    pub subsurface: f32,

    /// Strength of the sharp secondary highlight
    pub clear_coat: f32,
}

impl Material {
    /// Create a material from its six parameters.
    pub const fn new(
        albedo: Color,
        roughness: f32,
        metallic: f32,
        specular: f32,
        subsurface: f32,
        clear_coat: f32,
    ) -> Self {
        Self {
            albedo,
            roughness,
            metallic,
            specular,
            subsurface,
            clear_coat,
        }
    }

    /// How strongly this surface mirrors its surroundings.
    ///
    /// `max(metallic, specular * 0.5)`.
    #[inline]
    pub fn reflection_factor(&self) -> f32 {
        self.metallic.max(self.specular * 0.5)
    }

    /// Whether the surface is reflective enough to trace a reflection ray.
    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.reflection_factor() > REFLECTION_THRESHOLD
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<(), SceneError> {
        let albedo = self.albedo.to_array();
        if albedo.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(SceneError::AlbedoOutOfRange(albedo));
        }
        if !(self.roughness > 0.0 && self.roughness <= 1.0) {
            return Err(SceneError::InvalidRoughness(self.roughness));
        }

        let scalars = [
            ("metallic", self.metallic),
            ("specular", self.specular),
            ("subsurface", self.subsurface),
            ("clear_coat", self.clear_coat),
        ];
        for (name, value) in scalars {
            if !(0.0..=1.0).contains(&value) {
                return Err(SceneError::ParameterOutOfRange { name, value });
            }
        }

        Ok(())
    }
}
