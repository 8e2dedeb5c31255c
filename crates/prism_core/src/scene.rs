//! The fixed five-sphere scene.
//!
//! The scene is an immutable table that is passed explicitly to every
//! shading function. Index order only matters for iteration and for breaking
//! ties between equally distant hits.

use prism_math::Vec3;
use thiserror::Error;

use crate::{
    material::{Color, Material},
    sphere::Sphere,
};

/// Number of spheres in a scene.
pub const SPHERE_COUNT: usize = 5;

/// The leading spheres that take part in ambient occlusion.
///
/// The last slot holds the ground sphere, which never occludes.
pub const OCCLUDER_COUNT: usize = 4;

/// Errors raised when a sphere table breaks the scene invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Roughness must be in (0, 1], got {0}")]
    InvalidRoughness(f32),

    #[error("Albedo channels must be in [0, 1], got {0:?}")]
    AlbedoOutOfRange([f32; 3]),

    #[error("Material parameter `{name}` must be in [0, 1], got {value}")]
    ParameterOutOfRange { name: &'static str, value: f32 },

    #[error("Sphere {index}: {source}")]
    InvalidSphere {
        index: usize,
        #[source]
        source: Box<SceneError>,
    },
}

/// Red matte, blue plastic, green matte, grey metal, and a huge yellow ground sphere.
pub const DEFAULT_SPHERES: [Sphere; SPHERE_COUNT] = [
    Sphere::new(
        Vec3::new(3.0, 0.0, -1.0),
        0.5,
        Material::new(Color::new(1.0, 0.3, 0.3), 1.0, 0.0, 0.0, 0.034, 0.0),
    ),
    Sphere::new(
        Vec3::new(3.0, 0.0, -2.0),
        0.5,
        Material::new(Color::new(0.0, 0.0, 0.95), 0.95, 0.0, 0.5, 0.034, 0.2),
    ),
    Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        Material::new(Color::new(0.3, 1.0, 0.3), 0.7, 0.0, 0.0, 0.034, 0.0),
    ),
    Sphere::new(
        Vec3::new(1.5, 0.4, -3.0),
        0.6,
        Material::new(Color::new(0.5, 0.5, 0.5), 0.1, 0.35, 0.0, 0.034, 0.0),
    ),
    Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Material::new(Color::new(0.9, 0.9, 0.3), 0.7, 0.0, 0.1, 0.1, 0.0),
    ),
];

/// A validated, immutable table of spheres.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    spheres: [Sphere; SPHERE_COUNT],
}

impl Scene {
    /// Build a scene from a sphere table, checking every sphere.
    pub fn new(spheres: [Sphere; SPHERE_COUNT]) -> Result<Self, SceneError> {
        for (index, sphere) in spheres.iter().enumerate() {
            sphere.validate().map_err(|source| SceneError::InvalidSphere {
                index,
                source: Box::new(source),
            })?;
        }

        log::debug!("Scene validated with {} spheres", spheres.len());
        Ok(Self { spheres })
    }

    /// All spheres in scan order.
    #[inline]
    pub fn spheres(&self) -> &[Sphere; SPHERE_COUNT] {
        &self.spheres
    }

    /// Get the sphere at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    /// Spheres used as ambient occlusion blockers.
    #[inline]
    pub fn occluders(&self) -> &[Sphere] {
        &self.spheres[..OCCLUDER_COUNT]
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            spheres: DEFAULT_SPHERES,
        }
    }
}
