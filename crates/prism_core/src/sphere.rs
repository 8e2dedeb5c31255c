//! Sphere primitive.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{material::Material, scene::SceneError};

/// A sphere with its material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub const fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Unit normal pointing out of the sphere at `point`.
    #[inline]
    pub fn outward_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SceneError::InvalidRadius(self.radius));
        }
        self.material.validate()
    }
}
