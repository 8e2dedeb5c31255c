use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Shading code normalizes `direction` wherever it builds a ray, so the
/// parameter `t` of [`Ray::at`] is a world-space distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray with its origin pushed along `offset`.
    ///
    /// Used to lift secondary rays off a surface so they do not re-hit it.
    #[inline]
    pub fn offset(&self, offset: Vec3) -> Self {
        Self::new(self.origin + offset, self.direction)
    }
}
