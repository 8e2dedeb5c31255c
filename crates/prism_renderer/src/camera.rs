//! Camera snapshot and primary ray generation.

use prism_math::{Ray, Vec2, Vec3};

/// Per-frame camera state supplied by the host.
///
/// The renderer only ever reads a copy of this, so a frame never sees a
/// half-updated camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit viewing direction
    pub front: Vec3,
    /// Unit up vector
    pub up: Vec3,
    /// Viewport width / height
    pub aspect_ratio: f32,
}

impl Camera {
    /// Create a new camera.
    pub fn new(position: Vec3, front: Vec3, up: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            front,
            up,
            aspect_ratio,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the viewing direction and up vector.
    pub fn with_orientation(mut self, front: Vec3, up: Vec3) -> Self {
        self.front = front;
        self.up = up;
        self
    }

    /// Set the aspect ratio from a viewport size.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
        self
    }

    /// Unit vector pointing to the right of the view.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    /// Primary ray through viewport coordinate `p` in [-1, 1]².
    ///
    /// `p.x` is stretched by the aspect ratio here, `p.y` points up.
    pub fn get_ray(&self, p: Vec2) -> Ray {
        let x = p.x * self.aspect_ratio;
        let direction = (self.front + x * self.right() + p.y * self.up).normalize_or_zero();
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    /// At the origin looking down -Z with a 4:3 viewport.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 800.0 / 600.0)
    }
}

/// Viewport coordinate of the center of pixel (x, y) in a width x height frame.
///
/// Row 0 is the top of the image and maps to y = +1 side of the viewport.
pub fn viewport_coord(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    let u = (x as f32 + 0.5) / width as f32;
    let v = (y as f32 + 0.5) / height as f32;
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}
