//! First-person fly camera driven by cursor and WASD input.

use prism_math::{Vec2, Vec3};
use prism_renderer::Camera;

use crate::settings::MoveKey;

const PITCH_LIMIT: f32 = 89.0;

/// Mouse-look camera with yaw and pitch in degrees.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// World units per key press
    pub speed: f32,
    /// Degrees per pixel of cursor travel
    pub sensitivity: f32,
    last_cursor: Option<Vec2>,
    moved: bool,
}

impl FlyCamera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            speed: 0.05,
            sensitivity: 0.1,
            last_cursor: None,
            moved: true,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Point the camera along `front`, deriving yaw and pitch from it.
    pub fn with_front(mut self, front: Vec3) -> Self {
        let front = front.normalize_or_zero();
        if front == Vec3::ZERO {
            return self;
        }
        let pitch = front.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = front.z.atan2(front.x).to_degrees();
        if self.pitch == pitch {
            self.front = front;
        } else {
            self.update_front();
        }
        self
    }

    /// Recompute `front` from yaw and pitch.
    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front =
            Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
    }

    /// Handle a cursor position in window pixels.
    ///
    /// The first position only records where the cursor is.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let cursor = Vec2::new(x, y);
        let Some(last) = self.last_cursor.replace(cursor) else {
            return;
        };

        // Screen y grows downwards
        let x_offset = (cursor.x - last.x) * self.sensitivity;
        let y_offset = (last.y - cursor.y) * self.sensitivity;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_front();
        self.moved = true;
    }

    /// Move one step for a held key.
    pub fn key_pressed(&mut self, key: MoveKey) {
        let right = self.front.cross(self.up).normalize_or_zero();
        match key {
            MoveKey::Forward => self.position += self.front * self.speed,
            MoveKey::Backward => self.position -= self.front * self.speed,
            MoveKey::Left => self.position -= right * self.speed,
            MoveKey::Right => self.position += right * self.speed,
        }
        self.moved = true;
    }

    /// Whether the camera moved since the last call, clearing the flag.
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }

    /// Camera snapshot for the renderer.
    pub fn snapshot(&self, width: u32, height: u32) -> Camera {
        Camera::new(self.position, self.front, self.up, 1.0).with_viewport(width, height)
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
