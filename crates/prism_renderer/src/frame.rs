//! Frame scheduling.
//!
//! The host updates the camera as input arrives and asks for a frame every
//! display tick. A new image is only produced when something that affects
//! the picture changed since the last one.

use std::time::{Duration, Instant};

use prism_core::{Scene, ShadingConfig};

use crate::{
    camera::Camera,
    renderer::{render, FrameContext, ImageBuffer},
};

/// A finished frame.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Number of frames rendered before this one
    pub index: u64,
    /// Camera snapshot the frame was shaded from
    pub camera: Camera,
    pub image: ImageBuffer,
    pub elapsed: Duration,
}

/// Owns the scene and renders on demand when the view is dirty.
#[derive(Debug)]
pub struct FrameScheduler {
    scene: Scene,
    config: ShadingConfig,
    camera: Camera,
    width: u32,
    height: u32,
    dirty: bool,
    frames_rendered: u64,
}

impl FrameScheduler {
    /// Create a scheduler. The first dispatch always renders.
    pub fn new(
        scene: Scene,
        config: ShadingConfig,
        camera: Camera,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            scene,
            config,
            camera: camera.with_viewport(width, height),
            width,
            height,
            dirty: true,
            frames_rendered: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    /// Current camera, with the aspect ratio of the current viewport.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Force the next dispatch to render.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replace the camera. Returns true if the view changed.
    ///
    /// The aspect ratio always follows the viewport, whatever the host passes.
    pub fn submit_camera(&mut self, camera: Camera) -> bool {
        let camera = camera.with_viewport(self.width, self.height);
        if camera == self.camera {
            return false;
        }
        self.camera = camera;
        self.dirty = true;
        true
    }

    /// Resize the viewport. Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera = self.camera.with_viewport(width, height);
        self.dirty = true;
    }

    /// Render a frame if the view is dirty, otherwise return `None`.
    pub fn dispatch(&mut self) -> Option<RenderedFrame> {
        if !self.dirty {
            return None;
        }

        let start = Instant::now();
        let camera = self.camera;
        let frame = FrameContext::new(camera, &self.scene, &self.config, self.width, self.height);
        let image = render(&frame);
        let elapsed = start.elapsed();

        let index = self.frames_rendered;
        self.frames_rendered += 1;
        self.dirty = false;

        log::debug!("Frame {} rendered in {:.2?}", index, elapsed);

        Some(RenderedFrame {
            index,
            camera,
            image,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Vec3;

    fn scheduler() -> FrameScheduler {
        FrameScheduler::new(Scene::default(), ShadingConfig::default(), Camera::default(), 16, 12)
    }

    #[test]
    fn test_first_frame_always_renders() {
        let mut frames = scheduler();
        assert!(frames.is_dirty());

        let frame = frames.dispatch().unwrap();
        assert_eq!(frame.index, 0);
        assert_eq!((frame.image.width, frame.image.height), (16, 12));
        assert!(!frames.is_dirty());
    }

    #[test]
    fn test_idle_frames_are_skipped() {
        let mut frames = scheduler();
        frames.dispatch().unwrap();

        assert!(frames.dispatch().is_none());
        assert!(!frames.submit_camera(frames.camera()));
        assert!(frames.dispatch().is_none());
        assert_eq!(frames.frames_rendered(), 1);
    }

    #[test]
    fn test_camera_change_renders_again() {
        let mut frames = scheduler();
        let first = frames.dispatch().unwrap();

        let moved = frames.camera().with_position(Vec3::new(0.0, 0.0, 0.05));
        assert!(frames.submit_camera(moved));
        let second = frames.dispatch().unwrap();

        assert_eq!(second.index, 1);
        assert_eq!(second.camera.position, moved.position);
        assert_ne!(first.image, second.image);
    }

    #[test]
    fn test_submitted_aspect_follows_viewport() {
        let mut frames = scheduler();
        frames.dispatch().unwrap();

        // Only the aspect differs, which the viewport overrides
        let stretched = Camera {
            aspect_ratio: 3.0,
            ..frames.camera()
        };
        assert!(!frames.submit_camera(stretched));
        assert_eq!(frames.camera().aspect_ratio, 16.0 / 12.0);
    }

    #[test]
    fn test_resize() {
        let mut frames = scheduler();
        frames.dispatch().unwrap();

        frames.resize(16, 12);
        assert!(!frames.is_dirty());

        frames.resize(0, 12);
        assert!(!frames.is_dirty());
        assert_eq!(frames.size(), (16, 12));

        frames.resize(20, 10);
        assert!(frames.is_dirty());
        assert_eq!(frames.camera().aspect_ratio, 2.0);

        let frame = frames.dispatch().unwrap();
        assert_eq!(frame.image.pixels.len(), 200);
    }

    #[test]
    fn test_identical_camera_gives_identical_frame() {
        let mut frames = scheduler();
        let first = frames.dispatch().unwrap();
        frames.mark_dirty();
        let second = frames.dispatch().unwrap();

        assert_eq!(first.image, second.image);
    }
}
