//! Scripted input replay.
//!
//! Feeds recorded input through the fly camera one display tick at a time and
//! asks the scheduler for a frame after each tick. Ticks that did not move
//! the camera produce no frame.

use anyhow::Result;
use prism_core::Scene;
use prism_renderer::{FrameScheduler, RenderedFrame};

use crate::camera_controller::FlyCamera;
use crate::settings::{InputStep, ViewerSettings};

/// Drives a scheduler from a fly camera.
pub struct Replay {
    pub camera: FlyCamera,
    pub scheduler: FrameScheduler,
}

impl Replay {
    /// Set up the camera and scheduler described by `settings`.
    pub fn new(settings: &ViewerSettings) -> Self {
        let camera = FlyCamera::new(settings.camera_position)
            .with_front(settings.camera_front)
            .with_speed(settings.move_speed)
            .with_sensitivity(settings.mouse_sensitivity);

        let scheduler = FrameScheduler::new(
            Scene::default(),
            settings.shading_config(),
            camera.snapshot(settings.width, settings.height),
            settings.width,
            settings.height,
        );

        Self { camera, scheduler }
    }

    /// Apply one tick of input and render if anything changed.
    pub fn tick(&mut self, step: &InputStep) -> Option<RenderedFrame> {
        if let Some([width, height]) = step.resize {
            self.scheduler.resize(width, height);
        }
        for key in &step.keys {
            self.camera.key_pressed(*key);
        }
        if let Some([x, y]) = step.cursor {
            self.camera.cursor_moved(x, y);
        }

        if self.camera.take_moved() {
            let (width, height) = self.scheduler.size();
            self.scheduler.submit_camera(self.camera.snapshot(width, height));
        }

        self.scheduler.dispatch()
    }

    /// Render the initial frame, then replay every step.
    ///
    /// `on_frame` receives each rendered frame. Returns the number of frames.
    pub fn run<F>(&mut self, steps: &[InputStep], mut on_frame: F) -> Result<usize>
    where
        F: FnMut(&RenderedFrame) -> Result<()>,
    {
        let mut count = 0;
        let idle = InputStep::default();

        for step in std::iter::once(&idle).chain(steps) {
            if let Some(frame) = self.tick(step) {
                on_frame(&frame)?;
                count += 1;
            }
        }

        Ok(count)
    }
}
