//! Per-frame camera update and read-only accessors for [`WormholeEngine`].

use super::WormholeEngine;
use crate::camera::follower::CameraPose;
use crate::camera::viewport::Viewport;
use crate::options::Options;
use crate::scene::Scene;

// ── Lifecycle ──

impl WormholeEngine {
    /// Place the camera for the current wall-clock time and upload it.
    /// Runs once per rendered frame, so orbit easing never advances on a
    /// frame the limiter skips.
    pub(super) fn update_camera(&mut self) {
        self.camera_controller
            .update(self.scene.spline(), self.frame_timing.elapsed_ms());
        self.camera_controller.update_gpu(&self.context.queue);
    }
}

// ── Queries ──

impl WormholeEngine {
    /// The immutable scene geometry.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current drawable size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.camera_controller.viewport()
    }

    /// Camera pose from the latest rendered frame.
    #[must_use]
    pub fn pose(&self) -> Option<CameraPose> {
        self.camera_controller.pose()
    }
}
