//! CPU side of the camera: follower, orbit overlay and viewport driving a
//! [`Camera`]. Holds no GPU resources.

use glam::Vec2;

use super::core::Camera;
use super::follower::{CameraPose, PathFollower};
use super::orbit::OrbitControls;
use super::viewport::Viewport;
use crate::options::Options;
use crate::path::CatmullRomSpline;

/// Camera state recomputed once per rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    camera: Camera,
    follower: PathFollower,
    orbit: OrbitControls,
    viewport: Viewport,
    pose: Option<CameraPose>,
}

impl CameraRig {
    /// Rig for `viewport` with the camera's aspect taken from it.
    #[must_use]
    pub fn new(options: &Options, viewport: Viewport) -> Self {
        Self {
            camera: Camera::new(&options.camera, viewport.aspect()),
            follower: PathFollower::new(&options.flight),
            orbit: OrbitControls::new(&options.controls),
            viewport,
            pose: None,
        }
    }

    /// Advance the orbit easing by one frame and place the camera for
    /// `elapsed_ms` of wall-clock time.
    pub fn update(&mut self, spline: &CatmullRomSpline, elapsed_ms: f64) {
        self.orbit.update();
        let pose = self.orbit.apply(self.follower.pose(spline, elapsed_ms));
        self.camera.eye = pose.eye;
        self.camera.target = pose.target;
        self.pose = Some(pose);
    }

    /// Adopt a new viewport size and copy its aspect into the camera.
    /// Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.camera.aspect = self.viewport.aspect();
        true
    }

    /// Queue an orbit rotation from a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit.rotate_pixels(delta, self.viewport.height());
    }

    /// Queue a dolly of `steps` scroll steps.
    pub fn zoom(&mut self, steps: f32) {
        self.orbit.zoom(steps);
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Pose from the latest [`update`](Self::update).
    #[must_use]
    pub fn pose(&self) -> Option<CameraPose> {
        self.pose
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(&Options::default(), Viewport::new(800, 600))
    }

    #[test]
    fn resize_copies_aspect_into_camera() {
        let mut rig = rig();
        assert!((rig.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(rig.resize(1920, 1080));
        assert!((rig.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(rig.viewport().size(), (1920, 1080));
    }

    #[test]
    fn repeated_resize_matches_single_resize() {
        let mut once = rig();
        let _ = once.resize(1024, 512);
        let mut twice = rig();
        assert!(twice.resize(1024, 512));
        assert!(!twice.resize(1024, 512));
        assert_eq!(once.camera().aspect, twice.camera().aspect);
        assert_eq!(once.viewport(), twice.viewport());
        assert!((twice.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_resize_keeps_camera_aspect() {
        let mut rig = rig();
        assert!(!rig.resize(0, 0));
        assert!((rig.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn update_without_input_follows_the_path() {
        let spline = CatmullRomSpline::default();
        let mut rig = rig();
        rig.update(&spline, 0.0);
        assert!(rig.camera().eye.distance(spline.point_at(0.0)) < 1e-6);
        assert!(rig.camera().target.distance(spline.point_at(0.03)) < 1e-5);
    }

    #[test]
    fn easing_advances_once_per_update() {
        let spline = CatmullRomSpline::default();
        let mut one = rig();
        let mut three = rig();
        one.rotate(Vec2::new(60.0, 0.0));
        three.rotate(Vec2::new(60.0, 0.0));

        // Same wall-clock instant: only the number of frames matters
        one.update(&spline, 500.0);
        for _ in 0..3 {
            three.update(&spline, 500.0);
        }
        let base = spline.point_at(one.pose().map_or(0.0, |p| p.parameter));
        let target = one.camera().target;
        let moved_one = one.camera().eye.distance(base);
        let moved_three = three.camera().eye.distance(base);
        assert_eq!(three.camera().target, target);
        assert!(moved_one > 0.0);
        assert!(moved_three > moved_one * 2.5);
    }
}
