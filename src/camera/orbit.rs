//! Damped orbit overlay on top of the path follower.
//!
//! The follower recomputes the pose from time every frame, so user input
//! is kept as a persistent offset (yaw, pitch, log-distance) that is
//! applied around the follower's look-at target. Input is queued and
//! eased in a fraction at a time when damping is enabled.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::follower::CameraPose;
use crate::options::ControlOptions;

/// Log-distance change per scroll step (one step scales by 0.95).
const DOLLY_STEP: f32 = 0.051_293_3;

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLE_EPSILON: f32 = 1e-3;

/// Below this every accumulated offset counts as zero.
const IDENTITY_EPSILON: f32 = 1e-7;

/// Orbit offset state.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    options: ControlOptions,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    /// Controls with no accumulated offset.
    #[must_use]
    pub fn new(options: &ControlOptions) -> Self {
        Self {
            options: options.clone(),
            yaw: 0.0,
            pitch: 0.0,
            zoom: 0.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Queue a rotation from a pointer drag of `delta` pixels on a viewport
    /// `viewport_height` pixels tall. A drag of the full height turns one
    /// full revolution.
    pub fn rotate_pixels(&mut self, delta: Vec2, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        let scale = TAU / height * self.options.rotate_speed;
        self.rotate(-delta.x * scale, -delta.y * scale);
    }

    /// Queue a rotation in radians: `yaw` around world up, `pitch` toward
    /// the pole.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.pending_yaw += yaw;
        self.pending_pitch += pitch;
    }

    /// Queue a dolly of `steps` scroll steps. Positive steps move the eye
    /// closer to the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_zoom -= steps * DOLLY_STEP * self.options.zoom_speed;
    }

    /// Advance one frame: move the damped share of queued input into the
    /// offset.
    pub fn update(&mut self) {
        let share = if self.options.enable_damping {
            self.options.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.yaw += self.pending_yaw * share;
        self.pitch += self.pending_pitch * share;
        self.zoom += self.pending_zoom * share;
        self.pending_yaw *= 1.0 - share;
        self.pending_pitch *= 1.0 - share;
        self.pending_zoom *= 1.0 - share;
    }

    /// Accumulated `(yaw, pitch, log-distance)` offset.
    #[must_use]
    pub fn offset(&self) -> (f32, f32, f32) {
        (self.yaw, self.pitch, self.zoom)
    }

    /// Whether the offset currently changes nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.yaw.abs() < IDENTITY_EPSILON
            && self.pitch.abs() < IDENTITY_EPSILON
            && self.zoom.abs() < IDENTITY_EPSILON
    }

    /// Orbit the pose's eye around its target by the current offset.
    #[must_use]
    pub fn apply(&self, pose: CameraPose) -> CameraPose {
        if self.is_identity() {
            return pose;
        }
        let arm = pose.eye - pose.target;
        let base_distance = arm.length();
        if base_distance <= f32::EPSILON {
            return pose;
        }

        // Spherical coordinates around +Y
        let azimuth = arm.x.atan2(arm.z);
        let polar = (arm.y / base_distance).clamp(-1.0, 1.0).acos();

        let azimuth = azimuth + self.yaw;
        let polar = (polar + self.pitch).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let min = self.options.min_distance.min(base_distance);
        let max = self.options.max_distance.max(base_distance);
        let distance = (base_distance * self.zoom.exp()).clamp(min, max);

        let direction = Vec3::new(
            polar.sin() * azimuth.sin(),
            polar.cos(),
            polar.sin() * azimuth.cos(),
        );
        CameraPose {
            eye: pose.target + direction * distance,
            ..pose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraPose {
        CameraPose {
            parameter: 0.0,
            look_parameter: 0.03,
            eye: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
        }
    }

    #[test]
    fn no_input_leaves_pose_untouched() {
        let mut orbit = OrbitControls::new(&ControlOptions::default());
        for _ in 0..10 {
            orbit.update();
        }
        assert_eq!(orbit.apply(pose()), pose());
    }

    #[test]
    fn damped_rotation_eases_in_and_converges() {
        let mut orbit = OrbitControls::new(&ControlOptions::default());
        orbit.rotate(1.0, 0.0);
        orbit.update();
        let (yaw, ..) = orbit.offset();
        assert!((yaw - 0.03).abs() < 1e-6);

        for _ in 0..1000 {
            orbit.update();
        }
        let (yaw, ..) = orbit.offset();
        assert!((yaw - 1.0).abs() < 1e-4);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut orbit = OrbitControls::new(&ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        });
        orbit.rotate(0.5, 0.25);
        orbit.update();
        assert_eq!(orbit.offset(), (0.5, 0.25, 0.0));
    }

    #[test]
    fn orbit_keeps_target_and_distance() {
        let mut orbit = OrbitControls::new(&ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        });
        orbit.rotate(PI / 2.0, 0.0);
        orbit.update();
        let moved = orbit.apply(pose());
        assert_eq!(moved.target, Vec3::ZERO);
        assert!((moved.eye.length() - 2.0).abs() < 1e-5);
        assert!(moved.eye.distance(Vec3::new(2.0, 0.0, 0.0)) < 1e-5);
    }

    #[test]
    fn pitch_stops_short_of_the_pole() {
        let mut orbit = OrbitControls::new(&ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        });
        orbit.rotate(0.0, -10.0);
        orbit.update();
        let moved = orbit.apply(pose());
        let arm = (moved.eye - moved.target).normalize();
        assert!(arm.y < 1.0);
        assert!(arm.y > 0.99);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitControls::new(&ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        });
        orbit.zoom(1000.0);
        orbit.update();
        let near = orbit.apply(pose());
        assert!((near.eye.distance(near.target) - 0.5).abs() < 1e-5);

        orbit.zoom(-5000.0);
        orbit.update();
        let far = orbit.apply(pose());
        assert!((far.eye.distance(far.target) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn drag_of_full_height_is_one_turn() {
        let mut orbit = OrbitControls::new(&ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        });
        orbit.rotate_pixels(Vec2::new(600.0, 0.0), 600);
        orbit.update();
        let (yaw, pitch, _) = orbit.offset();
        assert!((yaw + TAU).abs() < 1e-5);
        assert_eq!(pitch, 0.0);
    }
}
