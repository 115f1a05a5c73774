//! Time-driven flight along the closed path.
//!
//! The pose is a pure function of elapsed time, so nothing accumulates
//! between frames and a dropped frame never drifts the camera.

use glam::Vec3;

use crate::options::FlightOptions;
use crate::path::CatmullRomSpline;

/// Camera placement for one instant of the flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Arc-length fraction of the eye, in [0, 1).
    pub parameter: f32,
    /// Arc-length fraction of the look-at target, in [0, 1).
    pub look_parameter: f32,
    /// Eye position on the path.
    pub eye: Vec3,
    /// Look-at target further along the path.
    pub target: Vec3,
}

/// Maps elapsed time to a pose on the path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFollower {
    time_scale: f64,
    loop_period_ms: f64,
    look_ahead: f32,
}

impl PathFollower {
    /// Follower with the given timing. A non-positive loop period is
    /// treated as one scaled millisecond.
    #[must_use]
    pub fn new(options: &FlightOptions) -> Self {
        Self {
            time_scale: options.time_scale,
            loop_period_ms: if options.loop_period_ms > 0.0 {
                options.loop_period_ms
            } else {
                1.0
            },
            look_ahead: options.look_ahead,
        }
    }

    /// Loop period in scaled milliseconds.
    #[must_use]
    pub fn loop_period_ms(&self) -> f64 {
        self.loop_period_ms
    }

    /// Eye parameter after `scaled_ms` of already-scaled flight time.
    #[must_use]
    pub fn parameter_at_scaled(&self, scaled_ms: f64) -> f32 {
        let u = scaled_ms.rem_euclid(self.loop_period_ms) / self.loop_period_ms;
        wrap_unit(u as f32)
    }

    /// Eye parameter after `elapsed_ms` of wall-clock time.
    #[must_use]
    pub fn parameter_at(&self, elapsed_ms: f64) -> f32 {
        self.parameter_at_scaled(elapsed_ms * self.time_scale)
    }

    /// Target parameter for an eye at `parameter`.
    #[must_use]
    pub fn look_parameter(&self, parameter: f32) -> f32 {
        wrap_unit(parameter + self.look_ahead)
    }

    /// Pose for an eye at `parameter` on `spline`.
    #[must_use]
    pub fn pose_at_parameter(
        &self,
        spline: &CatmullRomSpline,
        parameter: f32,
    ) -> CameraPose {
        let look_parameter = self.look_parameter(parameter);
        CameraPose {
            parameter,
            look_parameter,
            eye: spline.point_at(parameter),
            target: spline.point_at(look_parameter),
        }
    }

    /// Pose after `elapsed_ms` of wall-clock time.
    #[must_use]
    pub fn pose(&self, spline: &CatmullRomSpline, elapsed_ms: f64) -> CameraPose {
        self.pose_at_parameter(spline, self.parameter_at(elapsed_ms))
    }
}

/// `x mod 1`, guarding against `rem_euclid` rounding up to exactly 1.0.
fn wrap_unit(x: f32) -> f32 {
    let u = x.rem_euclid(1.0);
    if u >= 1.0 {
        0.0
    } else {
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> PathFollower {
        PathFollower::new(&FlightOptions::default())
    }

    #[test]
    fn parameters_stay_in_unit_range() {
        let f = follower();
        for i in 0..10_000 {
            let t = f64::from(i) * 37.3;
            let u = f.parameter_at(t);
            assert!((0.0..1.0).contains(&u), "t={t}: u={u}");
            let look = f.look_parameter(u);
            assert!((0.0..1.0).contains(&look));
            let expected = (u + 0.03).rem_euclid(1.0);
            assert!((look - expected).abs() < 1e-6 || (look - expected).abs() > 1.0 - 1e-6);
        }
    }

    #[test]
    fn look_ahead_wraps_past_the_seam() {
        let f = follower();
        assert!((f.look_parameter(0.99) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn position_is_periodic_in_scaled_time() {
        let f = follower();
        let spline = CatmullRomSpline::default();
        for i in 0..50 {
            let scaled = f64::from(i) * 513.0;
            let a = f.parameter_at_scaled(scaled);
            let b = f.parameter_at_scaled(scaled + f.loop_period_ms());
            let pa = spline.point_at(a);
            let pb = spline.point_at(b);
            assert!(pa.distance(pb) < 1e-3, "scaled {scaled}");
        }
    }

    #[test]
    fn one_loop_takes_period_over_time_scale() {
        let f = follower();
        // 10_000 scaled ms at 0.1x is 100 s of wall clock
        assert!(f.parameter_at(100_000.0) < 1e-6);
        assert!((f.parameter_at(50_000.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn start_and_half_loop_positions() {
        let f = follower();
        let spline = CatmullRomSpline::default();

        let start = f.pose(&spline, 0.0);
        assert_eq!(start.parameter, 0.0);
        assert!(start.eye.distance(spline.point_at(0.0)) < 1e-6);
        assert!(start.target.distance(spline.point_at(0.03)) < 1e-5);

        let half = f.pose_at_parameter(&spline, f.parameter_at_scaled(5_000.0));
        assert!((half.parameter - 0.5).abs() < 1e-6);
        assert!(half.eye.distance(spline.point_at(0.5)) < 1e-5);
    }

    #[test]
    fn degenerate_period_does_not_divide_by_zero() {
        let f = PathFollower::new(&FlightOptions {
            loop_period_ms: 0.0,
            ..FlightOptions::default()
        });
        assert!(f.parameter_at(1234.5).is_finite());
    }
}
