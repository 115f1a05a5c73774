//! The closed path the tube is built around and the camera flies along.

/// Closed centripetal Catmull-Rom spline with arc-length sampling.
pub mod spline;

pub use spline::{CatmullRomSpline, DEFAULT_CONTROL_POINTS};
