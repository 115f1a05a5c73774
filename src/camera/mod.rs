//! Camera system for the fly-through.
//!
//! The eye follows the path as a pure function of time; a damped orbit
//! offset lets the user look around without leaving the path.

/// Path-following camera controller and GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Time-driven pose along the path.
pub mod follower;
/// Damped orbit overlay.
pub mod orbit;
/// GPU-free camera state driven by the follower and orbit.
pub mod rig;
/// Drawable size tracking.
pub mod viewport;
