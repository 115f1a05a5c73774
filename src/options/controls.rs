use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Orbit input response.
pub struct ControlOptions {
    /// Ease pending orbit input over several frames instead of applying it
    /// at once.
    pub enable_damping: bool,
    /// Fraction of the pending input applied per frame when damping.
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Closest the orbit may bring the eye to its target.
    pub min_distance: f32,
    /// Farthest the orbit may pull the eye from its target.
    pub max_distance: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.03,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}
