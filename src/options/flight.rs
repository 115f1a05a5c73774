use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Timing of the camera's flight along the path.
pub struct FlightOptions {
    /// Multiplier from wall-clock milliseconds to flight time.
    pub time_scale: f64,
    /// Length of one loop, in scaled milliseconds.
    pub loop_period_ms: f64,
    /// How far ahead of the camera the look-at target sits, as a fraction
    /// of the loop.
    pub look_ahead: f32,
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            time_scale: 0.1,
            loop_period_ms: 10_000.0,
            look_ahead: 0.03,
        }
    }
}
