use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Placement of the cubes scattered along the path.
pub struct DecorationOptions {
    /// Number of cubes.
    pub count: usize,
    /// Cube edge length.
    pub size: f32,
    /// Maximum forward jitter along the path, as a fraction of the loop.
    pub jitter: f32,
    /// Subtracted from each `[0, 1)` x/y offset draw.
    pub offset_bias: f32,
    /// Fixed RNG seed. A random seed is drawn (and logged) when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DecorationOptions {
    fn default() -> Self {
        Self {
            count: 55,
            size: 0.075,
            jitter: 0.1,
            offset_bias: 0.4,
            seed: None,
        }
    }
}
