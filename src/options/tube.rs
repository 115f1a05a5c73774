use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Tube mesh resolution and overlay parameters.
pub struct TubeOptions {
    /// Rings along the path.
    pub tubular_segments: usize,
    /// Tube radius in world units.
    pub radius: f32,
    /// Vertices per ring.
    pub radial_segments: usize,
    /// Minimum angle between adjacent faces, in degrees, for an edge to be
    /// drawn as a feature edge.
    pub edge_threshold_deg: f32,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            tubular_segments: 222,
            radius: 0.65,
            radial_segments: 16,
            edge_threshold_deg: 0.2,
        }
    }
}
