//! CPU-side mesh generation.
//!
//! Builds the swept tube and the decoration cube as indexed triangle
//! meshes, and derives the line overlays (full wireframe and feature
//! edges) the scene actually draws. Pure `glam` math with no GPU types.

/// Axis-aligned cube mesh.
pub mod cube;
/// Wireframe and feature-edge extraction with position welding.
pub mod edges;
/// Rotation-minimizing frames along sampled curves.
pub mod frames;
/// Closed tube swept along a spline.
pub mod tube;

use glam::Vec3;

pub use edges::{feature_edges, wireframe_edges, Segment};
pub use tube::{build_tube, TubeMesh, TubeParams};

/// Indexed triangle mesh with counter-clockwise front faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}
