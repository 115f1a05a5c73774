//! Closed tube swept along a spline.
//!
//! Rings of `radial_segments` vertices are placed at uniform arc-length
//! steps and oriented by rotation-minimizing frames. The last ring
//! connects back to the first, so the mesh has no seam vertices.

use std::f32::consts::TAU;

use glam::Vec3;

use super::frames::{rotation_minimizing_frames, Frame};
use super::TriangleMesh;
use crate::path::CatmullRomSpline;

/// Shape parameters for [`build_tube`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeParams {
    /// Rings along the path.
    pub tubular_segments: usize,
    /// Distance from the path to the tube surface.
    pub radius: f32,
    /// Vertices around each ring.
    pub radial_segments: usize,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            tubular_segments: 222,
            radius: 0.65,
            radial_segments: 16,
        }
    }
}

/// Tube surface plus the centreline samples it was swept from.
#[derive(Debug, Clone)]
pub struct TubeMesh {
    /// Triangle surface, `tubular_segments × radial_segments` vertices.
    pub mesh: TriangleMesh,
    /// Ring centres on the path.
    pub centers: Vec<Vec3>,
    /// Ring orientation frames.
    pub frames: Vec<Frame>,
    /// Parameters the mesh was built with (segment counts clamped to >= 3).
    pub params: TubeParams,
}

/// Sweep a closed tube along `spline`.
#[must_use]
pub fn build_tube(spline: &CatmullRomSpline, params: &TubeParams) -> TubeMesh {
    let segments = params.tubular_segments.max(3);
    let radial = params.radial_segments.max(3);

    let (centers, tangents): (Vec<Vec3>, Vec<Vec3>) = (0..segments)
        .map(|i| {
            let u = i as f32 / segments as f32;
            (spline.point_at(u), spline.tangent_at(u))
        })
        .unzip();
    let frames = rotation_minimizing_frames(&centers, &tangents, true);

    let mut positions = Vec::with_capacity(segments * radial);
    for (center, frame) in centers.iter().zip(&frames) {
        for j in 0..radial {
            let v = j as f32 / radial as f32 * TAU;
            let sin = v.sin();
            let cos = -v.cos();
            let offset = frame.normal * cos + frame.binormal * sin;
            positions.push(*center + offset * params.radius);
        }
    }

    let index = |ring: usize, j: usize| -> u32 {
        ((ring % segments) * radial + (j % radial)) as u32
    };
    let mut indices = Vec::with_capacity(segments * radial * 6);
    for ring in 0..segments {
        for j in 0..radial {
            let a = index(ring, j);
            let b = index(ring + 1, j);
            let c = index(ring + 1, j + 1);
            let d = index(ring, j + 1);
            indices.extend([a, b, d, b, c, d]);
        }
    }

    TubeMesh {
        mesh: TriangleMesh { positions, indices },
        centers,
        frames,
        params: TubeParams {
            tubular_segments: segments,
            radius: params.radius,
            radial_segments: radial,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::geometry::{feature_edges, wireframe_edges};

    fn default_tube() -> TubeMesh {
        build_tube(&CatmullRomSpline::default(), &TubeParams::default())
    }

    #[test]
    fn vertex_and_index_counts() {
        let tube = default_tube();
        assert_eq!(tube.mesh.positions.len(), 222 * 16);
        assert_eq!(tube.mesh.indices.len(), 222 * 16 * 6);
        assert_eq!(tube.centers.len(), 222);
    }

    #[test]
    fn vertices_sit_on_the_radius() {
        let tube = default_tube();
        for (i, ring) in tube.mesh.positions.chunks(16).enumerate() {
            for p in ring {
                let r = p.distance(tube.centers[i]);
                assert!((r - 0.65).abs() < 1e-4, "ring {i}: radius {r}");
            }
        }
    }

    #[test]
    fn every_edge_has_two_faces() {
        let tube = default_tube();
        let mut counts: HashMap<(u32, u32), u32> = HashMap::new();
        for [a, b, c] in tube.mesh.triangles() {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                *counts.entry((i.min(j), i.max(j))).or_insert(0) += 1;
            }
        }
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn overlays_are_consistent() {
        let tube = default_tube();
        let wire = wireframe_edges(&tube.mesh);
        // Ring edges + longitudinal edges + quad diagonals
        assert_eq!(wire.len(), 222 * 16 * 3);
        let features = feature_edges(&tube.mesh, 0.2);
        assert!(!features.is_empty());
        assert!(features.len() <= wire.len());
    }

    #[test]
    fn segment_counts_are_clamped() {
        let tube = build_tube(
            &CatmullRomSpline::default(),
            &TubeParams {
                tubular_segments: 1,
                radius: 1.0,
                radial_segments: 0,
            },
        );
        assert_eq!(tube.params.tubular_segments, 3);
        assert_eq!(tube.params.radial_segments, 3);
        assert_eq!(tube.mesh.positions.len(), 9);
    }
}
