//! Line overlays derived from triangle meshes.
//!
//! Vertices are welded by quantized position first, so meshes that split
//! vertices per face (the cube) or along a seam still share their edges.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use super::TriangleMesh;

/// A line segment between two points.
pub type Segment = [Vec3; 2];

/// Positions closer than `1 / WELD_PRECISION` collapse to one vertex.
const WELD_PRECISION: f32 = 1e4;

/// Mesh with welded vertices and degenerate triangles removed.
struct WeldedMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

fn weld(mesh: &TriangleMesh) -> WeldedMesh {
    let mut ids: FxHashMap<[i32; 3], u32> = FxHashMap::default();
    let mut positions = Vec::new();

    let remap: Vec<u32> = mesh
        .positions
        .iter()
        .map(|&p| {
            let key = (p * WELD_PRECISION).round().as_ivec3().to_array();
            *ids.entry(key).or_insert_with(|| {
                positions.push(p);
                (positions.len() - 1) as u32
            })
        })
        .collect();

    let triangles = mesh
        .triangles()
        .filter_map(|[a, b, c]| {
            let tri = [
                *remap.get(a as usize)?,
                *remap.get(b as usize)?,
                *remap.get(c as usize)?,
            ];
            (tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2])
                .then_some(tri)
        })
        .collect();

    WeldedMesh {
        positions,
        triangles,
    }
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Every unique triangle edge, in first-seen order.
#[must_use]
pub fn wireframe_edges(mesh: &TriangleMesh) -> Vec<Segment> {
    let welded = weld(mesh);
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut segments = Vec::new();

    for [a, b, c] in &welded.triangles {
        for (i, j) in [(*a, *b), (*b, *c), (*c, *a)] {
            if seen.insert(edge_key(i, j)) {
                segments.push([
                    welded.positions[i as usize],
                    welded.positions[j as usize],
                ]);
            }
        }
    }
    segments
}

/// Edges where adjacent face normals differ by more than
/// `threshold_deg`, plus edges used by only one face.
#[must_use]
pub fn feature_edges(mesh: &TriangleMesh, threshold_deg: f32) -> Vec<Segment> {
    let welded = weld(mesh);
    let threshold_dot = threshold_deg.to_radians().cos();

    // Edge key -> slot in `open`, the first face's normal awaiting a partner
    let mut pending: FxHashMap<(u32, u32), usize> = FxHashMap::default();
    let mut open: Vec<Option<(Vec3, u32, u32)>> = Vec::new();
    let mut segments = Vec::new();

    for [a, b, c] in &welded.triangles {
        let (pa, pb, pc) = (
            welded.positions[*a as usize],
            welded.positions[*b as usize],
            welded.positions[*c as usize],
        );
        let normal = (pb - pa).cross(pc - pa);
        if normal.length_squared() <= f32::EPSILON * f32::EPSILON {
            continue;
        }
        let normal = normal.normalize();

        for (i, j) in [(*a, *b), (*b, *c), (*c, *a)] {
            let key = edge_key(i, j);
            match pending.remove(&key) {
                Some(slot) => {
                    let Some((other, ..)) = open[slot].take() else {
                        continue;
                    };
                    if other.dot(normal) <= threshold_dot {
                        segments.push([
                            welded.positions[i as usize],
                            welded.positions[j as usize],
                        ]);
                    }
                }
                None => {
                    let _ = pending.insert(key, open.len());
                    open.push(Some((normal, i, j)));
                }
            }
        }
    }

    segments.extend(open.into_iter().flatten().map(|(_, i, j)| {
        [welded.positions[i as usize], welded.positions[j as usize]]
    }));
    segments
}

#[cfg(test)]
mod tests {
    use super::super::cube::cube;
    use super::*;

    #[test]
    fn cube_has_twelve_feature_edges() {
        let edges = feature_edges(&cube(1.0), 0.2);
        assert_eq!(edges.len(), 12);
        for [a, b] in &edges {
            assert!((a.distance(*b) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn cube_wireframe_includes_face_diagonals() {
        let edges = wireframe_edges(&cube(1.0));
        assert_eq!(edges.len(), 18);
        let diagonals = edges
            .iter()
            .filter(|[a, b]| (a.distance(*b) - 2f32.sqrt()).abs() < 1e-5)
            .count();
        assert_eq!(diagonals, 6);
    }

    #[test]
    fn open_triangle_reports_boundary_edges() {
        let mesh = TriangleMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            indices: vec![0, 1, 2],
        };
        assert_eq!(feature_edges(&mesh, 0.2).len(), 3);
        assert_eq!(wireframe_edges(&mesh).len(), 3);
    }

    #[test]
    fn coplanar_quad_hides_its_diagonal() {
        let mesh = TriangleMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            indices: vec![0, 1, 2, 0, 2, 3],
        };
        assert_eq!(feature_edges(&mesh, 0.2).len(), 4);
        assert_eq!(wireframe_edges(&mesh).len(), 5);
    }

    #[test]
    fn degenerate_triangles_are_skipped() {
        let mesh = TriangleMesh {
            positions: vec![Vec3::ZERO, Vec3::ZERO, Vec3::X],
            indices: vec![0, 1, 2],
        };
        assert!(feature_edges(&mesh, 0.2).is_empty());
        assert!(wireframe_edges(&mesh).is_empty());
    }
}
