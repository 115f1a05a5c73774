use glam::Vec3;

use super::TriangleMesh;

/// Face axes `(u, v)` with `u × v` equal to the outward normal.
const FACES: [(Vec3, Vec3); 6] = [
    (Vec3::Y, Vec3::Z),
    (Vec3::Z, Vec3::Y),
    (Vec3::Z, Vec3::X),
    (Vec3::X, Vec3::Z),
    (Vec3::X, Vec3::Y),
    (Vec3::Y, Vec3::X),
];

/// Cube of edge length `size` centred on the origin.
///
/// Each face has its own four vertices (24 total) so the two triangles of
/// a face share a diagonal but no vertex is shared across faces.
#[must_use]
pub fn cube(size: f32) -> TriangleMesh {
    let h = size * 0.5;
    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (u, v) in FACES {
        let n = u.cross(v);
        let base = positions.len() as u32;
        positions.extend([
            (n - u - v) * h,
            (n + u - v) * h,
            (n + u + v) * h,
            (n - u + v) * h,
        ]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    TriangleMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_point_outward() {
        let mesh = cube(2.0);
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (
                mesh.positions[a as usize],
                mesh.positions[b as usize],
                mesh.positions[c as usize],
            );
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn corners_sit_at_half_size() {
        let mesh = cube(0.075);
        for p in &mesh.positions {
            assert!((p.abs() - Vec3::splat(0.0375)).length() < 1e-6);
        }
    }
}
