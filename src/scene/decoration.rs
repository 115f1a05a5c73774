//! Cubes scattered along the path, colour-coded by where they sit on the
//! loop.

use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::options::DecorationOptions;
use crate::path::CatmullRomSpline;
use crate::util::color::hsl_to_rgb;

/// One placed cube. Fixed after scene setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    /// Parametric position on the path in [0, 1).
    pub parameter: f32,
    /// Path point at `parameter`, before the scatter offset.
    pub anchor: Vec3,
    /// World position (anchor plus scatter offset).
    pub position: Vec3,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
    /// Linear RGB edge colour.
    pub color: [f32; 3],
}

impl Decoration {
    /// Model matrix: rotation about the cube centre, then translation.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(rotation, self.position)
    }
}

/// Place `options.count` decorations along `spline`.
///
/// Decoration `i` lands at `(i / count + random * jitter) mod 1`, offset
/// in x and y by `random - offset_bias`, with each Euler angle drawn from
/// `[0, π)`. Hue runs `1 - parameter` at full saturation and half
/// lightness.
pub fn place_decorations<R: Rng + ?Sized>(
    spline: &CatmullRomSpline,
    options: &DecorationOptions,
    rng: &mut R,
) -> Vec<Decoration> {
    let count = options.count;
    (0..count)
        .map(|i| {
            let parameter = (i as f32 / count as f32
                + rng.random::<f32>() * options.jitter)
                .rem_euclid(1.0);
            let anchor = spline.point_at(parameter);

            let mut position = anchor;
            position.y += rng.random::<f32>() - options.offset_bias;
            position.x += rng.random::<f32>() - options.offset_bias;

            let rotation = Vec3::new(
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
            );

            Decoration {
                parameter,
                anchor,
                position,
                rotation,
                color: hsl_to_rgb(1.0 - parameter, 1.0, 0.5),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn place(seed: u64) -> Vec<Decoration> {
        let mut rng = StdRng::seed_from_u64(seed);
        place_decorations(
            &CatmullRomSpline::default(),
            &DecorationOptions::default(),
            &mut rng,
        )
    }

    #[test]
    fn places_the_configured_count() {
        assert_eq!(place(1).len(), 55);
    }

    #[test]
    fn parameters_stay_within_jitter_of_their_slot() {
        for (i, d) in place(7).iter().enumerate() {
            assert!((0.0..1.0).contains(&d.parameter));
            let base = i as f32 / 55.0;
            let jitter = (d.parameter - base).rem_euclid(1.0);
            assert!(jitter < 0.1 + 1e-6, "decoration {i}: jitter {jitter}");
        }
    }

    #[test]
    fn positions_stay_within_scatter_bounds() {
        let spline = CatmullRomSpline::default();
        for d in place(11) {
            assert!(d.anchor.distance(spline.point_at(d.parameter)) < 1e-5);
            let offset = d.position - d.anchor;
            assert!((-0.4..0.6).contains(&offset.x));
            assert!((-0.4..0.6).contains(&offset.y));
            assert_eq!(offset.z, 0.0);
        }
    }

    #[test]
    fn rotations_are_in_half_turn() {
        for d in place(3) {
            for angle in d.rotation.to_array() {
                assert!((0.0..PI).contains(&angle));
            }
        }
    }

    #[test]
    fn hue_follows_parameter() {
        for d in place(5) {
            assert_eq!(d.color, hsl_to_rgb(1.0 - d.parameter, 1.0, 0.5));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(place(42), place(42));
        assert_ne!(place(42), place(43));
    }

    #[test]
    fn transform_places_cube_centre_at_position() {
        let d = place(9)[0];
        let centre = d.transform().transform_point3(Vec3::ZERO);
        assert!(centre.distance(d.position) < 1e-5);
    }
}
