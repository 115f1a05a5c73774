//! Closed centripetal Catmull-Rom spline with arc-length sampling.
//!
//! `point(t)` evaluates the curve at its raw parameter; `point_at(u)`
//! evaluates it at a fraction `u` of the total arc length. The camera
//! follower, tube builder and decoration placer all sample through
//! `point_at` so equal steps in `u` cover equal distances.

use glam::Vec3;

/// Number of divisions in the cumulative arc-length table.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parameter offset used for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// Knot spacings below this are treated as degenerate.
const MIN_KNOT_SPACING: f32 = 1e-4;

/// Control points of the default wormhole loop.
pub const DEFAULT_CONTROL_POINTS: [[f32; 3]; 18] = [
    [13.200, -1.100, 0.400],
    [12.439, 1.236, 1.433],
    [8.011, 1.887, 2.901],
    [2.880, 0.550, 5.689],
    [-0.885, -1.045, 9.060],
    [-4.358, -1.045, 11.249],
    [-7.120, 0.550, 11.232],
    [-7.310, 1.887, 9.203],
    [-6.355, 1.236, 5.547],
    [-6.800, -1.100, 0.400],
    [-7.536, -2.921, -5.408],
    [-6.900, -2.269, -9.955],
    [-6.080, 0.550, -11.632],
    [-5.129, 3.112, -10.636],
    [-1.656, 3.112, -8.447],
    [3.920, 0.550, -6.089],
    [8.421, -2.269, -3.652],
    [11.257, -2.921, -1.294],
];

/// Cubic polynomial `c0 + c1·t + c2·t² + c3·t³` with vector coefficients.
#[derive(Clone, Copy)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// Hermite form from endpoints and tangents.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Non-uniform Catmull-Rom segment between `x1` and `x2`.
    fn nonuniform_catmull_rom(
        [x0, x1, x2, x3]: [Vec3; 4],
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Immutable closed spline through an ordered ring of control points.
#[derive(Debug, Clone)]
pub struct CatmullRomSpline {
    points: Vec<Vec3>,
    /// Cumulative arc length at `t = i / ARC_LENGTH_DIVISIONS`.
    lengths: Vec<f32>,
}

impl Default for CatmullRomSpline {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_POINTS.iter().copied().map(Vec3::from).collect())
    }
}

impl CatmullRomSpline {
    /// Build a closed spline. Fewer than two points produce a degenerate
    /// curve that evaluates to the single point (or the origin).
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut spline = Self {
            points,
            lengths: Vec::new(),
        };
        spline.lengths = spline.compute_lengths();
        spline
    }

    /// The control points as given.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length of the closed loop.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Evaluate the curve at raw parameter `t` (wrapped into [0, 1)).
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = n as f32 * t.rem_euclid(1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= n {
            // rem_euclid can round up to exactly 1.0 for tiny negatives
            segment = n - 1;
            weight = 1.0;
        }

        let p0 = self.points[(segment + n - 1) % n];
        let p1 = self.points[segment];
        let p2 = self.points[(segment + 1) % n];
        let p3 = self.points[(segment + 2) % n];

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        CubicPoly::nonuniform_catmull_rom([p0, p1, p2, p3], dt0, dt1, dt2)
            .eval(weight)
    }

    /// Evaluate the curve at arc-length fraction `u` (wrapped into [0, 1)).
    #[must_use]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    #[must_use]
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let t = self.u_to_t(u);
        let a = self.point(t - TANGENT_DELTA);
        let b = self.point(t + TANGENT_DELTA);
        (b - a).normalize_or(Vec3::Z)
    }

    /// Map an arc-length fraction to the raw curve parameter.
    #[must_use]
    pub fn u_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return u.rem_euclid(1.0);
        }
        let target = u.rem_euclid(1.0) * total;

        // Last index whose cumulative length is <= target
        let i = self
            .lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(ARC_LENGTH_DIVISIONS - 1);

        let before = self.lengths[i];
        let segment_length = self.lengths[i + 1] - before;
        let fraction = if segment_length > 0.0 {
            (target - before) / segment_length
        } else {
            0.0
        };
        (i as f32 + fraction) / ARC_LENGTH_DIVISIONS as f32
    }

    fn compute_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        lengths.push(0.0);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        for i in 1..=ARC_LENGTH_DIVISIONS {
            // `point(1.0)` wraps to the start, which closes the loop
            let current = self.point(i as f32 / ARC_LENGTH_DIVISIONS as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CatmullRomSpline {
        CatmullRomSpline::new(vec![
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ])
    }

    #[test]
    fn passes_through_control_points() {
        let spline = CatmullRomSpline::default();
        let n = spline.control_points().len();
        for (i, cp) in spline.control_points().iter().enumerate() {
            let p = spline.point(i as f32 / n as f32);
            assert!(p.distance(*cp) < 1e-3, "point {i}: {p} vs {cp}");
        }
    }

    #[test]
    fn point_at_zero_is_first_control_point() {
        let spline = CatmullRomSpline::default();
        let first = spline.control_points()[0];
        assert!(spline.point_at(0.0).distance(first) < 1e-4);
    }

    #[test]
    fn loop_is_closed() {
        let spline = CatmullRomSpline::default();
        let start = spline.point_at(0.0);
        assert!(spline.point_at(0.999_99).distance(start) < 1e-2);
        assert!(spline.point_at(1.0).distance(start) < 1e-4);
    }

    #[test]
    fn arc_length_sampling_is_uniform() {
        let spline = CatmullRomSpline::default();
        let samples = 100;
        let expected = spline.length() / samples as f32;
        for i in 0..samples {
            let a = spline.point_at(i as f32 / samples as f32);
            let b = spline.point_at((i + 1) as f32 / samples as f32);
            let step = a.distance(b);
            assert!(
                (step - expected).abs() / expected < 0.05,
                "step {i}: {step} vs {expected}"
            );
        }
    }

    #[test]
    fn square_loop_is_symmetric() {
        let spline = square();
        let quarter = spline.point_at(0.25);
        assert!(quarter.distance(Vec3::new(-1.0, 0.0, 1.0)) < 1e-3);
        // Centripetal curve bulges past the square's edge midpoint
        let mid = spline.point_at(0.125);
        assert!(mid.z > 1.0);
        assert!(mid.x.abs() < 1e-3);
    }

    #[test]
    fn tangent_is_unit_and_follows_direction() {
        let spline = square();
        let tangent = spline.tangent_at(0.125);
        assert!((tangent.length() - 1.0).abs() < 1e-4);
        assert!(tangent.x < -0.99);
    }

    #[test]
    fn u_to_t_is_monotonic() {
        let spline = CatmullRomSpline::default();
        let mut last = -1.0;
        for i in 0..1000 {
            let t = spline.u_to_t(i as f32 / 1000.0);
            assert!(t >= last);
            assert!((0.0..1.0).contains(&t));
            last = t;
        }
    }

    #[test]
    fn degenerate_splines_do_not_panic() {
        let empty = CatmullRomSpline::new(Vec::new());
        assert_eq!(empty.point_at(0.3), Vec3::ZERO);
        assert_eq!(empty.length(), 0.0);

        let single = CatmullRomSpline::new(vec![Vec3::ONE]);
        assert_eq!(single.point_at(0.7), Vec3::ONE);

        let repeated = CatmullRomSpline::new(vec![Vec3::X; 3]);
        assert!(repeated.point_at(0.5).is_finite());
    }
}
