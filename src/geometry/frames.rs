//! Rotation Minimizing Frames using the double reflection method
//! (Wang et al. 2008), with optional twist correction for closed loops.

use glam::{Quat, Vec3};

/// Orthonormal frame at a curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Unit tangent along the curve.
    pub tangent: Vec3,
    /// Unit normal, perpendicular to the tangent.
    pub normal: Vec3,
    /// `tangent × normal`.
    pub binormal: Vec3,
}

fn initial_frame(tangent: Vec3) -> Frame {
    let arbitrary = if tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let normal = tangent.cross(arbitrary).normalize();
    let binormal = tangent.cross(normal).normalize();
    Frame {
        tangent,
        normal,
        binormal,
    }
}

/// Frames for samples `positions[i]` with unit `tangents[i]`.
///
/// When `closed` is set the samples are treated as a loop: the twist that
/// accumulates between the last frame and the first is spread evenly over
/// all samples so the frames line up across the seam.
#[must_use]
pub fn rotation_minimizing_frames(
    positions: &[Vec3],
    tangents: &[Vec3],
    closed: bool,
) -> Vec<Frame> {
    let n = positions.len().min(tangents.len());
    if n == 0 {
        return Vec::new();
    }

    let mut frames = Vec::with_capacity(n + 1);
    frames.push(initial_frame(tangents[0]));

    // A closed loop transports one extra step back onto the first sample
    let steps = if closed { n } else { n - 1 };
    for i in 0..steps {
        let next = (i + 1) % n;
        let prev = frames[i];
        frames.push(reflect_frame(
            prev,
            positions[i],
            positions[next],
            tangents[next],
        ));
    }

    if closed {
        let Some(end) = frames.pop() else {
            return frames;
        };
        let start = frames[0];
        let twist = start
            .tangent
            .dot(end.normal.cross(start.normal))
            .atan2(end.normal.dot(start.normal));
        if twist.abs() > 1e-6 {
            for (i, frame) in frames.iter_mut().enumerate().skip(1) {
                let angle = twist * i as f32 / n as f32;
                let rotation = Quat::from_axis_angle(frame.tangent, angle);
                frame.normal = (rotation * frame.normal).normalize();
                frame.binormal = frame.tangent.cross(frame.normal).normalize();
            }
        }
    }

    frames
}

/// Double-reflect `prev` from `x_i` onto `x_i1` with tangent `t_i1`.
fn reflect_frame(prev: Frame, x_i: Vec3, x_i1: Vec3, t_i1: Vec3) -> Frame {
    let t_i = prev.tangent;
    let r_i = prev.normal;

    let v1 = x_i1 - x_i;
    let c1 = v1.dot(v1);

    if c1 < 1e-10 {
        return Frame {
            tangent: t_i1,
            ..prev
        };
    }

    // First reflection
    let r_i_l = r_i - (2.0 / c1) * v1.dot(r_i) * v1;
    let t_i_l = t_i - (2.0 / c1) * v1.dot(t_i) * v1;

    // Second reflection
    let v2 = t_i1 - t_i_l;
    let c2 = v2.dot(v2);

    let r_i1 = if c2 < 1e-10 {
        r_i_l
    } else {
        r_i_l - (2.0 / c2) * v2.dot(r_i_l) * v2
    };

    // Ensure orthonormality
    let r_i1 = (r_i1 - t_i1 * t_i1.dot(r_i1)).normalize();
    let s_i1 = t_i1.cross(r_i1).normalize();

    Frame {
        tangent: t_i1,
        normal: r_i1,
        binormal: s_i1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::CatmullRomSpline;

    fn sample(spline: &CatmullRomSpline, n: usize) -> (Vec<Vec3>, Vec<Vec3>) {
        (0..n)
            .map(|i| {
                let u = i as f32 / n as f32;
                (spline.point_at(u), spline.tangent_at(u))
            })
            .unzip()
    }

    #[test]
    fn frames_are_orthonormal() {
        let (positions, tangents) = sample(&CatmullRomSpline::default(), 120);
        for frame in rotation_minimizing_frames(&positions, &tangents, true) {
            assert!((frame.normal.length() - 1.0).abs() < 1e-4);
            assert!((frame.binormal.length() - 1.0).abs() < 1e-4);
            assert!(frame.normal.dot(frame.tangent).abs() < 1e-3);
            assert!(frame.binormal.dot(frame.tangent).abs() < 1e-3);
            assert!(frame.normal.dot(frame.binormal).abs() < 1e-3);
        }
    }

    #[test]
    fn closed_frames_are_continuous_across_the_seam() {
        let n = 222;
        let (positions, tangents) = sample(&CatmullRomSpline::default(), n);
        let frames = rotation_minimizing_frames(&positions, &tangents, true);
        assert_eq!(frames.len(), n);
        for i in 0..n {
            let a = frames[i].normal;
            let b = frames[(i + 1) % n].normal;
            assert!(a.dot(b) > 0.95, "normal jump between {i} and next");
        }
    }

    #[test]
    fn open_frames_keep_sample_count() {
        let positions: Vec<Vec3> = (0..5).map(|i| Vec3::X * i as f32).collect();
        let tangents = vec![Vec3::X; 5];
        let frames = rotation_minimizing_frames(&positions, &tangents, false);
        assert_eq!(frames.len(), 5);
        // Straight line: the frame never turns
        for frame in &frames {
            assert!((frame.normal - frames[0].normal).length() < 1e-5);
        }
    }

    #[test]
    fn empty_input_gives_no_frames() {
        assert!(rotation_minimizing_frames(&[], &[], true).is_empty());
    }
}
