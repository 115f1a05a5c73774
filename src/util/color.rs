//! HSL → RGB conversion.
//!
//! Colors are `[f32; 3]` in the linear working space the HDR scene target
//! expects. HSL is defined directly in that space, so no transfer function
//! is applied.

/// Convert HSL (all components in [0, 1], hue wrapping) to RGB with every
/// channel in [0, 1].
#[must_use]
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;
    [
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    let c = if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    };
    c.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(hsl_to_rgb(1.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5)));
        assert!(close(hsl_to_rgb(-0.25, 1.0, 0.5), hsl_to_rgb(0.75, 1.0, 0.5)));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), [0.25, 0.25, 0.25]);
    }

    #[test]
    fn secondary_hues_are_not_gamma_decoded() {
        assert!(close(hsl_to_rgb(1.0 / 12.0, 1.0, 0.5), [1.0, 0.5, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 6.0, 1.0, 0.5), [1.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(5.0 / 6.0, 1.0, 0.5), [1.0, 0.0, 1.0]));
    }

    #[test]
    fn cyan_stays_in_unit_range() {
        let rgb = hsl_to_rgb(0.5, 1.0, 0.5);
        assert!(close(rgb, [0.0, 1.0, 1.0]));
        assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn output_stays_in_unit_range() {
        for i in 0..=1000 {
            let rgb = hsl_to_rgb(i as f32 / 1000.0, 1.0, 0.5);
            assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)), "hue {i}: {rgb:?}");
        }
    }
}
