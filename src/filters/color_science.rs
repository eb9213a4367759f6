//! Color science filters: Hue rotation.
//!
//! Works in HSV so value and saturation survive the rotation untouched.
//! Hue is expressed as a fraction of a full turn (0.0-1.0) throughout.

use ndarray::{Array3, ArrayView3};

use super::core::ensure_rgb;
use crate::error::{FilterError, Result};

// ============================================================================
// Color Space Conversion Utilities
// ============================================================================

/// Convert RGB to HSV.
/// Input: r, g, b in 0.0-1.0
/// Output: (h, s, v) where h is 0.0-1.0 (fraction of a turn), s and v are 0.0-1.0
#[inline]
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let v = max;
    let s = if max > 0.0 { d / max } else { 0.0 };

    if d <= 0.0 {
        return (0.0, s, v);
    }

    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Convert HSV to RGB.
/// Input: h in 0.0-1.0 (wraps), s and v in 0.0-1.0
/// Output: (r, g, b) in 0.0-1.0
#[inline]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = (h6.floor() as i32).rem_euclid(6);
    let f = h6 - h6.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

// ============================================================================
// Hue Shift
// ============================================================================

/// Rotate image hue.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3), values 0.0-1.0
/// * `shift` - Hue rotation as a fraction of a full turn, -0.5 to 0.5
///
/// # Returns
/// Hue-rotated image with saturation and value preserved
pub fn adjust_hue(input: ArrayView3<f32>, shift: f32) -> Result<Array3<f32>> {
    ensure_rgb(&input)?;
    if !(-0.5..=0.5).contains(&shift) {
        return Err(FilterError::invalid(
            "hue_shift",
            format!("must lie in [-0.5, 0.5], got {shift}"),
        ));
    }

    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]];
            let g = input[[y, x, 1]];
            let b = input[[y, x, 2]];

            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (nr, ng, nb) = hsv_to_rgb(h + shift, s, v);

            output[[y, x, 0]] = nr;
            output[[y, x, 1]] = ng;
            output[[y, x, 2]] = nb;
        }
    }
    Ok(output)
}
