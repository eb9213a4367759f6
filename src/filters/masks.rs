//! Mask synthesis for the spatial looks.
//!
//! Masks are `(height, width)` planes of weights in 0.0-1.0, broadcast
//! across channels by [`super::core::masked_blend`] and
//! [`super::core::apply_mask`]. The image center is taken at the integer
//! halves `(height / 2, width / 2)`.

use ndarray::Array2;

use crate::error::{FilterError, Result};

/// Radial falloff mask.
///
/// Weight is 1.0 inside `radius * D`, then falls linearly by `darkness` over
/// `softness * D`, where `D` is the distance from the center to the corner.
///
/// # Arguments
/// * `radius` - Start of the falloff, as a fraction of `D`
/// * `softness` - Width of the falloff, as a fraction of `D`; must be positive
/// * `darkness` - Weight removed at full falloff, 0.0-1.0
pub fn radial_mask(
    height: usize,
    width: usize,
    radius: f32,
    softness: f32,
    darkness: f32,
) -> Result<Array2<f32>> {
    if !(softness > 0.0) {
        return Err(FilterError::invalid(
            "softness",
            format!("must be positive, got {softness}"),
        ));
    }
    if !(0.0..=1.0).contains(&darkness) {
        return Err(FilterError::invalid(
            "darkness",
            format!("must lie in [0, 1], got {darkness}"),
        ));
    }

    let cy = (height / 2) as f32;
    let cx = (width / 2) as f32;
    let max_distance = (cy * cy + cx * cx).sqrt();

    // A single pixel has no falloff to speak of
    if max_distance == 0.0 {
        return Ok(Array2::from_elem((height, width), 1.0));
    }

    let start = radius * max_distance;
    let span = softness * max_distance;

    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        let dy = y as f32 - cy;
        let dx = x as f32 - cx;
        let d = (dx * dx + dy * dy).sqrt();
        let falloff = ((d - start) / span).clamp(0.0, 1.0);
        1.0 - darkness * falloff
    }))
}

/// Horizontal band of focus.
///
/// Rows within `focus_rows / 2` (integer half) of the center row weigh 1.0.
/// Beyond the band the weight drops linearly to 0.0 over `feather_rows`;
/// `feather_rows = 0` gives a hard edge.
pub fn vertical_focus_mask(
    height: usize,
    width: usize,
    focus_rows: usize,
    feather_rows: usize,
) -> Array2<f32> {
    let center = height / 2;
    let half_band = focus_rows / 2;

    let row_weight = |y: usize| -> f32 {
        let distance = y.abs_diff(center);
        if distance <= half_band {
            return 1.0;
        }
        if feather_rows == 0 {
            return 0.0;
        }
        let ramp = ((distance - half_band) as f32 / feather_rows as f32).min(1.0);
        1.0 - ramp
    };

    Array2::from_shape_fn((height, width), |(y, _)| row_weight(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_mask_center_and_corners() {
        let mask = radial_mask(64, 64, 0.8, 0.3, 0.4).unwrap();

        assert_eq!(mask[[32, 32]], 1.0);
        assert!(mask[[0, 0]] < 1.0);
        assert!(mask[[63, 0]] < 1.0);
        // Corner (0, 0) sits exactly at D, so falloff is (1 - 0.8) / 0.3
        let expected = 1.0 - 0.4 * (0.2f32 / 0.3);
        assert!((mask[[0, 0]] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_radial_mask_monotonic_along_diagonal() {
        let mask = radial_mask(64, 64, 0.8, 0.3, 0.4).unwrap();

        for i in 0..32 {
            assert!(mask[[i, i]] <= mask[[i + 1, i + 1]] + 1e-6);
        }
    }

    #[test]
    fn test_radial_mask_rejects_bad_params() {
        assert!(radial_mask(8, 8, 0.8, 0.0, 0.4).is_err());
        assert!(radial_mask(8, 8, 0.8, 0.3, 1.5).is_err());
    }

    #[test]
    fn test_radial_mask_single_pixel() {
        let mask = radial_mask(1, 1, 0.8, 0.3, 0.4).unwrap();

        assert_eq!(mask[[0, 0]], 1.0);
    }

    #[test]
    fn test_vertical_focus_band() {
        // 100 rows: band 30 rows, feather 20 rows
        let mask = vertical_focus_mask(100, 4, 30, 20);

        assert_eq!(mask[[50, 0]], 1.0);
        assert_eq!(mask[[35, 3]], 1.0);
        assert_eq!(mask[[65, 1]], 1.0);
        assert!((mask[[75, 0]] - 0.5).abs() < 1e-6);
        assert_eq!(mask[[85, 0]], 0.0);
        assert_eq!(mask[[0, 0]], 0.0);
    }

    #[test]
    fn test_vertical_focus_hard_edge() {
        let mask = vertical_focus_mask(10, 2, 2, 0);

        assert_eq!(mask[[5, 0]], 1.0);
        assert_eq!(mask[[4, 0]], 1.0);
        assert_eq!(mask[[3, 0]], 0.0);
    }
}
