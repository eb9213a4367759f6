//! Stylize filters: Posterize, Gradient Map.
//!
//! Posterize works in the 8-bit domain: samples are quantized, masked down
//! to their top bits, then dequantized. The gradient map is the
//! two-color tint behind the duotone look.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use super::grayscale::{dequantize_u8, quantize_u8};
use crate::error::{FilterError, Result};

// ============================================================================
// Posterize
// ============================================================================

/// Reduce color levels by keeping the top `bits` bits of every sample.
///
/// # Arguments
/// * `input` - Image (height, width, channels), values 0.0-1.0
/// * `bits` - Bits kept per channel (1-8), giving `2^bits` levels
///
/// # Returns
/// Posterized image on the 8-bit grid
pub fn posterize(input: ArrayView3<f32>, bits: u8) -> Result<Array3<f32>> {
    if !(1..=8).contains(&bits) {
        return Err(FilterError::invalid(
            "bits",
            format!("must lie in 1..=8, got {bits}"),
        ));
    }

    // u16 shift so bits = 8 yields an all-ones mask
    let mask = !(((1u16 << (8 - bits)) - 1) as u8);
    Ok(input.mapv(|v| dequantize_u8(quantize_u8(v) & mask)))
}

// ============================================================================
// Gradient Map
// ============================================================================

/// Map a gray plane onto the line between two colors.
///
/// Gray 0.0 becomes `shadow`, gray 1.0 becomes `highlight`.
pub fn gradient_map(gray: ArrayView2<f32>, shadow: [f32; 3], highlight: [f32; 3]) -> Array3<f32> {
    let (height, width) = gray.dim();
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let g = gray[[y, x]];
        shadow[c] * (1.0 - g) + highlight[c] * g
    })
}

/// Collapse an RGB image to its first channel.
///
/// Used after a desaturation, where all three channels carry the same value.
pub fn first_channel(input: ArrayView3<f32>) -> Array2<f32> {
    input.index_axis(ndarray::Axis(2), 0).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ramp() -> Array3<f32> {
        Array3::from_shape_fn((16, 16, 3), |(y, x, _)| (y * 16 + x) as f32 / 255.0)
    }

    #[test]
    fn test_posterize_eight_bits_is_near_identity() {
        let img = ramp();

        let result = posterize(img.view(), 8).unwrap();

        for (a, b) in img.iter().zip(result.iter()) {
            assert!((a - b).abs() <= 1.0 / 510.0 + 1e-6);
        }
    }

    #[test]
    fn test_posterize_one_bit_has_two_levels() {
        let img = ramp();

        let result = posterize(img.view(), 1).unwrap();
        let levels: BTreeSet<u8> = result.iter().map(|&v| quantize_u8(v)).collect();

        assert_eq!(levels.len(), 2);
        assert!(levels.contains(&0));
        assert!(levels.contains(&128));
    }

    #[test]
    fn test_posterize_four_bits_level_count() {
        let img = ramp();

        let result = posterize(img.view(), 4).unwrap();
        let levels: BTreeSet<u8> = result.iter().map(|&v| quantize_u8(v)).collect();

        assert_eq!(levels.len(), 16);
    }

    #[test]
    fn test_posterize_rejects_bad_bits() {
        let img = ramp();

        assert!(posterize(img.view(), 0).is_err());
        assert!(posterize(img.view(), 9).is_err());
    }

    #[test]
    fn test_gradient_map_endpoints() {
        let mut gray = Array2::<f32>::zeros((1, 2));
        gray[[0, 1]] = 1.0;

        let result = gradient_map(gray.view(), [1.0, 0.6, 0.0], [0.5, 0.0, 0.8]);

        assert_eq!(result[[0, 0, 0]], 1.0);
        assert!((result[[0, 0, 1]] - 0.6).abs() < 1e-6);
        assert!((result[[0, 1, 0]] - 0.5).abs() < 1e-6);
        assert!((result[[0, 1, 2]] - 0.8).abs() < 1e-6);
    }
}
