//! Color adjustment filters: Saturation, Contrast, Brightness, Gamma, Invert.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Inputs are RGB f32 images of shape (height, width, 3), values 0.0-1.0.
//!
//! Saturation, contrast and brightness do not clamp: their output may leave
//! 0.0-1.0 and the calling look clamps at its boundary. Gamma reads negative
//! transients as 0.0.

use ndarray::{Array3, ArrayView3};

use super::core::ensure_rgb;
use super::grayscale::{luma, mean_luminance};
use crate::error::{FilterError, Result};

// ============================================================================
// Saturation
// ============================================================================

/// Adjust image saturation.
///
/// Interpolates between the per-pixel luma and the original color:
/// `v * factor + gray * (1 - factor)`.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3)
/// * `factor` - 0.0 = grayscale, 1.0 = unchanged, > 1.0 = more vivid
///
/// # Returns
/// Saturation-adjusted image, not clamped
pub fn adjust_saturation(input: ArrayView3<f32>, factor: f32) -> Result<Array3<f32>> {
    ensure_rgb(&input)?;
    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]];
            let g = input[[y, x, 1]];
            let b = input[[y, x, 2]];

            let gray = luma(r, g, b);

            output[[y, x, 0]] = r * factor + gray * (1.0 - factor);
            output[[y, x, 1]] = g * factor + gray * (1.0 - factor);
            output[[y, x, 2]] = b * factor + gray * (1.0 - factor);
        }
    }
    Ok(output)
}

/// Shorthand for `adjust_saturation(input, 0.0)`.
pub fn desaturate(input: ArrayView3<f32>) -> Result<Array3<f32>> {
    adjust_saturation(input, 0.0)
}

// ============================================================================
// Contrast
// ============================================================================

/// Adjust image contrast around the mean luma of the whole image.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3)
/// * `factor` - 0.0 = flat mean gray, 1.0 = unchanged, > 1.0 = more contrast
///
/// # Returns
/// Contrast-adjusted image, not clamped
pub fn adjust_contrast(input: ArrayView3<f32>, factor: f32) -> Result<Array3<f32>> {
    ensure_rgb(&input)?;
    let mean = mean_luminance(input);
    Ok(input.mapv(|v| v * factor + mean * (1.0 - factor)))
}

// ============================================================================
// Brightness
// ============================================================================

/// Scale every sample by `factor` (0.0 = black, 1.0 = unchanged).
pub fn adjust_brightness(input: ArrayView3<f32>, factor: f32) -> Result<Array3<f32>> {
    if factor < 0.0 {
        return Err(FilterError::invalid(
            "brightness",
            format!("must be non-negative, got {factor}"),
        ));
    }
    Ok(input.mapv(|v| v * factor))
}

// ============================================================================
// Gamma
// ============================================================================

/// Apply the power law `v ^ gamma` to every sample.
///
/// # Arguments
/// * `input` - Image (height, width, channels), values 0.0-1.0
/// * `gamma` - Exponent: < 1.0 brightens, > 1.0 darkens, 1.0 = no change
///
/// # Returns
/// Gamma-corrected image; negative inputs map to 0.0
pub fn adjust_gamma(input: ArrayView3<f32>, gamma: f32) -> Result<Array3<f32>> {
    if !(gamma > 0.0) {
        return Err(FilterError::invalid(
            "gamma",
            format!("must be positive, got {gamma}"),
        ));
    }
    Ok(input.mapv(|v| v.max(0.0).powf(gamma)))
}

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors: `v -> 1 - v`.
pub fn invert(input: ArrayView3<f32>) -> Array3<f32> {
    input.mapv(|v| 1.0 - v)
}
