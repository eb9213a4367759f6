//! Luminance and 8-bit domain conversions.
//!
//! Uses ITU-R BT.601 luma coefficients, the weights every saturation,
//! contrast and desaturation step in this crate is defined against.
//!
//! ## 8-bit Domain
//!
//! `equalize` and `posterize` work on discrete 0-255 levels. The round trip
//! is explicit:
//! - **quantize**: clamp to 0.0-1.0, scale by 255, round half up
//! - **dequantize**: divide by 255
//!
//! so a value survives `dequantize(quantize(v))` with an error of at most
//! 1/510.

use ndarray::{Array2, Array3, ArrayView3};

/// ITU-R BT.601 luma coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Luma of a single RGB triple.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Per-pixel luma plane of an RGB image.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 3)
///
/// # Returns
/// 2D array of shape (height, width)
pub fn luminance(input: ArrayView3<f32>) -> Array2<f32> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<f32>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
        }
    }

    output
}

/// Mean luma over the whole image, 0.0 for an empty image.
pub fn mean_luminance(input: ArrayView3<f32>) -> f32 {
    luminance(input).mean().unwrap_or(0.0)
}

// ============================================================================
// 8-bit Domain
// ============================================================================

/// Quantize one sample into the 8-bit domain (round half up).
#[inline]
pub fn quantize_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
}

/// Map an 8-bit level back to 0.0-1.0.
#[inline]
pub fn dequantize_u8(q: u8) -> f32 {
    q as f32 / 255.0
}

/// Convert u8 image (0-255) to f32 (0.0-1.0)
pub fn u8_to_f32(input: ArrayView3<u8>) -> Array3<f32> {
    input.mapv(dequantize_u8)
}

/// Convert f32 image (0.0-1.0) to u8 (0-255)
pub fn f32_to_u8(input: ArrayView3<f32>) -> Array3<u8> {
    input.mapv(quantize_u8)
}
