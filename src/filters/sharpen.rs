//! Sharpness adjustment.
//!
//! Blends the image with a softened copy of itself: factors above 1.0
//! push away from the soft copy (unsharp-mask style), factors below 1.0
//! move toward it.
//!
//! The soft copy uses the 3x3 smoothing kernel
//!
//! ```text
//! 1 1 1
//! 1 5 1   / 13
//! 1 1 1
//! ```
//!
//! and keeps the outermost row and column from the source, so the image
//! border is never altered.

use ndarray::{Array3, ArrayView3};

use crate::error::Result;

const CENTER_WEIGHT: f32 = 5.0;
const KERNEL_SUM: f32 = 13.0;

/// 3x3 smoothed copy with the one-pixel border copied from the input.
pub fn smooth_3x3(input: ArrayView3<f32>) -> Array3<f32> {
    let (height, width, channels) = input.dim();
    let mut output = input.to_owned();

    if height < 3 || width < 3 {
        return output;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for dy in 0..3 {
                    for dx in 0..3 {
                        sum += input[[y + dy - 1, x + dx - 1, c]];
                    }
                }
                // Center already counted once above
                sum += input[[y, x, c]] * (CENTER_WEIGHT - 1.0);
                output[[y, x, c]] = sum / KERNEL_SUM;
            }
        }
    }

    output
}

/// Adjust image sharpness.
///
/// # Arguments
/// * `input` - Image (height, width, channels), values 0.0-1.0
/// * `factor` - 0.0 = smoothed copy, 1.0 = unchanged, > 1.0 = sharper
///
/// # Returns
/// `v * factor + smooth * (1 - factor)`, not clamped
pub fn adjust_sharpness(input: ArrayView3<f32>, factor: f32) -> Result<Array3<f32>> {
    let smooth = smooth_3x3(input);
    let mut output = smooth;

    ndarray::Zip::from(&mut output)
        .and(&input)
        .for_each(|s, &v| *s = v * factor + *s * (1.0 - factor));

    Ok(output)
}
