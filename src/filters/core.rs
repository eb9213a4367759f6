//! Core utilities shared by the primitive operations.
//!
//! This module provides:
//! - Shape checks (RGB layout, matching operands)
//! - Linear and mask-driven blending
//! - Gaussian kernel generation
//! - The final clamp every look ends with

use ndarray::{Array3, ArrayView2, ArrayView3, Zip};

use crate::error::{FilterError, Result};

/// Reject anything that is not a non-empty `(height, width, 3)` array.
pub fn ensure_rgb(input: &ArrayView3<f32>) -> Result<()> {
    let (height, width, channels) = input.dim();
    if channels != 3 {
        return Err(FilterError::ChannelCount(channels));
    }
    if height == 0 || width == 0 {
        return Err(FilterError::EmptyImage);
    }
    Ok(())
}

/// Both operands of a blend must have identical shapes.
pub fn ensure_same_dim(a: &ArrayView3<f32>, b: &ArrayView3<f32>) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(FilterError::DimensionMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(())
}

fn ensure_mask_dim(image: &ArrayView3<f32>, mask: &ArrayView2<f32>) -> Result<()> {
    let (height, width, channels) = image.dim();
    let (mh, mw) = mask.dim();
    if (mh, mw) != (height, width) {
        return Err(FilterError::DimensionMismatch {
            left: (height, width, channels),
            right: (mh, mw, 1),
        });
    }
    Ok(())
}

/// Clamp every sample into `[0, 1]`.
pub fn clamp_unit(input: ArrayView3<f32>) -> Array3<f32> {
    input.mapv(|v| v.clamp(0.0, 1.0))
}

/// Per-sample linear interpolation `a * (1 - t) + b * t`.
///
/// # Arguments
/// * `a` - Image returned at `t = 0`
/// * `b` - Image returned at `t = 1`, same shape as `a`
/// * `t` - Blend weight, not clamped
pub fn lerp(a: ArrayView3<f32>, b: ArrayView3<f32>, t: f32) -> Result<Array3<f32>> {
    ensure_same_dim(&a, &b)?;
    Ok(Zip::from(&a)
        .and(&b)
        .map_collect(|&x, &y| x * (1.0 - t) + y * t))
}

/// Blend two images with a per-pixel weight: `a * mask + b * (1 - mask)`.
///
/// The single-channel mask is broadcast across all channels.
pub fn masked_blend(
    a: ArrayView3<f32>,
    b: ArrayView3<f32>,
    mask: ArrayView2<f32>,
) -> Result<Array3<f32>> {
    ensure_same_dim(&a, &b)?;
    ensure_mask_dim(&a, &mask)?;

    let (height, width, channels) = a.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let m = mask[[y, x]];
            for c in 0..channels {
                output[[y, x, c]] = a[[y, x, c]] * m + b[[y, x, c]] * (1.0 - m);
            }
        }
    }
    Ok(output)
}

/// Multiply every channel by a single-channel mask.
pub fn apply_mask(input: ArrayView3<f32>, mask: ArrayView2<f32>) -> Result<Array3<f32>> {
    ensure_mask_dim(&input, &mask)?;

    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let m = mask[[y, x]];
            for c in 0..channels {
                output[[y, x, c]] = input[[y, x, c]] * m;
            }
        }
    }
    Ok(output)
}

/// Generate a normalized 1D Gaussian kernel.
///
/// Taps sit at `-(size-1)/2 ..= (size-1)/2`.
///
/// # Arguments
/// * `size` - Odd, positive number of taps
/// * `sigma` - Standard deviation, must be positive
///
/// # Returns
/// Kernel whose taps sum to 1
pub fn gaussian_kernel_1d(size: usize, sigma: f32) -> Result<Vec<f32>> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::invalid(
            "kernel_size",
            format!("must be odd and positive, got {size}"),
        ));
    }
    if !(sigma > 0.0) {
        return Err(FilterError::invalid(
            "sigma",
            format!("must be positive, got {sigma}"),
        ));
    }

    let half = (size / 2) as f32;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = (i as f32 - half) / sigma;
            (-0.5 * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    Ok(kernel)
}
