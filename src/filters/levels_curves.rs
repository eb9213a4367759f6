//! Tonal range filters: Autocontrast, Equalize, Normalize.
//!
//! Autocontrast and normalize work directly on f32 samples. Equalize goes
//! through the 8-bit domain (see [`super::grayscale`]) because the histogram
//! is built over 256 discrete levels.

use ndarray::{Array3, ArrayView3};

use super::grayscale::{dequantize_u8, quantize_u8};

// ============================================================================
// Autocontrast
// ============================================================================

/// Stretch each channel's observed range to 0.0-1.0.
///
/// A channel whose minimum equals its maximum is returned unchanged.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
///
/// # Returns
/// Stretched image, clamped to 0.0-1.0
pub fn autocontrast(input: ArrayView3<f32>) -> Array3<f32> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for c in 0..channels {
        let mut low = f32::INFINITY;
        let mut high = f32::NEG_INFINITY;
        for y in 0..height {
            for x in 0..width {
                let v = input[[y, x, c]];
                low = low.min(v);
                high = high.max(v);
            }
        }

        let (offset, scale) = if high > low {
            (low, 1.0 / (high - low))
        } else {
            (0.0, 1.0)
        };

        for y in 0..height {
            for x in 0..width {
                let v = input[[y, x, c]];
                output[[y, x, c]] = ((v - offset) * scale).clamp(0.0, 1.0);
            }
        }
    }

    output
}

// ============================================================================
// Equalize
// ============================================================================

/// Compute histogram for a channel of an 8-bit image.
fn compute_histogram_u8(input: &Array3<u8>, channel: usize) -> [u32; 256] {
    let (height, width, _) = input.dim();
    let mut hist = [0u32; 256];

    for y in 0..height {
        for x in 0..width {
            let v = input[[y, x, channel]] as usize;
            hist[v] += 1;
        }
    }
    hist
}

/// Build the equalization lookup table for one channel histogram.
///
/// Returns `None` when the channel should pass through unchanged: a single
/// occupied level, or too few samples for a non-zero step.
fn equalize_lut(hist: &[u32; 256]) -> Option<[u8; 256]> {
    let occupied: Vec<u32> = hist.iter().copied().filter(|&n| n > 0).collect();
    if occupied.len() <= 1 {
        return None;
    }

    let total: u32 = occupied.iter().sum();
    let last = occupied[occupied.len() - 1];
    let step = (total - last) / 255;
    if step == 0 {
        return None;
    }

    let mut lut = [0u8; 256];
    let mut cumulative = 0u32;
    // lut[i] uses the count strictly below level i
    for i in 1..256 {
        cumulative += hist[i - 1];
        lut[i] = ((cumulative + step / 2) / step).min(255) as u8;
    }
    Some(lut)
}

/// Histogram-equalize each channel independently.
///
/// Samples are quantized to 0-255, remapped through the cumulative
/// histogram, then dequantized. The mapping is monotonic non-decreasing
/// per channel.
///
/// # Arguments
/// * `input` - Image (height, width, channels), values 0.0-1.0
///
/// # Returns
/// Equalized image on the 8-bit grid
pub fn equalize(input: ArrayView3<f32>) -> Array3<f32> {
    let quantized = input.mapv(quantize_u8);
    let (height, width, channels) = quantized.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for c in 0..channels {
        let hist = compute_histogram_u8(&quantized, c);
        let lut = equalize_lut(&hist);

        for y in 0..height {
            for x in 0..width {
                let q = quantized[[y, x, c]];
                let mapped = match &lut {
                    Some(lut) => lut[q as usize],
                    None => q,
                };
                output[[y, x, c]] = dequantize_u8(mapped);
            }
        }
    }

    output
}

// ============================================================================
// Normalize
// ============================================================================

/// Rescale the whole image (all channels together) so its minimum maps to
/// 0.0 and its maximum to 1.0.
///
/// A constant image has no range to stretch and maps to all zeros.
pub fn normalize_range(input: ArrayView3<f32>) -> Array3<f32> {
    let low = input.iter().copied().fold(f32::INFINITY, f32::min);
    let high = input.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if !(high > low) {
        return Array3::<f32>::zeros(input.dim());
    }

    let range = high - low;
    input.mapv(|v| (v - low) / range)
}
