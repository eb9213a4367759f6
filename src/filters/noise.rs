//! Film grain.
//!
//! Gaussian noise drawn from a caller-supplied generator. Callers seed the
//! generator (`StdRng::seed_from_u64`) so a look renders identically on
//! every run.

use ndarray::{Array3, ArrayView3};
use rand::Rng;

use crate::error::{FilterError, Result};

/// Draw one standard normal sample using the Box-Muller transform.
fn next_gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u1 = rng.gen::<f32>().max(1e-10);
    let u2 = rng.gen::<f32>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Add zero-mean Gaussian noise.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `std` - Standard deviation of the noise, must not be negative
/// * `monochrome` - If true, one draw per pixel shared by all channels;
///   if false, independent draws per channel
/// * `rng` - Source of randomness, consumed in row-major pixel order
///
/// # Returns
/// Noisy image, not clamped
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    input: ArrayView3<f32>,
    std: f32,
    monochrome: bool,
    rng: &mut R,
) -> Result<Array3<f32>> {
    if !(std >= 0.0) {
        return Err(FilterError::invalid(
            "grain_std",
            format!("must be non-negative, got {std}"),
        ));
    }

    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            if monochrome {
                let noise = next_gaussian(rng) * std;
                for c in 0..channels {
                    output[[y, x, c]] = input[[y, x, c]] + noise;
                }
            } else {
                for c in 0..channels {
                    output[[y, x, c]] = input[[y, x, c]] + next_gaussian(rng) * std;
                }
            }
        }
    }

    Ok(output)
}
