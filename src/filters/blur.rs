//! Gaussian blur.
//!
//! Separable 2-pass convolution. Rows of each pass are processed in
//! parallel with rayon.
//!
//! The border is reflected without repeating the edge sample
//! (`dcb|abcd|cba`), so an image of any size, down to a single pixel,
//! blurs without reading outside its bounds.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, Axis};

use super::core::gaussian_kernel_1d;
use crate::error::Result;

/// Map a possibly out-of-range coordinate back inside `0..n` by reflection
/// about the edge samples.
#[inline]
pub fn reflect101(coord: isize, n: usize) -> usize {
    let n = n as isize;
    if n == 1 {
        return 0;
    }
    let period = 2 * n - 2;
    let mut c = coord.rem_euclid(period);
    if c >= n {
        c = period - c;
    }
    c as usize
}

/// Apply Gaussian blur.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Odd, positive number of taps
/// * `sigma` - Standard deviation of the Gaussian, must be positive
///
/// # Returns
/// Blurred image with the same dimensions
pub fn gaussian_blur(input: ArrayView3<f32>, kernel_size: usize, sigma: f32) -> Result<Array3<f32>> {
    let kernel = gaussian_kernel_1d(kernel_size, sigma)?;
    let half = (kernel.len() / 2) as isize;
    let (height, width, channels) = input.dim();

    let mut temp = Array3::<f32>::zeros((height, width, channels));
    let mut result = Array3::<f32>::zeros((height, width, channels));

    // Horizontal pass
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sx = reflect101(x as isize + ki as isize - half, width);
                        sum += input[[y, sx, c]] * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Vertical pass
    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = reflect101(y as isize + ki as isize - half, height);
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect101_mapping() {
        // dcb|abcd|cba
        assert_eq!(reflect101(-1, 4), 1);
        assert_eq!(reflect101(-3, 4), 3);
        assert_eq!(reflect101(4, 4), 2);
        assert_eq!(reflect101(6, 4), 0);
        assert_eq!(reflect101(2, 4), 2);
        assert_eq!(reflect101(-5, 1), 0);
    }

    #[test]
    fn test_blur_preserves_flat_image() {
        let img = Array3::<f32>::from_elem((7, 9, 3), 0.42);

        let result = gaussian_blur(img.view(), 5, 1.0).unwrap();

        for &v in result.iter() {
            assert!((v - 0.42).abs() < 1e-5);
        }
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let mut img = Array3::<f32>::zeros((9, 9, 3));
        img[[4, 4, 1]] = 1.0;

        let result = gaussian_blur(img.view(), 5, 1.0).unwrap();

        assert!(result[[4, 4, 1]] < 1.0);
        assert!(result[[4, 5, 1]] > 0.0);
        assert!(result[[5, 4, 1]] > 0.0);
        assert_eq!(result[[4, 4, 0]], 0.0);
        // Mass is conserved away from the border
        let total: f32 = result.index_axis(Axis(2), 1).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_blur_kernel_larger_than_image() {
        let img = Array3::from_shape_fn((2, 3, 3), |(y, x, _)| (y + x) as f32 / 3.0);

        let result = gaussian_blur(img.view(), 15, 3.0).unwrap();

        assert_eq!(result.dim(), (2, 3, 3));
        assert!(result.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_blur_rejects_even_kernel() {
        let img = Array3::<f32>::zeros((4, 4, 3));

        assert!(gaussian_blur(img.view(), 4, 1.0).is_err());
        assert!(gaussian_blur(img.view(), 5, -1.0).is_err());
    }
}
