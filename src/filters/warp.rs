//! Perspective warp.
//!
//! The warp is defined by four corner correspondences. Output pixels are
//! inverse-mapped: the homography takes each output pixel center back into
//! the source, where the image is sampled bilinearly. Neighbours that fall
//! outside the source contribute the fill value instead of a pixel, so
//! uncovered regions fade smoothly into `fill`.

use nalgebra::{Matrix3, SMatrix, SVector};
use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{FilterError, Result};

/// Four `(x, y)` corners, in pixel units.
pub type Quad = [[f32; 2]; 4];

/// Solve for the homography taking `from` corners onto `to` corners.
///
/// The result is normalized so its bottom-right entry is 1.
///
/// # Errors
/// `InvalidParameter` when the correspondences are degenerate (three
/// collinear corners, repeated corners).
pub fn perspective_coefficients(from: &Quad, to: &Quad) -> Result<Matrix3<f64>> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for i in 0..4 {
        let (x, y) = (from[i][0] as f64, from[i][1] as f64);
        let (u, v) = (to[i][0] as f64, to[i][1] as f64);

        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }

    let h = a
        .lu()
        .solve(&b)
        .filter(|h| h.iter().all(|v| v.is_finite()))
        .ok_or_else(|| FilterError::invalid("quad", "corner correspondences are degenerate"))?;

    Ok(Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0))
}

#[inline]
fn transform_point(m: &Matrix3<f64>, x: f64, y: f64) -> Option<(f64, f64)> {
    let w = m[(2, 0)] * x + m[(2, 1)] * y + m[(2, 2)];
    if w.abs() < 1e-12 {
        return None;
    }
    Some((
        (m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)]) / w,
        (m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)]) / w,
    ))
}

#[inline]
fn sample_or_fill(input: &ArrayView3<f32>, x: isize, y: isize, c: usize, fill: f32) -> f32 {
    let (height, width, _) = input.dim();
    if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
        fill
    } else {
        input[[y as usize, x as usize, c]]
    }
}

/// Warp an image so that `src_quad` corners land on `dst_quad` corners.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `src_quad` - Corners in the source image
/// * `dst_quad` - Where those corners end up in the output
/// * `fill` - Value used for samples outside the source
///
/// # Returns
/// Warped image with the input's dimensions
pub fn perspective_warp(
    input: ArrayView3<f32>,
    src_quad: &Quad,
    dst_quad: &Quad,
    fill: f32,
) -> Result<Array3<f32>> {
    // Inverse map: output coordinates back to source coordinates
    let matrix = perspective_coefficients(dst_quad, src_quad)?;
    let (height, width, channels) = input.dim();
    let mut output = Array3::<f32>::zeros((height, width, channels));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let Some((sx, sy)) = transform_point(&matrix, x as f64 + 0.5, y as f64 + 0.5)
                else {
                    for c in 0..channels {
                        row[[x, c]] = fill;
                    }
                    continue;
                };

                // Back from pixel-center coordinates to sample indices
                let fx = (sx - 0.5) as f32;
                let fy = (sy - 0.5) as f32;
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = fx - x0;
                let ty = fy - y0;
                let (x0, y0) = (x0 as isize, y0 as isize);

                for c in 0..channels {
                    let v00 = sample_or_fill(&input, x0, y0, c, fill);
                    let v10 = sample_or_fill(&input, x0 + 1, y0, c, fill);
                    let v01 = sample_or_fill(&input, x0, y0 + 1, c, fill);
                    let v11 = sample_or_fill(&input, x0 + 1, y0 + 1, c, fill);

                    let v0 = v00 * (1.0 - tx) + v10 * tx;
                    let v1 = v01 * (1.0 - tx) + v11 * tx;
                    row[[x, c]] = v0 * (1.0 - ty) + v1 * ty;
                }
            }
        });

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(w: f32, h: f32) -> Quad {
        [[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]]
    }

    #[test]
    fn test_coefficients_identity() {
        let quad = corners(10.0, 8.0);

        let m = perspective_coefficients(&quad, &quad).unwrap();

        assert!((m - Matrix3::identity()).amax() < 1e-9);
    }

    #[test]
    fn test_coefficients_map_corners() {
        let from = corners(10.0, 10.0);
        let to = [[1.0, 0.5], [9.0, 1.0], [10.5, 9.0], [-0.5, 10.0]];

        let m = perspective_coefficients(&from, &to).unwrap();

        for i in 0..4 {
            let (u, v) = transform_point(&m, from[i][0] as f64, from[i][1] as f64).unwrap();
            assert!((u - to[i][0] as f64).abs() < 1e-6);
            assert!((v - to[i][1] as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_quad_rejected() {
        let from = corners(10.0, 10.0);
        let collapsed = [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]];

        assert!(perspective_coefficients(&from, &collapsed).is_err());
    }

    #[test]
    fn test_identity_warp_preserves_image() {
        let img = Array3::from_shape_fn((6, 7, 3), |(y, x, c)| ((y * 7 + x + c) % 5) as f32 / 4.0);
        let quad = corners(7.0, 6.0);

        let result = perspective_warp(img.view(), &quad, &quad, 0.5).unwrap();

        for (a, b) in img.iter().zip(result.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_shrunk_quad_exposes_fill() {
        let img = Array3::<f32>::zeros((20, 20, 3));
        let src = corners(20.0, 20.0);
        let dst = [[5.0, 5.0], [15.0, 5.0], [15.0, 15.0], [5.0, 15.0]];

        let result = perspective_warp(img.view(), &src, &dst, 0.5).unwrap();

        // Outside the shrunk image only fill remains
        assert!((result[[0, 0, 0]] - 0.5).abs() < 1e-6);
        assert!((result[[19, 19, 2]] - 0.5).abs() < 1e-6);
        // The middle still shows the (black) source
        assert!(result[[10, 10, 1]].abs() < 1e-6);
    }
}
