//! Image decoding and encoding.
//!
//! Any format the `image` crate can decode is accepted and converted to an
//! RGB f32 array. Results are written as baseline JPEG.

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::filters::core::ensure_rgb;
use crate::filters::grayscale::{dequantize_u8, quantize_u8};

/// JPEG quality used for every output file.
pub const JPEG_QUALITY: u8 = 92;

/// Load an image from disk as a `(height, width, 3)` f32 array in 0.0-1.0.
///
/// Alpha is dropped; grayscale and palette images are expanded to RGB.
pub fn load_image(path: &Path) -> Result<Array3<f32>> {
    let img = image::open(path).map_err(|source| FilterError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage);
    }

    Ok(Array3::from_shape_fn(
        (height as usize, width as usize, 3),
        |(y, x, c)| dequantize_u8(rgb.get_pixel(x as u32, y as u32)[c]),
    ))
}

/// Quantize a float image into an 8-bit RGB buffer.
pub fn to_rgb_image(image: ArrayView3<f32>) -> Result<RgbImage> {
    ensure_rgb(&image)?;
    let (height, width, _) = image.dim();

    Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([
            quantize_u8(image[[y, x, 0]]),
            quantize_u8(image[[y, x, 1]]),
            quantize_u8(image[[y, x, 2]]),
        ])
    }))
}

/// Encode `image` as JPEG at [`JPEG_QUALITY`] and write it to `path`.
///
/// Encoding happens in memory, so a failed encode leaves nothing on disk.
pub fn save_jpeg(image: ArrayView3<f32>, path: &Path) -> Result<()> {
    let rgb = to_rgb_image(image)?;

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|source| FilterError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, &encoded)?;

    tracing::debug!(path = %path.display(), "wrote jpeg");
    Ok(())
}

/// Create the output directory (and parents) if it does not exist yet.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
