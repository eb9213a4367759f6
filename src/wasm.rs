//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and work on
//! the flat RGBA byte layout of a canvas `ImageData`. Alpha is ignored on
//! input and written as 255 on output.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::filters::grayscale::{dequantize_u8, quantize_u8};

fn rgba_to_rgb(data: &[u8], width: usize, height: usize) -> Result<Array3<f32>, JsError> {
    let expected = width * height * 4;
    if data.len() != expected {
        return Err(JsError::new(&format!(
            "expected {expected} bytes for {width}x{height} RGBA, got {}",
            data.len()
        )));
    }
    Ok(Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        dequantize_u8(data[(y * width + x) * 4 + c])
    }))
}

fn rgb_to_rgba(image: &Array3<f32>) -> Vec<u8> {
    let (height, width, _) = image.dim();
    let mut out = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            out.push(quantize_u8(image[[y, x, 0]]));
            out.push(quantize_u8(image[[y, x, 1]]));
            out.push(quantize_u8(image[[y, x, 2]]));
            out.push(255);
        }
    }
    out
}

/// Render a look on an RGBA image.
///
/// # Arguments
/// * `name` - Look name, one of `look_names_wasm()`
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGBA bytes with the look applied
#[wasm_bindgen]
pub fn apply_look_rgba_wasm(
    name: &str,
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let input = rgba_to_rgb(data, width, height)?;
    let result = crate::apply_look(name, input.view())?;
    Ok(rgb_to_rgba(&result))
}

/// Names of every look, in pipeline order.
#[wasm_bindgen]
pub fn look_names_wasm() -> Vec<String> {
    crate::look_names().into_iter().map(String::from).collect()
}
