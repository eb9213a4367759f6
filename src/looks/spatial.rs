//! Looks driven by pixel position: tilt-shift, vignette, perspective glitch.

use ndarray::{Array3, ArrayView3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::FilterKind;
use crate::error::Result;
use crate::filters::{
    adjust_brightness, adjust_contrast, apply_mask, clamp_unit, gaussian_blur, masked_blend,
    perspective_warp, radial_mask, vertical_focus_mask, Quad,
};
use crate::params::{FilterParams, GlitchParams};

/// Gray shown where the warped image no longer covers the frame.
const GLITCH_FILL: f32 = 0.5;

/// Miniature effect: a sharp horizontal band, blurred above and below.
pub fn tiltshift(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::Tiltshift(p) = params else {
        return Err(params.mismatch(FilterKind::Tiltshift));
    };

    let (height, width, _) = input.dim();
    let focus_rows = (height as f32 * p.focus_height).floor() as usize;
    let feather_rows = (height as f32 * p.feather).floor() as usize;
    let mask = vertical_focus_mask(height, width, focus_rows, feather_rows);

    let blurred = gaussian_blur(input, p.blur_kernel, p.blur_sigma)?;
    let result = masked_blend(input, blurred.view(), mask.view())?;
    Ok(clamp_unit(result.view()))
}

/// Soft radial darkening toward the corners.
pub fn vignette_soft(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::VignetteSoft(p) = params else {
        return Err(params.mismatch(FilterKind::VignetteSoft));
    };

    let (height, width, _) = input.dim();
    let mask = radial_mask(height, width, p.radius, p.softness, p.darkness)?;
    let result = apply_mask(input, mask.view())?;
    Ok(clamp_unit(result.view()))
}

/// Everything the glitch look draws from its random source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchDraws {
    /// `(dx, dy)` per corner, in the order top-left, top-right,
    /// bottom-right, bottom-left
    pub offsets: Quad,
    pub brightness: f32,
    pub contrast: f32,
}

/// Draw the corner offsets and the two jitter factors for an image of the
/// given size. All draws come from one generator seeded with `params.seed`.
pub fn glitch_draws(width: usize, height: usize, params: &GlitchParams) -> GlitchDraws {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let (w, h) = (width as f32, height as f32);

    let mut offsets = [[0.0f32; 2]; 4];
    for corner in offsets.iter_mut() {
        corner[0] = (rng.gen::<f32>() - 0.5) * 2.0 * params.distortion_scale * w;
        corner[1] = (rng.gen::<f32>() - 0.5) * 2.0 * params.distortion_scale * h;
    }

    let brightness = 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * params.brightness_jitter;
    let contrast = 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * params.contrast_jitter;

    GlitchDraws {
        offsets,
        brightness,
        contrast,
    }
}

/// Analog-glitch look: a seeded perspective skew with slight exposure and
/// contrast jitter.
pub fn glitch_perspective(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::GlitchPerspective(p) = params else {
        return Err(params.mismatch(FilterKind::GlitchPerspective));
    };

    let (height, width, _) = input.dim();
    let draws = glitch_draws(width, height, p);
    tracing::debug!(
        offsets = ?draws.offsets,
        brightness = draws.brightness,
        contrast = draws.contrast,
        "glitch draws"
    );

    let (w, h) = (width as f32, height as f32);
    let src: Quad = [[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]];
    let mut dst = src;
    for (corner, offset) in dst.iter_mut().zip(draws.offsets.iter()) {
        corner[0] += offset[0];
        corner[1] += offset[1];
    }

    let result = perspective_warp(input, &src, &dst, GLITCH_FILL)?;
    let result = adjust_brightness(result.view(), draws.brightness)?;
    // Contrast pivots on mean luma, which must come from in-range samples
    let result = clamp_unit(result.view());
    let result = adjust_contrast(result.view(), draws.contrast)?;
    Ok(clamp_unit(result.view()))
}
