//! Graphic looks with a reduced palette: duotone, posterize pop, inverted
//! mono with grain.

use ndarray::{Array3, ArrayView3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::FilterKind;
use crate::error::Result;
use crate::filters::stylize::{first_channel, gradient_map};
use crate::filters::{
    add_gaussian_noise, autocontrast, clamp_unit, desaturate, equalize, invert, normalize_range,
    posterize,
};
use crate::params::FilterParams;

/// Two-color tint of the equalized gray image.
pub fn duotone(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::Duotone(p) = params else {
        return Err(params.mismatch(FilterKind::Duotone));
    };

    let gray = desaturate(input)?;
    let gray = equalize(gray.view());
    let gray = normalize_range(gray.view());

    let tinted = gradient_map(first_channel(gray.view()).view(), p.shadow_color, p.highlight_color);
    Ok(clamp_unit(tinted.view()))
}

/// Flat pop-art color: stretch then drop to a few levels per channel.
pub fn posterize_pop(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::PosterizePop(p) = params else {
        return Err(params.mismatch(FilterKind::PosterizePop));
    };

    let result = autocontrast(input);
    let result = posterize(result.view(), p.bits)?;
    Ok(clamp_unit(result.view()))
}

/// Negative in black and white with film grain.
pub fn invert_mono_grain(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::InvertMonoGrain(p) = params else {
        return Err(params.mismatch(FilterKind::InvertMonoGrain));
    };

    let result = invert(input);
    let result = desaturate(result.view())?;

    let mut rng = StdRng::seed_from_u64(p.seed);
    let result = add_gaussian_noise(result.view(), p.grain_std * p.grain_intensity, true, &mut rng)?;
    Ok(clamp_unit(result.view()))
}
