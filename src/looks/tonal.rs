//! Tone and color grading looks: bleach bypass, teal & orange, pseudo-HDR,
//! soft pastel.

use ndarray::{Array3, ArrayView3};

use super::FilterKind;
use crate::error::Result;
use crate::filters::{
    adjust_contrast, adjust_gamma, adjust_hue, adjust_saturation, adjust_sharpness, autocontrast,
    clamp_unit, equalize, gaussian_blur, lerp,
};
use crate::params::FilterParams;

/// Cinema-style silver retention.
///
/// A desaturated, stretched, contrast-boosted branch is blended over a
/// sharpened copy of the source.
pub fn bleach_bypass(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::BleachBypass(p) = params else {
        return Err(params.mismatch(FilterKind::BleachBypass));
    };

    let desaturated = adjust_saturation(input, p.saturation)?;
    let desaturated = autocontrast(desaturated.view());
    let desaturated = adjust_contrast(desaturated.view(), p.contrast)?;
    let desaturated = clamp_unit(desaturated.view());

    let sharpened = adjust_sharpness(input, p.sharpness)?;
    let sharpened = clamp_unit(sharpened.view());

    let mixed = lerp(sharpened.view(), desaturated.view(), p.blend_mix)?;
    Ok(clamp_unit(mixed.view()))
}

/// Blockbuster grade: contrast, saturation, a small hue push, gamma.
pub fn teal_orange_boost(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::TealOrangeBoost(p) = params else {
        return Err(params.mismatch(FilterKind::TealOrangeBoost));
    };

    let result = adjust_contrast(input, p.contrast)?;
    let result = clamp_unit(result.view());
    let result = adjust_saturation(result.view(), p.saturation)?;
    // HSV is only meaningful for in-range samples
    let result = clamp_unit(result.view());
    let result = adjust_hue(result.view(), p.hue_shift)?;
    let result = adjust_gamma(result.view(), p.gamma)?;
    Ok(clamp_unit(result.view()))
}

/// Single-shot pseudo-HDR: stretch, sharpen hard, lift midtones.
pub fn dramatic_hdrish(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::DramaticHdrish(p) = params else {
        return Err(params.mismatch(FilterKind::DramaticHdrish));
    };

    let result = autocontrast(input);
    let result = adjust_sharpness(result.view(), p.sharpness)?;
    let result = clamp_unit(result.view());
    let result = adjust_gamma(result.view(), p.gamma)?;
    Ok(clamp_unit(result.view()))
}

/// Washed-out pastel: equalize, boost color, soften, darken slightly.
pub fn soft_pastel(input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    let FilterParams::SoftPastel(p) = params else {
        return Err(params.mismatch(FilterKind::SoftPastel));
    };

    let result = equalize(input);
    let result = adjust_saturation(result.view(), p.saturation)?;
    let result = clamp_unit(result.view());
    let result = gaussian_blur(result.view(), p.blur_kernel, p.blur_sigma)?;
    let result = adjust_gamma(result.view(), p.gamma)?;
    Ok(clamp_unit(result.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        BleachBypassParams, DramaticHdrParams, ParameterTable, SoftPastelParams, TealOrangeParams,
    };

    fn colorful(height: usize, width: usize) -> Array3<f32> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
            0 => x as f32 / (width - 1) as f32,
            1 => y as f32 / (height - 1) as f32,
            _ => 0.3,
        })
    }

    #[test]
    fn test_bleach_bypass_mutes_color() {
        let img = colorful(16, 16);
        let params = FilterParams::BleachBypass(BleachBypassParams {
            saturation: 0.0,
            contrast: 1.3,
            sharpness: 1.0,
            blend_mix: 1.0,
        });

        let result = bleach_bypass(img.view(), &params).unwrap();

        // blend_mix 1.0 keeps only the desaturated branch
        for y in 0..16 {
            for x in 0..16 {
                assert!((result[[y, x, 0]] - result[[y, x, 2]]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_bleach_bypass_zero_mix_is_sharpened_source() {
        let img = colorful(8, 8);
        let params = FilterParams::BleachBypass(BleachBypassParams {
            saturation: 0.0,
            contrast: 1.3,
            sharpness: 1.0,
            blend_mix: 0.0,
        });

        let result = bleach_bypass(img.view(), &params).unwrap();

        for (a, b) in img.iter().zip(result.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    /// Red channel blown out on the right half, dark blue-ish on the left.
    fn blown_highlight(height: usize, width: usize) -> Array3<f32> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
            0 if x > width / 2 => 1.0,
            0 => 0.1,
            1 => 0.3 * y as f32 / (height - 1) as f32,
            _ => 0.15,
        })
    }

    #[test]
    fn test_bleach_bypass_blends_in_range_branches() {
        let img = blown_highlight(24, 32);
        let table = ParameterTable::builtin();
        let FilterParams::BleachBypass(p) = *table.get(FilterKind::BleachBypass).unwrap() else {
            panic!("wrong record");
        };

        let result = bleach_bypass(img.view(), &FilterParams::BleachBypass(p)).unwrap();

        let desaturated = adjust_saturation(img.view(), p.saturation).unwrap();
        let desaturated = autocontrast(desaturated.view());
        let desaturated = clamp_unit(adjust_contrast(desaturated.view(), p.contrast).unwrap().view());
        let sharpened = clamp_unit(adjust_sharpness(img.view(), p.sharpness).unwrap().view());
        let expected = lerp(sharpened.view(), desaturated.view(), p.blend_mix).unwrap();

        for (a, b) in result.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        // Dark blue survives instead of being crushed to black
        assert!(result[[12, 4, 2]] > 0.02);
    }

    #[test]
    fn test_teal_orange_clamps_before_saturation() {
        let img = blown_highlight(16, 16);
        let table = ParameterTable::builtin();
        let FilterParams::TealOrangeBoost(p) = *table.get(FilterKind::TealOrangeBoost).unwrap()
        else {
            panic!("wrong record");
        };

        let result = teal_orange_boost(img.view(), &FilterParams::TealOrangeBoost(p)).unwrap();

        let step = clamp_unit(adjust_contrast(img.view(), p.contrast).unwrap().view());
        let step = clamp_unit(adjust_saturation(step.view(), p.saturation).unwrap().view());
        let step = adjust_hue(step.view(), p.hue_shift).unwrap();
        let expected = clamp_unit(adjust_gamma(step.view(), p.gamma).unwrap().view());

        for (a, b) in result.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_teal_orange_rejects_wide_hue_shift() {
        let img = colorful(4, 4);
        let params = FilterParams::TealOrangeBoost(TealOrangeParams {
            contrast: 1.2,
            saturation: 1.2,
            hue_shift: 0.75,
            gamma: 0.95,
        });

        assert!(teal_orange_boost(img.view(), &params).is_err());
    }

    #[test]
    fn test_dramatic_hdrish_stretches_range() {
        // Low-contrast source squeezed into 0.4-0.6
        let img = colorful(12, 12).mapv(|v| 0.4 + v * 0.2);
        let table = ParameterTable::builtin();

        let result = dramatic_hdrish(img.view(), table.get(FilterKind::DramaticHdrish).unwrap()).unwrap();
        let low = result.iter().copied().fold(f32::INFINITY, f32::min);
        let high = result.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        assert!(low < 0.05);
        assert!(high > 0.95);
    }

    #[test]
    fn test_dramatic_hdrish_rejects_bad_gamma() {
        let img = colorful(4, 4);
        let params = FilterParams::DramaticHdrish(DramaticHdrParams {
            sharpness: 1.8,
            gamma: 0.0,
        });

        assert!(dramatic_hdrish(img.view(), &params).is_err());
    }

    #[test]
    fn test_soft_pastel_rejects_even_kernel() {
        let img = colorful(6, 6);
        let params = FilterParams::SoftPastel(SoftPastelParams {
            saturation: 1.15,
            blur_kernel: 4,
            blur_sigma: 1.0,
            gamma: 1.05,
        });

        assert!(soft_pastel(img.view(), &params).is_err());
    }

    #[test]
    fn test_soft_pastel_is_smooth() {
        let img = Array3::from_shape_fn((16, 16, 3), |(y, x, _)| ((x + y) % 2) as f32);
        let table = ParameterTable::builtin();

        let result = soft_pastel(img.view(), table.get(FilterKind::SoftPastel).unwrap()).unwrap();

        // The checkerboard is blurred well away from pure black and white
        assert!(result[[8, 8, 0]] > 0.1 && result[[8, 8, 0]] < 0.9);
    }
}
