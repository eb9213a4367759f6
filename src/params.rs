//! Baked-in parameter records for every look.
//!
//! The table is built once with [`ParameterTable::builtin`] and handed by
//! reference to each look. It is never mutated after construction; the
//! builder-style [`ParameterTable::with`] and [`ParameterTable::without`]
//! consume the table and return a new one.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FilterError, Result};
use crate::looks::FilterKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BleachBypassParams {
    pub saturation: f32,
    pub contrast: f32,
    pub sharpness: f32,
    /// Weight of the desaturated branch in the final blend
    pub blend_mix: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuotoneParams {
    pub highlight_color: [f32; 3],
    pub shadow_color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TealOrangeParams {
    pub contrast: f32,
    pub saturation: f32,
    pub hue_shift: f32,
    pub gamma: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterizeParams {
    pub bits: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DramaticHdrParams {
    pub sharpness: f32,
    pub gamma: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltshiftParams {
    pub blur_kernel: usize,
    pub blur_sigma: f32,
    /// Sharp band height as a fraction of the image height
    pub focus_height: f32,
    /// Ramp height as a fraction of the image height
    pub feather: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteParams {
    pub radius: f32,
    pub softness: f32,
    pub darkness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchParams {
    pub distortion_scale: f32,
    pub brightness_jitter: f32,
    pub contrast_jitter: f32,
    /// Seeds the corner offsets and both jitter draws
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainParams {
    pub grain_intensity: f32,
    pub grain_std: f32,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftPastelParams {
    pub saturation: f32,
    pub blur_kernel: usize,
    pub blur_sigma: f32,
    pub gamma: f32,
}

/// One look's parameter record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParams {
    BleachBypass(BleachBypassParams),
    Duotone(DuotoneParams),
    TealOrangeBoost(TealOrangeParams),
    PosterizePop(PosterizeParams),
    DramaticHdrish(DramaticHdrParams),
    Tiltshift(TiltshiftParams),
    VignetteSoft(VignetteParams),
    GlitchPerspective(GlitchParams),
    InvertMonoGrain(GrainParams),
    SoftPastel(SoftPastelParams),
}

impl FilterParams {
    /// The look this record belongs to.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterParams::BleachBypass(_) => FilterKind::BleachBypass,
            FilterParams::Duotone(_) => FilterKind::Duotone,
            FilterParams::TealOrangeBoost(_) => FilterKind::TealOrangeBoost,
            FilterParams::PosterizePop(_) => FilterKind::PosterizePop,
            FilterParams::DramaticHdrish(_) => FilterKind::DramaticHdrish,
            FilterParams::Tiltshift(_) => FilterKind::Tiltshift,
            FilterParams::VignetteSoft(_) => FilterKind::VignetteSoft,
            FilterParams::GlitchPerspective(_) => FilterKind::GlitchPerspective,
            FilterParams::InvertMonoGrain(_) => FilterKind::InvertMonoGrain,
            FilterParams::SoftPastel(_) => FilterKind::SoftPastel,
        }
    }

    /// Error for a look handed a record that belongs to another look.
    pub(crate) fn mismatch(&self, expected: FilterKind) -> FilterError {
        FilterError::ParameterMismatch {
            filter: expected.name(),
            found: self.kind().name(),
        }
    }
}

impl fmt::Display for FilterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterParams::BleachBypass(p) => write!(
                f,
                "saturation={} contrast={} sharpness={} blend_mix={}",
                p.saturation, p.contrast, p.sharpness, p.blend_mix
            ),
            FilterParams::Duotone(p) => write!(
                f,
                "highlight_color={:?} shadow_color={:?}",
                p.highlight_color, p.shadow_color
            ),
            FilterParams::TealOrangeBoost(p) => write!(
                f,
                "contrast={} saturation={} hue_shift={} gamma={}",
                p.contrast, p.saturation, p.hue_shift, p.gamma
            ),
            FilterParams::PosterizePop(p) => write!(f, "bits={}", p.bits),
            FilterParams::DramaticHdrish(p) => {
                write!(f, "sharpness={} gamma={}", p.sharpness, p.gamma)
            }
            FilterParams::Tiltshift(p) => write!(
                f,
                "blur_kernel={} blur_sigma={} focus_height={} feather={}",
                p.blur_kernel, p.blur_sigma, p.focus_height, p.feather
            ),
            FilterParams::VignetteSoft(p) => write!(
                f,
                "radius={} softness={} darkness={}",
                p.radius, p.softness, p.darkness
            ),
            FilterParams::GlitchPerspective(p) => write!(
                f,
                "distortion_scale={} brightness_jitter={} contrast_jitter={} seed={}",
                p.distortion_scale, p.brightness_jitter, p.contrast_jitter, p.seed
            ),
            FilterParams::InvertMonoGrain(p) => write!(
                f,
                "grain_intensity={} grain_std={} seed={}",
                p.grain_intensity, p.grain_std, p.seed
            ),
            FilterParams::SoftPastel(p) => write!(
                f,
                "saturation={} blur_kernel={} blur_sigma={} gamma={}",
                p.saturation, p.blur_kernel, p.blur_sigma, p.gamma
            ),
        }
    }
}

/// Immutable mapping from look to parameter record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterTable {
    entries: BTreeMap<FilterKind, FilterParams>,
}

impl ParameterTable {
    /// The table every look ships with.
    pub fn builtin() -> Self {
        let records = [
            FilterParams::BleachBypass(BleachBypassParams {
                saturation: 0.0,
                contrast: 1.3,
                sharpness: 1.2,
                blend_mix: 0.6,
            }),
            FilterParams::Duotone(DuotoneParams {
                highlight_color: [0.5, 0.0, 0.8],
                shadow_color: [1.0, 0.6, 0.0],
            }),
            FilterParams::TealOrangeBoost(TealOrangeParams {
                contrast: 1.2,
                saturation: 1.2,
                hue_shift: 0.02,
                gamma: 0.95,
            }),
            FilterParams::PosterizePop(PosterizeParams { bits: 4 }),
            FilterParams::DramaticHdrish(DramaticHdrParams {
                sharpness: 1.8,
                gamma: 0.9,
            }),
            FilterParams::Tiltshift(TiltshiftParams {
                blur_kernel: 15,
                blur_sigma: 3.0,
                focus_height: 0.3,
                feather: 0.2,
            }),
            FilterParams::VignetteSoft(VignetteParams {
                radius: 0.8,
                softness: 0.3,
                darkness: 0.4,
            }),
            FilterParams::GlitchPerspective(GlitchParams {
                distortion_scale: 0.3,
                brightness_jitter: 0.1,
                contrast_jitter: 0.1,
                seed: 42,
            }),
            FilterParams::InvertMonoGrain(GrainParams {
                grain_intensity: 0.05,
                grain_std: 0.1,
                seed: 7,
            }),
            FilterParams::SoftPastel(SoftPastelParams {
                saturation: 1.15,
                blur_kernel: 5,
                blur_sigma: 1.0,
                gamma: 1.05,
            }),
        ];

        records.into_iter().fold(Self::default(), Self::with)
    }

    /// Insert or replace the record for `params.kind()`.
    pub fn with(mut self, params: FilterParams) -> Self {
        self.entries.insert(params.kind(), params);
        self
    }

    /// Drop the record for `kind`.
    pub fn without(mut self, kind: FilterKind) -> Self {
        self.entries.remove(&kind);
        self
    }

    /// Look up the record for `kind`.
    ///
    /// # Errors
    /// `MissingParameters` if the table has no entry for `kind`.
    pub fn get(&self, kind: FilterKind) -> Result<&FilterParams> {
        self.entries
            .get(&kind)
            .ok_or(FilterError::MissingParameters(kind.name()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &FilterParams)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}
