//! The ten looks.
//!
//! Each look is a fixed composition of primitives from [`crate::filters`]
//! driven by its own parameter record. Every look:
//! - reads the source through a view and never modifies it
//! - keeps the source dimensions
//! - clamps its result to 0.0-1.0 before returning
//! - is deterministic, including the ones that draw random numbers
//!
//! | # | Look | Module |
//! |---|------|--------|
//! | 01 | bleach_bypass | [`tonal`] |
//! | 02 | duotone | [`graphic`] |
//! | 03 | teal_orange_boost | [`tonal`] |
//! | 04 | posterize_pop | [`graphic`] |
//! | 05 | dramatic_hdrish | [`tonal`] |
//! | 06 | tiltshift | [`spatial`] |
//! | 07 | vignette_soft | [`spatial`] |
//! | 08 | glitch_perspective | [`spatial`] |
//! | 09 | invert_mono_grain | [`graphic`] |
//! | 10 | soft_pastel | [`tonal`] |

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};
use crate::filters::core::ensure_rgb;
use crate::params::{FilterParams, ParameterTable};

pub mod graphic;
pub mod spatial;
pub mod tonal;

/// Identifies one look. Declaration order is pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKind {
    BleachBypass,
    Duotone,
    TealOrangeBoost,
    PosterizePop,
    DramaticHdrish,
    Tiltshift,
    VignetteSoft,
    GlitchPerspective,
    InvertMonoGrain,
    SoftPastel,
}

impl FilterKind {
    /// Every look, in pipeline order.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::BleachBypass,
        FilterKind::Duotone,
        FilterKind::TealOrangeBoost,
        FilterKind::PosterizePop,
        FilterKind::DramaticHdrish,
        FilterKind::Tiltshift,
        FilterKind::VignetteSoft,
        FilterKind::GlitchPerspective,
        FilterKind::InvertMonoGrain,
        FilterKind::SoftPastel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::BleachBypass => "bleach_bypass",
            FilterKind::Duotone => "duotone",
            FilterKind::TealOrangeBoost => "teal_orange_boost",
            FilterKind::PosterizePop => "posterize_pop",
            FilterKind::DramaticHdrish => "dramatic_hdrish",
            FilterKind::Tiltshift => "tiltshift",
            FilterKind::VignetteSoft => "vignette_soft",
            FilterKind::GlitchPerspective => "glitch_perspective",
            FilterKind::InvertMonoGrain => "invert_mono_grain",
            FilterKind::SoftPastel => "soft_pastel",
        }
    }

    /// 1-based position in the pipeline, used for output file prefixes.
    pub fn index(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// Render one look.
///
/// # Errors
/// - `ChannelCount` / `EmptyImage` for input that is not a non-empty RGB image
/// - `ParameterMismatch` when `params` belongs to another look
/// - whatever the look's primitives reject
pub fn apply(kind: FilterKind, input: ArrayView3<f32>, params: &FilterParams) -> Result<Array3<f32>> {
    ensure_rgb(&input)?;

    match kind {
        FilterKind::BleachBypass => tonal::bleach_bypass(input, params),
        FilterKind::Duotone => graphic::duotone(input, params),
        FilterKind::TealOrangeBoost => tonal::teal_orange_boost(input, params),
        FilterKind::PosterizePop => graphic::posterize_pop(input, params),
        FilterKind::DramaticHdrish => tonal::dramatic_hdrish(input, params),
        FilterKind::Tiltshift => spatial::tiltshift(input, params),
        FilterKind::VignetteSoft => spatial::vignette_soft(input, params),
        FilterKind::GlitchPerspective => spatial::glitch_perspective(input, params),
        FilterKind::InvertMonoGrain => graphic::invert_mono_grain(input, params),
        FilterKind::SoftPastel => tonal::soft_pastel(input, params),
    }
}

/// Look up `kind` in `table` and render it.
pub fn apply_from_table(
    kind: FilterKind,
    input: ArrayView3<f32>,
    table: &ParameterTable,
) -> Result<Array3<f32>> {
    let params = table.get(kind)?;
    apply(kind, input, params)
}
