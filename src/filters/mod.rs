//! Primitive image operations the looks are composed from.
//!
//! ## Image Layout
//!
//! | Kind | Shape | Type | Description |
//! |------|-------|------|-------------|
//! | Image | (H, W, 3) | f32 | Red, green, blue, 0.0-1.0 |
//! | Mask | (H, W) | f32 | Per-pixel weight, 0.0-1.0 |
//! | 8-bit | (H, W, 3) | u8 | Quantized image, 0-255 |
//!
//! ## Architecture
//!
//! All primitives follow these principles:
//! - **Pure** - Take an `ArrayView3<f32>`, return a new owned array
//! - **Unclamped** - Intermediate results may leave 0.0-1.0; looks clamp at the end
//! - **Validated** - Bad parameters come back as [`crate::FilterError`], never a panic
//! - **Thread-safe** - Blur and warp parallelize over rows with rayon
//!
//! ## Categories
//!
//! - **Pixel-wise**: saturation, contrast, brightness, gamma, invert
//! - **Color science**: hue rotation in HSV
//! - **Tonal**: autocontrast, equalize, normalize
//! - **Stylize**: posterize, gradient map
//! - **Spatial**: sharpness, gaussian blur, perspective warp
//! - **Masks**: radial falloff, vertical focus band
//! - **Noise**: gaussian grain

pub mod blur;
pub mod color_adjust;
pub mod color_science;
pub mod core;
pub mod grayscale;
pub mod levels_curves;
pub mod masks;
pub mod noise;
pub mod sharpen;
pub mod stylize;
pub mod warp;

pub use self::blur::gaussian_blur;
pub use self::color_adjust::{
    adjust_brightness, adjust_contrast, adjust_gamma, adjust_saturation, desaturate, invert,
};
pub use self::color_science::adjust_hue;
pub use self::core::{apply_mask, clamp_unit, lerp, masked_blend};
pub use self::grayscale::{dequantize_u8, quantize_u8};
pub use self::levels_curves::{autocontrast, equalize, normalize_range};
pub use self::masks::{radial_mask, vertical_focus_mask};
pub use self::noise::add_gaussian_noise;
pub use self::sharpen::adjust_sharpness;
pub use self::stylize::posterize;
pub use self::warp::{perspective_warp, Quad};
