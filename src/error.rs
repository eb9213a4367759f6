//! Error type shared by primitives, looks, the driver and the I/O layer.

use std::path::PathBuf;

/// Everything that can go wrong while rendering or persisting a look.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize, usize),
        right: (usize, usize, usize),
    },

    #[error("expected an RGB image with 3 channels, got {0}")]
    ChannelCount(usize),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("no parameters registered for filter `{0}`")]
    MissingParameters(&'static str),

    #[error("filter `{filter}` received parameters for `{found}`")]
    ParameterMismatch {
        filter: &'static str,
        found: &'static str,
    },

    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    #[error("failed to decode or encode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = FilterError> = std::result::Result<T, E>;
