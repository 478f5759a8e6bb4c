//! Pipeline-level error type.
//!
//! Each stage has its own error enum; this type is what the public entry
//! points return, so callers can match on the failure kind.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors returned by the pixel art pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input bytes are not a recognized or valid image.
    #[error("Failed to decode image: {0}")]
    Decode(DecodeError),

    /// A caller-supplied parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The palette key is not registered.
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    /// Image dimensions exceed the configured safety bound.
    #[error(
        "Image too large: {width}x{height} exceeds the limit of {max_pixels} pixels \
         or {max_dimension} pixels per side"
    )]
    InputTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
        max_dimension: u32,
    },

    /// Internal serialization failure after a valid transform.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] EncodeError),

    /// Palette configuration could not be loaded.
    #[error("Invalid palette configuration: {0}")]
    PaletteConfig(String),

    /// Engine configuration could not be loaded.
    #[error("Invalid pipeline configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// Lift a decode error, turning size rejections into `InputTooLarge`.
    pub(crate) fn from_decode(err: DecodeError, limits: &crate::decode::DecodeLimits) -> Self {
        match err {
            DecodeError::TooLarge { width, height } => PipelineError::InputTooLarge {
                width,
                height,
                max_pixels: limits.max_pixels,
                max_dimension: limits.max_dimension,
            },
            other => PipelineError::Decode(other),
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, PipelineError::Encode(_))
    }
}
