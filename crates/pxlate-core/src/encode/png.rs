//! PNG encoding and data URI wrapping.
//!
//! PNG is lossless, so block edges and palette colors survive exactly.

use base64::{engine::general_purpose, Engine as _};
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::Raster;

/// MIME type of [`encode_png`] output.
pub const PNG_MIME: &str = "image/png";

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// An encoded image buffer and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    mime: &'static str,
}

impl EncodedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Render as `data:<mime>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Encode a raster as an RGBA8 PNG.
pub fn encode_png(raster: &Raster) -> Result<EncodedImage, EncodeError> {
    encode_png_rgba(&raster.to_rgba_bytes(), raster.width(), raster.height())
}

/// Encode interleaved RGBA pixel data as PNG.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns `InvalidDimensions` for a zero side, `InvalidPixelData` when the
/// buffer length disagrees with the dimensions, and `EncodingFailed` if the
/// PNG writer fails.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<EncodedImage, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(EncodedImage {
        bytes: buffer.into_inner(),
        mime: PNG_MIME,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
