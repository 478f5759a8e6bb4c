//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The container format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or truncated.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image declares a zero width or height.
    #[error("Image has zero dimensions ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },

    /// The image exceeds the configured decode limits.
    #[error("Image dimensions {width}x{height} exceed the decode limits")]
    TooLarge { width: u32, height: u32 },

    /// A raster was built from a pixel buffer of the wrong length.
    #[error("Pixel buffer mismatch: expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// Upper bounds applied before an image is fully decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum `width * height`.
    pub max_pixels: u64,
    /// Maximum length of either side.
    pub max_dimension: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_pixels: 40_000_000,
            max_dimension: 16_384,
        }
    }
}

impl DecodeLimits {
    /// Check whether the given dimensions fit within these limits.
    pub fn allows(&self, width: u32, height: u32) -> bool {
        width <= self.max_dimension
            && height <= self.max_dimension
            && (width as u64) * (height as u64) <= self.max_pixels
    }

    /// Convert to the image crate's allocation limits.
    pub(crate) fn to_image_limits(self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        // RGBA8 output plus decoder scratch space
        limits.max_alloc = Some(self.max_pixels.saturating_mul(4).saturating_mul(2));
        limits
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An RGBA raster held in memory.
///
/// Pixels are stored row-major, one `[r, g, b, a]` entry per pixel.
/// The pixel count always equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Raster {
    /// Create a raster, validating dimensions against the pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(DecodeError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from parts already known to be consistent.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        debug_assert!(width > 0 && height > 0, "Raster must not be empty");
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Result<Self, DecodeError> {
        let count = (width as usize) * (height as usize);
        Self::new(width, height, vec![color; count])
    }

    /// Create a Raster from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, DecodeError> {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self::new(width, height, pixels)
    }

    /// Convert to an image::RgbaImage for encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba_bytes())
    }

    /// Flatten into interleaved RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Consume the raster and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<[u8; 4]> {
        self.pixels
    }

    /// Get the pixel at (x, y). Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
    }

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(4, 2, vec![[1, 2, 3, 255]; 8]).unwrap();
        assert_eq!(raster.dimensions(), (4, 2));
        assert_eq!(raster.pixel_count(), 8);
        assert_eq!(raster.pixel(3, 1), [1, 2, 3, 255]);
    }

    #[test]
    fn test_raster_rejects_zero_dimensions() {
        assert!(matches!(
            Raster::new(0, 5, vec![]),
            Err(DecodeError::ZeroDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_raster_rejects_wrong_length() {
        let result = Raster::new(3, 3, vec![[0; 4]; 8]);
        assert!(matches!(
            result,
            Err(DecodeError::PixelCountMismatch {
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_rgba_image_conversion() {
        let raster = Raster::new(2, 1, vec![[255, 0, 0, 255], [0, 0, 255, 128]]).unwrap();
        let img = raster.to_rgba_image().unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 128]);

        let back = Raster::from_rgba_image(img).unwrap();
        assert_eq!(back, raster);
    }

    #[test]
    fn test_decode_limits() {
        let limits = DecodeLimits {
            max_pixels: 100,
            max_dimension: 20,
        };
        assert!(limits.allows(10, 10));
        assert!(!limits.allows(11, 10));
        assert!(!limits.allows(21, 1));
        assert!(DecodeLimits::default().allows(4000, 3000));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");

        let err = DecodeError::TooLarge {
            width: 20000,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Image dimensions 20000x10 exceed the decode limits"
        );
    }
}
