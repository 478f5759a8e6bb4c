//! Raster decoding with content sniffing, size limits and EXIF orientation.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodeLimits, Orientation, Raster};

/// Decode an image from bytes into an RGBA raster, applying EXIF orientation.
///
/// The format is detected from the content, never from a file name. PNG, JPEG,
/// GIF (first frame), BMP and WebP are supported.
///
/// # Errors
///
/// * `DecodeError::InvalidFormat` - the bytes are not a recognized image container
/// * `DecodeError::CorruptedFile` - the container is truncated or corrupt
/// * `DecodeError::ZeroDimensions` - the header declares a zero width or height
/// * `DecodeError::TooLarge` - the header dimensions exceed `limits`
pub fn decode_image(bytes: &[u8], limits: &DecodeLimits) -> Result<Raster, DecodeError> {
    let img = decode_dynamic(bytes, limits)?;
    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Normal {
        log::debug!(
            "Applying EXIF orientation {:?} to {}x{} image{}",
            orientation,
            img.width(),
            img.height(),
            if orientation.swaps_dimensions() { " (axes swapped)" } else { "" }
        );
    }
    Raster::from_rgba_image(apply_orientation(img, orientation).into_rgba8())
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(
    bytes: &[u8],
    limits: &DecodeLimits,
) -> Result<Raster, DecodeError> {
    Raster::from_rgba_image(decode_dynamic(bytes, limits)?.into_rgba8())
}

/// Read the image dimensions from the header without decoding pixel data.
pub fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    guessed_reader(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract the EXIF orientation value from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is present.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn decode_dynamic(bytes: &[u8], limits: &DecodeLimits) -> Result<DynamicImage, DecodeError> {
    // Reject oversized images from the header before allocating pixel storage
    let (width, height) = inspect_dimensions(bytes)?;
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroDimensions { width, height });
    }
    if !limits.allows(width, height) {
        log::warn!(
            "Rejecting {}x{} image: limits are {} pixels / {} per side",
            width,
            height,
            limits.max_pixels,
            limits.max_dimension
        );
        return Err(DecodeError::TooLarge { width, height });
    }

    let mut reader = guessed_reader(bytes)?;
    reader.limits(limits.to_image_limits());

    reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => DecodeError::TooLarge { width, height },
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
