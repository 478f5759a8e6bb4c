//! Pxlate Core - Pixel art conversion engine
//!
//! This crate turns an arbitrary raster image into a pixel art rendition:
//! decode → block-reduce → palette-map → encode. Every stage is a pure
//! function; the only shared input is the [`PaletteRegistry`] and
//! [`PipelineConfig`] held by a [`Pixelator`].
//!
//! # Density
//!
//! `density` is the number of blocks along the longer image axis. The shorter
//! axis is scaled to keep the aspect ratio.

pub mod blockify;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod palette;
pub mod pipeline;

pub use blockify::{blockify, grid_dimensions, BlockReduction, Density};
pub use config::{PipelineConfig, ProcessOptions};
pub use decode::{decode_image, DecodeError, DecodeLimits, Raster};
pub use encode::{encode_png, upscale_nearest, EncodeError, EncodedImage, OutputSize};
pub use error::PipelineError;
pub use palette::{map_to_palette, DistanceMetric, Palette, PaletteRegistry, Rgb};
pub use pipeline::Pixelator;

/// Pixelate an image with the built-in palettes and default options.
///
/// # Arguments
///
/// * `bytes` - Raw image file content (PNG, JPEG, GIF, BMP or WebP)
/// * `density` - Block count along the longer axis, at least 1
/// * `palette` - Palette key, or `None`/`"none"` for passthrough
///
/// # Returns
///
/// A `data:image/png;base64,...` URI at the source image's dimensions.
pub fn process_image(
    bytes: &[u8],
    density: i64,
    palette: Option<&str>,
) -> Result<String, PipelineError> {
    let mut options = ProcessOptions::new(density);
    options.palette = palette.map(str::to_string);
    Pixelator::default().process_to_data_uri(bytes, &options)
}
