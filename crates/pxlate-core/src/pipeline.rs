//! The four-stage pixel art pipeline.
//!
//! # Stage Order
//!
//! 1. Decode (bytes → RGBA raster)
//! 2. Blockify (raster → block grid)
//! 3. Palette map (optional)
//! 4. Upscale + encode (grid → PNG data URI)
//!
//! Parameters are validated before any decoding work, so a bad density or an
//! unknown palette fails fast even for large inputs.

use crate::blockify::{blockify, grid_dimensions, Density};
use crate::config::{PipelineConfig, ProcessOptions};
use crate::decode::{decode_image, decode_image_no_orientation};
use crate::encode::{encode_png, upscale_nearest, EncodedImage};
use crate::error::PipelineError;
use crate::palette::{map_to_palette, PaletteRegistry};

/// A configured pixel art engine.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls from multiple threads.
#[derive(Debug, Clone, Default)]
pub struct Pixelator {
    registry: PaletteRegistry,
    config: PipelineConfig,
}

impl Pixelator {
    pub fn new(registry: PaletteRegistry, config: PipelineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &PaletteRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline and return the encoded PNG.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` - density below 1 or an invalid output size
    /// * `UnknownPalette` - the palette key is not registered
    /// * `Decode` - the bytes are not a valid image
    /// * `InputTooLarge` - the image exceeds the configured limits
    /// * `Encode` - PNG serialization failed
    pub fn process(
        &self,
        bytes: &[u8],
        options: &ProcessOptions,
    ) -> Result<EncodedImage, PipelineError> {
        let density = Density::new(options.density)?;
        let palette = self.registry.resolve(options.palette.as_deref())?;
        let metric = options.metric.unwrap_or(self.config.default_metric);
        let limits = &self.config.limits;

        let source = if self.config.apply_orientation {
            decode_image(bytes, limits)
        } else {
            decode_image_no_orientation(bytes, limits)
        }
        .map_err(|e| PipelineError::from_decode(e, limits))?;

        let source_dims = source.dimensions();
        let grid_dims = grid_dimensions(source_dims.0, source_dims.1, density);
        let (out_w, out_h) = options.output.resolve(source_dims, grid_dims, limits)?;

        let grid = blockify(&source, density, options.reduction);
        drop(source);

        let mapped = map_to_palette(grid, palette, metric);
        let display = upscale_nearest(&mapped, out_w, out_h);
        let encoded = encode_png(&display)?;

        log::info!(
            "Pixelated {}x{} image: {}x{} blocks, palette {}, output {}x{} ({} bytes)",
            source_dims.0,
            source_dims.1,
            grid_dims.0,
            grid_dims.1,
            palette.map(|p| p.name()).unwrap_or("none"),
            out_w,
            out_h,
            encoded.bytes().len()
        );

        Ok(encoded)
    }

    /// Run the full pipeline and return a `data:image/png;base64,...` URI.
    pub fn process_to_data_uri(
        &self,
        bytes: &[u8],
        options: &ProcessOptions,
    ) -> Result<String, PipelineError> {
        self.process(bytes, options).map(|img| img.to_data_uri())
    }
}
