//! Pixelation WASM bindings.
//!
//! # Functions
//!
//! - [`process_image`] - Pixelate an image and return a PNG data URI
//! - [`process_image_with_options`] - Same, with the full option set
//! - [`pixelate_png`] - Pixelate an image and return raw PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { process_image } from '@pxlate/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! img.src = process_image(bytes, 48, 'gameboy');
//! ```

use pxlate_core::{PipelineError, Pixelator, ProcessOptions};
use wasm_bindgen::prelude::*;

fn to_js_error(err: PipelineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn options_for(density: i32, palette: Option<String>) -> ProcessOptions {
    let mut options = ProcessOptions::new(i64::from(density));
    options.palette = palette;
    options
}

pub(crate) fn run_to_data_uri(data: &[u8], options: &ProcessOptions) -> Result<String, PipelineError> {
    Pixelator::default().process_to_data_uri(data, options)
}

pub(crate) fn run_to_png(data: &[u8], options: &ProcessOptions) -> Result<Vec<u8>, PipelineError> {
    Pixelator::default()
        .process(data, options)
        .map(|img| img.into_bytes())
}

/// Pixelate an image and return it as a `data:image/png;base64,...` URI.
///
/// # Arguments
///
/// * `data` - The raw image file bytes as a `Uint8Array`
/// * `density` - Number of blocks along the longer axis (at least 1)
/// * `palette` - Palette key from `list_palettes()`, or `undefined`/`"none"`
///
/// # Errors
///
/// Returns an error string if the density is invalid, the palette is unknown,
/// or the bytes are not a supported image.
#[wasm_bindgen]
pub fn process_image(data: &[u8], density: i32, palette: Option<String>) -> Result<String, JsValue> {
    run_to_data_uri(data, &options_for(density, palette)).map_err(to_js_error)
}

/// Pixelate an image with an options object.
///
/// ```typescript
/// process_image_with_options(bytes, {
///   density: 32,
///   palette: 'dracula',
///   metric: 'weighted',
///   reduction: 'sample',
///   output: { mode: 'scale', factor: 8 },
/// });
/// ```
#[wasm_bindgen]
pub fn process_image_with_options(data: &[u8], options: JsValue) -> Result<String, JsValue> {
    let options: ProcessOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?;
    run_to_data_uri(data, &options).map_err(to_js_error)
}

/// Pixelate an image and return the encoded PNG bytes, e.g. for downloads.
#[wasm_bindgen]
pub fn pixelate_png(data: &[u8], density: i32, palette: Option<String>) -> Result<Vec<u8>, JsValue> {
    run_to_png(data, &options_for(density, palette)).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn sample_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(16, 8, |x, _| Rgba([(x * 16) as u8, 64, 200, 255]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_options_for_widens_density() {
        let options = options_for(-3, Some("retro".to_string()));
        assert_eq!(options.density, -3);
        assert_eq!(options.palette.as_deref(), Some("retro"));
    }

    #[test]
    fn test_run_to_data_uri() {
        let uri = run_to_data_uri(&sample_png(), &options_for(4, None)).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_run_to_png() {
        let png = run_to_png(&sample_png(), &options_for(4, Some("gameboy".to_string()))).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_run_rejects_bad_density() {
        assert!(matches!(
            run_to_png(&sample_png(), &options_for(0, None)),
            Err(PipelineError::InvalidParameter(_))
        ));
    }
}
