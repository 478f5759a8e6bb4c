//! Pxlate WASM - WebAssembly bindings for Pxlate
//!
//! This crate exposes the pxlate-core pixel art pipeline to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `process` - Pixelation entry points (data URI and raw PNG output)
//! - `palettes` - Built-in palette listing for the UI
//! - `logger` - Forwards `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image, list_palettes } from '@pxlate/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! preview.src = process_image(bytes, density, paletteSelect.value);
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod palettes;
mod process;

pub use palettes::{list_palettes, palette_colors};
pub use process::{pixelate_png, process_image, process_image_with_options};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
    log::debug!("pxlate-web {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
