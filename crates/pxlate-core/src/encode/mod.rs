//! Encoding stage.
//!
//! This module provides functionality for:
//! - Upscaling the block grid back to display size (nearest neighbor)
//! - Encoding rasters as lossless PNG
//! - Wrapping the encoded bytes in a `data:` URI
//!
//! # Examples
//!
//! ```ignore
//! use pxlate_core::decode::Raster;
//! use pxlate_core::encode::{encode_png, upscale_nearest};
//!
//! let grid = Raster::filled(4, 3, [40, 44, 52, 255]).unwrap();
//! let display = upscale_nearest(&grid, 400, 300);
//! let uri = encode_png(&display).unwrap().to_data_uri();
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```

mod png;
mod upscale;

pub use png::{encode_png, encode_png_rgba, EncodeError, EncodedImage, PNG_MIME};
pub use upscale::{upscale_nearest, OutputSize};
