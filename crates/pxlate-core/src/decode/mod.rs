//! Image decoding stage.
//!
//! This module turns raw file bytes into an RGBA [`Raster`]:
//! - Format sniffing by content (PNG, JPEG, GIF, BMP, WebP)
//! - Header-first dimension checks against [`DecodeLimits`]
//! - EXIF orientation correction
//!
//! # Examples
//!
//! ```ignore
//! use pxlate_core::decode::{decode_image, DecodeLimits};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let raster = decode_image(&bytes, &DecodeLimits::default()).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation, inspect_dimensions};
pub use types::{DecodeError, DecodeLimits, Orientation, Raster};
