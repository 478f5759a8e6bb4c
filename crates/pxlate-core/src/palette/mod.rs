//! Palette quantization stage.
//!
//! This module provides:
//! - [`Rgb`] palette colors with `#rrggbb` parsing
//! - [`PaletteRegistry`], the key → palette table (built-in or loaded from JSON)
//! - [`map_to_palette`], exact brute-force nearest-color mapping
//!
//! # Tie Breaking
//!
//! When two entries are equally close, the one declared first in the palette
//! wins. Distances are integers, so ties are exact and deterministic.

mod color;
mod mapper;
mod registry;

pub use color::Rgb;
pub use mapper::{map_to_palette, nearest_color, DistanceMetric};
pub use registry::{Palette, PaletteRegistry, PASSTHROUGH_KEY};
