//! Block reduction (pixelation).
//!
//! The raster is divided into a grid whose longer axis has `density` cells
//! (capped at the pixel count of that axis); the shorter axis is scaled to
//! preserve the aspect ratio. Each cell collapses to one representative color
//! and becomes one pixel of the output.
//!
//! # Cell Geometry
//!
//! Along an axis of `dim` pixels split into `count` cells, every cell spans
//! `dim / count` pixels and the last cell absorbs the remainder. With
//! `dim = 10, count = 3` the spans are `3, 3, 4`.

use serde::{Deserialize, Serialize};

use crate::decode::Raster;
use crate::error::PipelineError;

/// Number of blocks along the longer image axis. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(u32);

impl Density {
    /// Validate a caller-supplied density.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidParameter` for values below 1 or above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, PipelineError> {
        if value < 1 {
            return Err(PipelineError::InvalidParameter(format!(
                "density must be at least 1, got {}",
                value
            )));
        }
        u32::try_from(value).map(Density).map_err(|_| {
            PipelineError::InvalidParameter(format!("density {} is out of range", value))
        })
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Density {
    type Error = PipelineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Density::new(value)
    }
}

/// How a cell is reduced to its representative color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReduction {
    /// Per-channel arithmetic mean over the cell, rounded half up.
    #[default]
    Mean,
    /// The pixel at the cell center (nearest-neighbor downscale).
    Sample,
}

/// A rectangular source cell and its representative color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Cell width in source pixels.
    pub width: u32,
    /// Cell height in source pixels.
    pub height: u32,
    /// Representative RGBA color.
    pub color: [u8; 4],
}

/// Compute the block grid `(columns, rows)` for an image.
///
/// The longer side gets `min(density, longer)` cells. The shorter side gets
/// `round(shorter * cells / longer)`, clamped to `1..=shorter`.
pub fn grid_dimensions(width: u32, height: u32, density: Density) -> (u32, u32) {
    let (longer, shorter) = if width >= height {
        (width, height)
    } else {
        (height, width)
    };

    let long_cells = density.get().min(longer);
    // Round half up in integer arithmetic
    let scaled = (2 * shorter as u64 * long_cells as u64 + longer as u64) / (2 * longer as u64);
    let short_cells = (scaled as u32).clamp(1, shorter);

    if width >= height {
        (long_cells, short_cells)
    } else {
        (short_cells, long_cells)
    }
}

/// Start offset and length of cell `index` along an axis.
#[inline]
pub(crate) fn cell_span(dim: u32, count: u32, index: u32) -> (u32, u32) {
    let step = dim / count;
    let start = index * step;
    let len = if index + 1 == count { dim - start } else { step };
    (start, len)
}

/// Partition the raster into blocks and compute each block's color.
///
/// Blocks are returned row-major, matching the output pixel order.
pub fn blocks(raster: &Raster, density: Density, reduction: BlockReduction) -> Vec<Block> {
    let (width, height) = raster.dimensions();
    let (cols, rows) = grid_dimensions(width, height, density);

    let mut out = Vec::with_capacity((cols as usize) * (rows as usize));
    for row in 0..rows {
        let (y, cell_h) = cell_span(height, rows, row);
        for col in 0..cols {
            let (x, cell_w) = cell_span(width, cols, col);
            let color = match reduction {
                BlockReduction::Mean => mean_color(raster, x, y, cell_w, cell_h),
                BlockReduction::Sample => raster.pixel(x + cell_w / 2, y + cell_h / 2),
            };
            out.push(Block {
                x,
                y,
                width: cell_w,
                height: cell_h,
                color,
            });
        }
    }
    out
}

/// Reduce a raster to block-grid resolution, one pixel per block.
pub fn blockify(raster: &Raster, density: Density, reduction: BlockReduction) -> Raster {
    let (cols, rows) = grid_dimensions(raster.width(), raster.height(), density);
    let pixels = blocks(raster, density, reduction)
        .into_iter()
        .map(|block| block.color)
        .collect();

    log::debug!(
        "Blockified {}x{} into {}x{} grid ({:?})",
        raster.width(),
        raster.height(),
        cols,
        rows,
        reduction
    );

    Raster::from_parts(cols, rows, pixels)
}

fn mean_color(raster: &Raster, x0: u32, y0: u32, w: u32, h: u32) -> [u8; 4] {
    let mut sums = [0u64; 4];
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let px = raster.pixel(x, y);
            for (sum, channel) in sums.iter_mut().zip(px) {
                *sum += channel as u64;
            }
        }
    }

    let n = (w as u64) * (h as u64);
    sums.map(|sum| ((sum + n / 2) / n) as u8)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
