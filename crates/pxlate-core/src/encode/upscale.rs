//! Nearest-neighbor upscaling of the block grid for display.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodeLimits, Raster};
use crate::error::PipelineError;

/// Size of the encoded output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OutputSize {
    /// The decoded source image's dimensions.
    #[default]
    Original,
    /// One output pixel per block.
    Grid,
    /// Each block becomes a `factor x factor` square.
    Scale { factor: u32 },
    /// Fixed output dimensions.
    Exact { width: u32, height: u32 },
}

impl OutputSize {
    /// Resolve to concrete dimensions.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidParameter` for a zero scale or size, or
    /// when the result exceeds `limits.max_dimension` or `limits.max_pixels`.
    pub fn resolve(
        self,
        source: (u32, u32),
        grid: (u32, u32),
        limits: &DecodeLimits,
    ) -> Result<(u32, u32), PipelineError> {
        let (width, height) = match self {
            OutputSize::Original => source,
            OutputSize::Grid => grid,
            OutputSize::Scale { factor } => {
                if factor == 0 {
                    return Err(PipelineError::InvalidParameter(
                        "output scale factor must be at least 1".to_string(),
                    ));
                }
                let scale = |v: u32| {
                    v.checked_mul(factor).ok_or_else(|| {
                        PipelineError::InvalidParameter(format!(
                            "output scale factor {} overflows",
                            factor
                        ))
                    })
                };
                (scale(grid.0)?, scale(grid.1)?)
            }
            OutputSize::Exact { width, height } => (width, height),
        };

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidParameter(format!(
                "output size {}x{} must be non-zero",
                width, height
            )));
        }
        if width > limits.max_dimension || height > limits.max_dimension {
            return Err(PipelineError::InvalidParameter(format!(
                "output size {}x{} exceeds the limit of {} pixels per side",
                width, height, limits.max_dimension
            )));
        }
        if (width as u64) * (height as u64) > limits.max_pixels {
            return Err(PipelineError::InvalidParameter(format!(
                "output size {}x{} exceeds the limit of {} pixels",
                width, height, limits.max_pixels
            )));
        }
        Ok((width, height))
    }
}

/// Map every output coordinate along one axis to a source index.
///
/// When enlarging, output is cut into `count` runs of `out / count` pixels
/// with the last run absorbing the remainder, which mirrors the block
/// geometry used when the grid was built.
fn axis_map(count: u32, out: u32) -> Vec<u32> {
    if out >= count {
        let step = out / count;
        (0..out).map(|i| (i / step).min(count - 1)).collect()
    } else {
        (0..out)
            .map(|i| ((i as u64 * count as u64) / out as u64) as u32)
            .collect()
    }
}

/// Resize a raster by nearest-neighbor replication.
///
/// Passing the original image size after blockifying reproduces the exact
/// source cell layout, so blocks render as crisp rectangles.
pub fn upscale_nearest(raster: &Raster, width: u32, height: u32) -> Raster {
    if raster.dimensions() == (width, height) {
        return raster.clone();
    }

    let cols = axis_map(raster.width(), width);
    let rows = axis_map(raster.height(), height);

    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for &sy in &rows {
        for &sx in &cols {
            pixels.push(raster.pixel(sx, sy));
        }
    }

    log::debug!(
        "Upscaled {}x{} grid to {}x{}",
        raster.width(),
        raster.height(),
        width,
        height
    );

    Raster::from_parts(width, height, pixels)
}
