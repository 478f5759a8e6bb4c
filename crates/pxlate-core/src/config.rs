//! Engine configuration and per-call options.

use serde::{Deserialize, Serialize};

use crate::blockify::BlockReduction;
use crate::decode::DecodeLimits;
use crate::encode::OutputSize;
use crate::error::PipelineError;
use crate::palette::DistanceMetric;

/// Load-time configuration shared by every call on a [`crate::Pixelator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Size bounds checked before full decode.
    pub limits: DecodeLimits,
    /// Honor EXIF orientation when decoding.
    pub apply_orientation: bool,
    /// Metric used when a call does not specify one.
    pub default_metric: DistanceMetric,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limits: DecodeLimits::default(),
            apply_orientation: true,
            default_metric: DistanceMetric::Euclidean,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json).map_err(|e| PipelineError::Config(e.to_string()))
    }
}

/// Parameters for a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Block count along the longer axis. Must be at least 1.
    pub density: i64,
    /// Palette key; `None` or `"none"` for passthrough.
    #[serde(default)]
    pub palette: Option<String>,
    /// Overrides [`PipelineConfig::default_metric`].
    #[serde(default)]
    pub metric: Option<DistanceMetric>,
    #[serde(default)]
    pub reduction: BlockReduction,
    #[serde(default)]
    pub output: OutputSize,
}

impl ProcessOptions {
    pub fn new(density: i64) -> Self {
        Self {
            density,
            palette: None,
            metric: None,
            reduction: BlockReduction::default(),
            output: OutputSize::default(),
        }
    }

    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn with_reduction(mut self, reduction: BlockReduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn with_output(mut self, output: OutputSize) -> Self {
        self.output = output;
        self
    }
}
