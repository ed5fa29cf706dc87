//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

use crate::cli::DetectionOptions;
use crate::error::CliResult;

use scenecut_core::{DetectorConfig, DetectorConfigBuilder, FrameNaming, ThresholdMode};

/// Decodes a movie with ffmpeg and detects its shots.
pub mod detect;
/// Scores a shot list against ground truth.
pub mod evaluate;
/// Detects shots in an existing frame directory.
pub mod frames;

/// Builds the detector configuration from the shared command-line options.
///
/// A `--threshold` without `--threshold-mode` selects fixed mode.
pub fn build_config(options: &DetectionOptions, naming: FrameNaming) -> CliResult<DetectorConfig> {
    let mut builder = DetectorConfigBuilder::new().naming(naming);

    if let Some(bins) = options.bins {
        builder = builder.bins(bins);
    }
    if let Some(threshold) = options.threshold {
        builder = builder.threshold(threshold);
    }
    let mode = match (options.threshold_mode, options.threshold) {
        (Some(mode), _) => Some(ThresholdMode::from(mode)),
        (None, Some(_)) => Some(ThresholdMode::Fixed),
        (None, None) => None,
    };
    if let Some(mode) = mode {
        builder = builder.threshold_mode(mode);
    }
    if let Some(k) = options.adaptive_k {
        builder = builder.adaptive_k(k);
    }
    if let Some(fraction) = options.max_fraction {
        builder = builder.max_fraction(fraction);
    }
    if let Some(size) = options.chunk_size {
        builder = builder.chunk_size(size);
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}
