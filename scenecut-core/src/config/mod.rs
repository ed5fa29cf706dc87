//! Configuration structures and constants for the scenecut-core library.
//!
//! Every component receives a `DetectorConfig` explicitly; there is no
//! module-level mutable state, so independent runs and tests can use
//! different settings side by side.

mod builder;
mod naming;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::peaks::{FixedThreshold, MaxFractionThreshold, MeanStdThreshold, ThresholdStrategy};

pub use builder::DetectorConfigBuilder;
pub use naming::{DEFAULT_FRAME_DIGITS, DEFAULT_FRAME_EXTENSION, FrameNaming};

// Default constants

/// Default number of histogram bins per color channel.
pub const DEFAULT_BINS: usize = 4;

/// Number of color channels in a frame histogram.
pub const CHANNELS: usize = 3;

/// Default fixed threshold (absolute pixel count). Only used in `Fixed` mode.
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// Default number of standard deviations above the mean jump for `MeanStd`.
pub const DEFAULT_ADAPTIVE_K: f64 = 2.0;

/// Default fraction of the largest jump for `MaxFraction`.
pub const DEFAULT_MAX_FRACTION: f64 = 0.5;

/// Name of the frame directory created next to the source movie.
pub const DEFAULT_FRAME_DIR_NAME: &str = "frames";

/// Output file holding the sorted, zero-padded shot indices.
pub const DEFAULT_OUTPUT_TXT_NAME: &str = "shots.txt";

/// Output file holding one row per shot.
pub const DEFAULT_OUTPUT_CSV_NAME: &str = "shots.csv";

/// Output file holding the JSON run summary.
pub const DEFAULT_SUMMARY_JSON_NAME: &str = "summary.json";

/// File-name substrings that identify a movie file.
pub const DEFAULT_MOVIE_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv", ".m4v", ".webm"];

/// How the peak filter's height threshold is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdMode {
    /// Use `DetectorConfig::threshold` as-is
    Fixed,
    /// Mean plus `adaptive_k` standard deviations of the candidate jumps
    MeanStd,
    /// `max_fraction` of the largest candidate jump
    MaxFraction,
}

/// Main configuration structure for the detection pipeline.
///
/// All fields have defaults; the builder provides a fluent way to override
/// them.
///
/// # Examples
///
/// ```rust
/// use scenecut_core::config::{DetectorConfigBuilder, ThresholdMode};
///
/// let config = DetectorConfigBuilder::new()
///     .bins(8)
///     .threshold_mode(ThresholdMode::Fixed)
///     .threshold(4000.0)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Histogram bins per color channel (1-256)
    pub bins: usize,

    /// Strategy used to compute the peak height threshold
    pub threshold_mode: ThresholdMode,

    /// Fixed height threshold, compared with a strict `>`
    pub threshold: f64,

    /// Standard deviation multiplier for `ThresholdMode::MeanStd`
    pub adaptive_k: f64,

    /// Fraction of the largest jump for `ThresholdMode::MaxFraction`, and the
    /// cap of the `ThresholdMode::MeanStd` threshold
    pub max_fraction: f64,

    /// Frame file naming shared with the decoder
    pub naming: FrameNaming,

    /// Name of the frame directory created next to the movie
    pub frame_dir_name: String,

    /// Base directory for scratch frame directories (defaults to the system temp dir)
    pub temp_dir: Option<PathBuf>,

    /// File name of the shot index text output
    pub output_txt_name: String,

    /// File name of the per-shot CSV output
    pub output_csv_name: String,

    /// File name of the JSON summary output
    pub summary_json_name: String,

    /// Substrings identifying movie files during discovery
    pub movie_extensions: Vec<String>,

    /// Process frames in chunks of this many frames, merging partial results
    pub chunk_size: Option<usize>,

    /// Keep decoded frames on disk after the run
    pub keep_frames: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            threshold_mode: ThresholdMode::MaxFraction,
            threshold: DEFAULT_THRESHOLD,
            adaptive_k: DEFAULT_ADAPTIVE_K,
            max_fraction: DEFAULT_MAX_FRACTION,
            naming: FrameNaming::default(),
            frame_dir_name: DEFAULT_FRAME_DIR_NAME.to_string(),
            temp_dir: None,
            output_txt_name: DEFAULT_OUTPUT_TXT_NAME.to_string(),
            output_csv_name: DEFAULT_OUTPUT_CSV_NAME.to_string(),
            summary_json_name: DEFAULT_SUMMARY_JSON_NAME.to_string(),
            movie_extensions: DEFAULT_MOVIE_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            chunk_size: None,
            keep_frames: true,
        }
    }
}

impl DetectorConfig {
    /// Length of one histogram row (channels × bins).
    #[must_use]
    pub fn histogram_width(&self) -> usize {
        CHANNELS * self.bins
    }

    /// Builds the threshold strategy selected by `threshold_mode`.
    pub fn threshold_strategy(&self) -> Box<dyn ThresholdStrategy> {
        match self.threshold_mode {
            ThresholdMode::Fixed => Box::new(FixedThreshold(self.threshold)),
            ThresholdMode::MeanStd => Box::new(MeanStdThreshold {
                k: self.adaptive_k,
                cap_fraction: self.max_fraction,
            }),
            ThresholdMode::MaxFraction => Box::new(MaxFractionThreshold {
                fraction: self.max_fraction,
            }),
        }
    }

    /// Checks that all parameters are within their valid ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if !(1..=256).contains(&self.bins) {
            return Err(CoreError::Config(format!(
                "bins must be between 1 and 256, got {}",
                self.bins
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CoreError::Config(format!(
                "threshold must be a finite, non-negative number, got {}",
                self.threshold
            )));
        }
        if !self.adaptive_k.is_finite() {
            return Err(CoreError::Config(format!(
                "adaptive_k must be finite, got {}",
                self.adaptive_k
            )));
        }
        if !(self.max_fraction > 0.0 && self.max_fraction <= 1.0) {
            return Err(CoreError::Config(format!(
                "max_fraction must be in (0, 1], got {}",
                self.max_fraction
            )));
        }
        if self.naming.digits == 0 {
            return Err(CoreError::Config(
                "frame naming needs at least one digit".to_string(),
            ));
        }
        if self.naming.extension.is_empty() || self.naming.extension.contains('.') {
            return Err(CoreError::Config(format!(
                "frame extension must be non-empty and without dots, got '{}'",
                self.naming.extension
            )));
        }
        if self.frame_dir_name.is_empty() {
            return Err(CoreError::Config("frame_dir_name must not be empty".to_string()));
        }
        if self.movie_extensions.is_empty() {
            return Err(CoreError::Config(
                "at least one movie extension is required".to_string(),
            ));
        }
        if self.chunk_size == Some(0) {
            return Err(CoreError::Config("chunk_size must be at least 1".to_string()));
        }
        Ok(())
    }
}
