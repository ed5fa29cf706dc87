// ============================================================================
// scenecut-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for DetectorConfig
//
// Fluent construction of DetectorConfig starting from the defaults. Values
// are not checked here; call `DetectorConfig::validate` on the result.

use std::path::PathBuf;

use super::{DetectorConfig, FrameNaming, ThresholdMode};

/// Builder for creating DetectorConfig instances.
///
/// # Examples
///
/// ```rust
/// use scenecut_core::config::DetectorConfigBuilder;
///
/// let config = DetectorConfigBuilder::new()
///     .bins(16)
///     .frame_extension("png")
///     .keep_frames(false)
///     .build();
/// assert_eq!(config.naming.file_name(3), "000003.png");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of histogram bins per channel.
    pub fn bins(mut self, bins: usize) -> Self {
        self.config.bins = bins;
        self
    }

    /// Sets the threshold mode.
    pub fn threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.config.threshold_mode = mode;
        self
    }

    /// Sets the fixed height threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Sets the standard deviation multiplier for the mean-std mode.
    pub fn adaptive_k(mut self, k: f64) -> Self {
        self.config.adaptive_k = k;
        self
    }

    /// Sets the fraction used by the max-fraction mode.
    pub fn max_fraction(mut self, fraction: f64) -> Self {
        self.config.max_fraction = fraction;
        self
    }

    /// Replaces the frame naming convention.
    pub fn naming(mut self, naming: FrameNaming) -> Self {
        self.config.naming = naming;
        self
    }

    /// Sets the frame file extension.
    pub fn frame_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.naming.extension = extension.into();
        self
    }

    /// Sets the zero-padding width of frame file names.
    pub fn frame_digits(mut self, digits: usize) -> Self {
        self.config.naming.digits = digits;
        self
    }

    /// Sets the name of the frame directory created next to the movie.
    pub fn frame_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.frame_dir_name = name.into();
        self
    }

    /// Sets the base directory for scratch frame directories.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    /// Sets the shot index text file name.
    pub fn output_txt_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_txt_name = name.into();
        self
    }

    /// Sets the per-shot CSV file name.
    pub fn output_csv_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_csv_name = name.into();
        self
    }

    /// Sets the movie extension substrings used during discovery.
    pub fn movie_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.movie_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Enables chunked processing.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = Some(size);
        self
    }

    /// Keeps or deletes decoded frames after the run.
    pub fn keep_frames(mut self, keep: bool) -> Self {
        self.config.keep_frames = keep;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> DetectorConfig {
        self.config
    }
}
