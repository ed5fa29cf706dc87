//! Core library for histogram-based shot boundary detection.
//!
//! Frames are decoded with ffmpeg into numbered image files, each frame is
//! reduced to a concatenated R, G, B color histogram, consecutive histograms
//! are compared with the Chebyshev distance, and local maxima of that signal
//! that jump by more than a threshold become shot boundaries.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use scenecut_core::{DetectorConfig, FfmpegFrameExtractor, FrameStorage, process_movie};
//! use scenecut_core::results::write_outputs;
//! use std::path::Path;
//!
//! let config = DetectorConfig::default();
//! config.validate().unwrap();
//!
//! let extractor = FfmpegFrameExtractor::new();
//! let run = process_movie(
//!     &extractor,
//!     Path::new("/path/to/title"),
//!     &config,
//!     FrameStorage::BesideMovie,
//!     |_, _| {},
//! )
//! .unwrap();
//!
//! write_outputs(&run.bundle, Path::new("/path/to/output"), &config).unwrap();
//! ```

pub mod config;
pub mod delimited;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod ground_truth;
pub mod histogram;
pub mod peaks;
pub mod pipeline;
pub mod results;
pub mod temp_files;

// Re-exports for public API
pub use config::{DetectorConfig, DetectorConfigBuilder, FrameNaming, ThresholdMode};
pub use diff::{StreamingDiff, chebyshev, hist_diffs};
pub use discovery::{count_frames_in_dir, find_movie_file, first_frame_index, frame_dir_for};
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegFrameExtractor, FrameExtractor, check_dependency};
pub use ground_truth::{
    Evaluation, evaluate, load_ground_truth_dir, read_ground_truth_csv, undo_ground_offset,
};
pub use histogram::{HistogramExtractor, HistogramMatrix, color_histogram};
pub use peaks::{
    FixedThreshold, FnThreshold, MaxFractionThreshold, MeanStdThreshold, ThresholdStrategy,
    detect_shots, filter_local_maxima, local_maxima,
};
pub use pipeline::{FrameStorage, MovieRun, analyze_frames, analyze_histograms, process_movie};
pub use results::{ResultBundle, RunSummary, ShotRecord, normalize};
pub use temp_files::{clear_frames, create_scratch_dir, delete_frames};
