// scenecut-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use scenecut_core::ThresholdMode;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Scenecut: Shot boundary detection",
    long_about = "Detects shot boundaries in movies from frame-to-frame color histogram changes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log to the console only, without a log file
    #[arg(long, global = true, default_value_t = false)]
    pub no_log: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decodes a movie with ffmpeg and detects its shot boundaries
    Detect(DetectArgs),
    /// Detects shot boundaries in a directory of already extracted frames
    Frames(FramesArgs),
    /// Scores a shot list against a ground-truth CSV file
    Evaluate(EvaluateArgs),
}

impl Commands {
    /// Output directory of the command, if it writes one.
    pub fn output_dir(&self) -> Option<&PathBuf> {
        match self {
            Commands::Detect(args) => Some(&args.output_dir),
            Commands::Frames(args) => Some(&args.output_dir),
            Commands::Evaluate(_) => None,
        }
    }
}

/// Threshold modes accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdModeArg {
    Fixed,
    MeanStd,
    MaxFraction,
}

impl From<ThresholdModeArg> for ThresholdMode {
    fn from(mode: ThresholdModeArg) -> Self {
        match mode {
            ThresholdModeArg::Fixed => ThresholdMode::Fixed,
            ThresholdModeArg::MeanStd => ThresholdMode::MeanStd,
            ThresholdModeArg::MaxFraction => ThresholdMode::MaxFraction,
        }
    }
}

/// Options shared by the detecting commands.
#[derive(Args, Debug, Clone)]
pub struct DetectionOptions {
    /// Histogram bins per color channel
    #[arg(long, value_name = "N", env = "SCENECUT_BINS")]
    pub bins: Option<usize>,

    /// Fixed peak height threshold in pixels. Implies --threshold-mode fixed
    /// unless a mode is given.
    #[arg(long, value_name = "H", env = "SCENECUT_THRESHOLD")]
    pub threshold: Option<f64>,

    /// How the peak height threshold is obtained
    #[arg(long, value_enum, value_name = "MODE")]
    pub threshold_mode: Option<ThresholdModeArg>,

    /// Standard deviations above the mean jump (mean-std mode)
    #[arg(long, value_name = "K")]
    pub adaptive_k: Option<f64>,

    /// Fraction of the largest jump (max-fraction mode)
    #[arg(long, value_name = "FRACTION")]
    pub max_fraction: Option<f64>,

    /// Analyze frames in chunks of N frames
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Also write a JSON run summary
    #[arg(long, default_value_t = false)]
    pub json_summary: bool,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Movie file or directory containing one
    #[arg(short = 'i', long = "input", required = true, value_name = "MOVIE_OR_DIR")]
    pub input_path: PathBuf,

    /// Directory where shots.txt and shots.csv are written
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Decode into a scratch directory removed after the run
    #[arg(long, default_value_t = false)]
    pub scratch: bool,

    /// Delete the decoded frames after the run
    #[arg(long, default_value_t = false)]
    pub delete_frames: bool,

    #[command(flatten)]
    pub detection: DetectionOptions,
}

#[derive(Args, Debug)]
pub struct FramesArgs {
    /// Directory of numbered frame images
    #[arg(short = 'd', long = "frames-dir", required = true, value_name = "FRAMES_DIR")]
    pub frames_dir: PathBuf,

    /// Directory where shots.txt and shots.csv are written
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of frames to read (defaults to all frames found)
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,

    /// Number of the first frame (defaults to the lowest found)
    #[arg(long, value_name = "N")]
    pub first_frame: Option<u64>,

    /// Frame file extension
    #[arg(long, value_name = "EXT", default_value = "jpg")]
    pub extension: String,

    /// Zero-padded digits in frame file names
    #[arg(long, value_name = "N", default_value_t = 6)]
    pub digits: usize,

    /// Delete the analyzed frames afterwards
    #[arg(long, default_value_t = false)]
    pub delete_frames: bool,

    #[command(flatten)]
    pub detection: DetectionOptions,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Shot list written by detect or frames
    #[arg(long, required = true, value_name = "SHOTS_TXT")]
    pub shots: PathBuf,

    /// Ground-truth CSV with a start_frame or s_frame column
    #[arg(long, required = true, value_name = "TRUTH_CSV")]
    pub truth: PathBuf,

    /// Allowed distance in frames between a detection and a ground-truth shot
    #[arg(long, value_name = "FRAMES", default_value_t = 0)]
    pub tolerance: u64,

    /// Shift ground-truth frames so the first shot starts at 0
    #[arg(long, default_value_t = false)]
    pub undo_offset: bool,
}
