// ============================================================================
// scenecut-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for scenecut-core
//
// This module defines the error types used throughout the scenecut-core
// library. It provides a unified error type (CoreError) that covers missing
// inputs, external process failures, degenerate signals and malformed
// ground-truth files, and a Result type alias for convenience.
//
// KEY COMPONENTS:
// - CoreError: Enum of all possible errors in the library
// - CoreResult: Type alias for Result<T, CoreError>
// - Helper functions for building command errors
//
// Every variant aborts the current run. Nothing is absorbed into a log line.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the detection pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- I/O and configuration ----
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    // ---- Missing inputs ----
    #[error("No frame files matching '{pattern}' found in {}", .dir.display())]
    NoFramesFound { dir: PathBuf, pattern: String },

    #[error("No movie file found in {}", .0.display())]
    MovieNotFound(PathBuf),

    #[error("Failed to read frame {}: {source}", .path.display())]
    FrameRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ---- External processes ----
    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Command '{command}' failed with {status}: {message}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        message: String,
    },

    #[error("Failed to interpret ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Decoder produced no usable output: {0}")]
    MissingDecoderOutput(String),

    // ---- Signal and data ----
    #[error("Degenerate diff signal: {0}")]
    DegenerateSignal(String),

    #[error("Histogram dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---- Delimited text ----
    #[error("Malformed CSV {}: missing column '{column}'", .path.display())]
    MalformedCsv { path: PathBuf, column: String },

    #[error("Failed to parse {} line {line}: {message}", .path.display())]
    CsvParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for scenecut-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Error for a command that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Error for a command whose exit status could not be collected.
pub fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Error for a command that ran but exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    message: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        message: message.into(),
    }
}
