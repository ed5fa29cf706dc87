// ============================================================================
// scenecut-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Logger Initialization for the CLI
//
// Two setups are available:
// - File logging (default): log4rs writes `scenecut_run_<timestamp>.log` in
//   the log directory and mirrors records to stderr.
// - Console only (`--no-log`, or commands without an output directory):
//   env_logger, which still honours RUST_LOG.
//
// `--verbose` raises the level from Info to Debug in both setups.

use crate::error::CliResult;
use log::LevelFilter;
use scenecut_core::CoreError;
use scenecut_core::file_logging::{log_file_path, setup_file_logging};
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let stamp = scenecut_cli::logging::get_timestamp();
/// assert_eq!(stamp.len(), 15);
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Level selected by the `--verbose` flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes logging and returns the log file path when one is written.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = level_for(verbose);

    match log_dir {
        Some(dir) => {
            let log_file = log_file_path(dir, &get_timestamp());
            setup_file_logging(&log_file, level, true).map_err(|e| {
                CoreError::OperationFailed(format!(
                    "Failed to set up logging in {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            log::debug!("Logging to {}", log_file.display());
            Ok(Some(log_file))
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .format_timestamp(None)
                .try_init()
                .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logger: {e}")))?;
            Ok(None)
        }
    }
}
