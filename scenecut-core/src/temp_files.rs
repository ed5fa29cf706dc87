//! Frame directory bookkeeping.
//!
//! Scratch directories come from the tempfile crate and are removed when the
//! returned `TempDir` is dropped, including on error paths. Frames decoded
//! next to the movie stay until `delete_frames` removes them, or until
//! `clear_frames` empties the directory for the next decode.

use crate::config::{DetectorConfig, FrameNaming};
use crate::discovery;
use crate::error::CoreResult;
use std::path::Path;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Creates a scratch directory with prefix. Auto-cleaned when dropped.
///
/// The directory lives under `config.temp_dir` when set, otherwise under the
/// system temp directory.
pub fn create_scratch_dir(config: &DetectorConfig, prefix: &str) -> CoreResult<TempDir> {
    let base = config
        .temp_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&base)?;

    let dir = TempFileBuilder::new().prefix(prefix).tempdir_in(&base)?;
    log::debug!("Created scratch frame directory {}", dir.path().display());
    Ok(dir)
}

/// Removes frame files numbered `start..end` from `dir`.
///
/// Every file in the range must exist; a missing one aborts with the I/O
/// error. Returns the number of files removed.
pub fn delete_frames(dir: &Path, naming: &FrameNaming, start: u64, end: u64) -> CoreResult<usize> {
    let mut removed = 0;
    for frame in start..end {
        let path = dir.join(naming.file_name(frame));
        std::fs::remove_file(&path).map_err(|e| {
            log::error!("Failed to delete frame {}: {}", path.display(), e);
            e
        })?;
        removed += 1;
    }
    log::debug!("Deleted {} frames from {}", removed, dir.display());
    Ok(removed)
}

/// Removes every file in `dir` that follows `naming`.
///
/// A directory that does not exist holds no frames. Returns the number of
/// files removed.
pub fn clear_frames(dir: &Path, naming: &FrameNaming) -> CoreResult<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let names = discovery::frame_file_names(dir, naming)?;
    for name in &names {
        std::fs::remove_file(dir.join(name))?;
    }
    Ok(names.len())
}
