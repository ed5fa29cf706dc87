//! File discovery for movies and extracted frames.
//!
//! Locates the movie inside an input directory, finds the first frame
//! number of an extracted frame sequence and counts its frames. A missing
//! movie or an empty frame directory is a hard error.

use crate::config::{DetectorConfig, FrameNaming};
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Finds the movie file in `dir`.
///
/// A file matches when its name contains one of `config.movie_extensions`.
/// Entries are examined in name order and the first match is returned, so
/// the result is stable when a directory holds more than one candidate.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the movie file
/// * `Err(CoreError::MovieNotFound)` - If no file matches
/// * `Err(CoreError::Io)` - If the directory cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use scenecut_core::DetectorConfig;
/// use scenecut_core::discovery::find_movie_file;
/// use std::path::Path;
///
/// let config = DetectorConfig::default();
/// let movie = find_movie_file(Path::new("/data/title"), &config).unwrap();
/// println!("Found {}", movie.display());
/// ```
pub fn find_movie_file(dir: &Path, config: &DetectorConfig) -> CoreResult<PathBuf> {
    let mut names = file_names(dir)?;
    names.sort();

    let found = names.into_iter().find(|name| {
        config
            .movie_extensions
            .iter()
            .any(|ext| name.contains(ext.as_str()))
    });

    match found {
        Some(name) => {
            let path = dir.join(name);
            log::debug!("Found movie file {}", path.display());
            Ok(path)
        }
        None => {
            log::error!("No movie file found in {}", dir.display());
            Err(CoreError::MovieNotFound(dir.to_path_buf()))
        }
    }
}

/// Sorted names of all frame files in `dir` that follow `naming`.
pub fn frame_file_names(dir: &Path, naming: &FrameNaming) -> CoreResult<Vec<String>> {
    let mut names: Vec<String> = file_names(dir)?
        .into_iter()
        .filter(|name| naming.parse_index(name).is_some())
        .collect();
    names.sort();
    Ok(names)
}

/// Frame number of the first extracted frame in `dir`.
///
/// Frame file names are sorted lexicographically and the stem of the first
/// one is parsed as an integer.
pub fn first_frame_index(dir: &Path, naming: &FrameNaming) -> CoreResult<u64> {
    let names = frame_file_names(dir, naming)?;
    names
        .first()
        .and_then(|name| naming.parse_index(name))
        .ok_or_else(|| no_frames(dir, naming))
}

/// Number of frame files in `dir` that follow `naming`.
pub fn count_frames_in_dir(dir: &Path, naming: &FrameNaming) -> CoreResult<usize> {
    let count = frame_file_names(dir, naming)?.len();
    if count == 0 {
        return Err(no_frames(dir, naming));
    }
    Ok(count)
}

/// Directory the decoder writes frames into for `source`.
///
/// If `source` is a directory the frames go into a subdirectory of it,
/// otherwise into a subdirectory next to the movie file. The name comes from
/// `config.frame_dir_name`, so the location is the same on every run.
pub fn frame_dir_for(source: &Path, config: &DetectorConfig) -> PathBuf {
    let root = if source.is_dir() {
        source
    } else {
        source.parent().unwrap_or_else(|| Path::new("."))
    };
    root.join(&config.frame_dir_name)
}

fn no_frames(dir: &Path, naming: &FrameNaming) -> CoreError {
    log::error!(
        "No frames matching {} found in {}",
        naming.describe(),
        dir.display()
    );
    CoreError::NoFramesFound {
        dir: dir.to_path_buf(),
        pattern: naming.describe(),
    }
}

fn file_names(dir: &Path) -> CoreResult<Vec<String>> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        CoreError::PathError(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let names = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !path.is_file() {
                return None;
            }
            path.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .collect();
    Ok(names)
}
