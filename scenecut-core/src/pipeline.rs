// ============================================================================
// scenecut-core/src/pipeline.rs
// ============================================================================
//
// PIPELINE: Movie to Shot Boundaries
//
// Drives the detection steps in order:
//
//   movie -> frame files -> histogram matrix -> diff signal -> shots -> bundle
//
// The decoder is injected as a `FrameExtractor`, so tests run the whole flow
// with `FakeFrameExtractor`. Everything here is synchronous and reads frames
// strictly in order.
//
// CHUNKED MODE:
// With `chunk_size` set, histograms are extracted and diffed one chunk at a
// time. The diff state carries across chunk boundaries and shot detection
// runs on the merged signal, so the result equals the unchunked one.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use tempfile::TempDir;

use crate::config::DetectorConfig;
use crate::diff::{StreamingDiff, hist_diffs};
use crate::discovery;
use crate::error::{CoreError, CoreResult};
use crate::external::FrameExtractor;
use crate::histogram::{HistogramExtractor, HistogramMatrix};
use crate::peaks::{ThresholdStrategy, detect_shots};
use crate::results::ResultBundle;
use crate::temp_files;

/// Where decoded frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStorage {
    /// `<movie dir>/<frame_dir_name>`, the same on every run
    #[default]
    BesideMovie,
    /// A scratch directory removed when the run finishes
    Scratch,
}

/// Outcome of [`process_movie`].
#[derive(Debug)]
pub struct MovieRun {
    /// The movie that was decoded
    pub movie: PathBuf,
    /// Directory the frames were decoded into
    pub frames_dir: PathBuf,
    /// Frame count reported by the decoder before extraction
    pub reported_frames: u64,
    /// Number of the first frame file
    pub first_frame: u64,
    /// Detection results
    pub bundle: ResultBundle,
    /// Whether the frame files were removed after analysis
    pub frames_deleted: bool,
}

/// Runs the detection steps on frames already present in `frames_dir`.
///
/// Reads frames `first_frame .. first_frame + count` and calls
/// `progress(done, total)` after each one.
pub fn analyze_frames<F>(
    config: &DetectorConfig,
    frames_dir: &Path,
    count: usize,
    first_frame: u64,
    mut progress: F,
) -> CoreResult<ResultBundle>
where
    F: FnMut(usize, usize),
{
    config.validate()?;
    if count == 0 {
        return Err(CoreError::NoFramesFound {
            dir: frames_dir.to_path_buf(),
            pattern: config.naming.describe(),
        });
    }

    let extractor = HistogramExtractor::from_config(config)?;
    let strategy = config.threshold_strategy();

    let bundle = match config.chunk_size {
        None => {
            let matrix =
                extractor.extract_with_progress(frames_dir, count, first_frame, &mut progress)?;
            analyze_histograms(matrix, strategy.as_ref())?
        }
        Some(chunk_size) => analyze_in_chunks(
            &extractor,
            strategy.as_ref(),
            frames_dir,
            count,
            first_frame,
            chunk_size,
            &mut progress,
        )?,
    };

    info!(
        "Detected {} shots in {} frames",
        bundle.shots().len(),
        bundle.frame_count()
    );
    Ok(bundle)
}

/// Diff signal and shot detection for a complete histogram matrix.
pub fn analyze_histograms(
    histograms: HistogramMatrix,
    strategy: &dyn ThresholdStrategy,
) -> CoreResult<ResultBundle> {
    let diffs = hist_diffs(&histograms)?;
    let shots = detect_shots(&diffs, strategy);
    ResultBundle::new(histograms, diffs, shots)
}

fn analyze_in_chunks<F>(
    extractor: &HistogramExtractor,
    strategy: &dyn ThresholdStrategy,
    frames_dir: &Path,
    count: usize,
    first_frame: u64,
    chunk_size: usize,
    progress: &mut F,
) -> CoreResult<ResultBundle>
where
    F: FnMut(usize, usize),
{
    let mut streaming = StreamingDiff::new(extractor.histogram_width());
    let mut parts = Vec::new();

    for start in (0..count).step_by(chunk_size.max(1)) {
        let len = chunk_size.min(count - start);
        debug!("Analyzing chunk of {} frames starting at position {}", len, start);

        let matrix = extractor.extract_with_progress(
            frames_dir,
            len,
            first_frame + start as u64,
            |done, _| progress(start + done, count),
        )?;
        let diffs = matrix
            .rows()
            .map(|row| streaming.push(row))
            .collect::<CoreResult<Vec<f64>>>()?;
        parts.push(ResultBundle::new(matrix, diffs, Vec::new())?);
    }

    let (histograms, diffs, _) = ResultBundle::merge(parts)?.into_parts();
    let shots = detect_shots(&diffs, strategy);
    ResultBundle::new(histograms, diffs, shots)
}

/// Decodes a movie and detects its shot boundaries.
///
/// `source` is either the movie file or a directory holding it. Frames are
/// decoded with `extractor` into the directory chosen by `storage`. Frames
/// written beside the movie are deleted afterwards when
/// `config.keep_frames` is false.
pub fn process_movie<E, F>(
    extractor: &E,
    source: &Path,
    config: &DetectorConfig,
    storage: FrameStorage,
    progress: F,
) -> CoreResult<MovieRun>
where
    E: FrameExtractor,
    F: FnMut(usize, usize),
{
    config.validate()?;

    let movie = resolve_movie(source, config)?;
    info!("Processing {}", movie.display());

    // Held until the end of the run; dropping it removes the frames.
    let scratch: Option<TempDir> = match storage {
        FrameStorage::Scratch => Some(temp_files::create_scratch_dir(config, "scenecut_frames_")?),
        FrameStorage::BesideMovie => None,
    };
    let frames_dir = match &scratch {
        Some(dir) => dir.path().to_path_buf(),
        None => discovery::frame_dir_for(&movie, config),
    };
    std::fs::create_dir_all(&frames_dir)?;
    // Frames left by an earlier run in the shared directory must not be
    // analyzed as part of this movie.
    let stale = temp_files::clear_frames(&frames_dir, &config.naming)?;
    if stale > 0 {
        debug!("Removed {} stale frames from {}", stale, frames_dir.display());
    }

    let reported_frames = extractor.count_frames(&movie)?;
    debug!("Decoder reports {} frames", reported_frames);

    let written = extractor.extract_frames(&movie, &frames_dir, &config.naming)?;

    let first_frame = discovery::first_frame_index(&frames_dir, &config.naming)?;
    let count = discovery::count_frames_in_dir(&frames_dir, &config.naming)?;
    if count != written {
        warn!(
            "Decoder returned {} frames but {} frame files are present",
            written, count
        );
    }
    if (count as u64) < reported_frames {
        error!(
            "Decoder reported {} frames but only {} frame files were written",
            reported_frames, count
        );
        return Err(CoreError::MissingDecoderOutput(format!(
            "{} of {} frames of {} were written to {}",
            count,
            reported_frames,
            movie.display(),
            frames_dir.display()
        )));
    }
    if count as u64 > reported_frames {
        warn!(
            "Decoder reported {} frames but {} frame files were written",
            reported_frames, count
        );
    }

    let bundle = analyze_frames(config, &frames_dir, count, first_frame, progress)?;

    let frames_deleted = match scratch {
        Some(dir) => {
            dir.close()?;
            true
        }
        None if !config.keep_frames => {
            temp_files::delete_frames(
                &frames_dir,
                &config.naming,
                first_frame,
                first_frame + count as u64,
            )?;
            true
        }
        None => false,
    };

    Ok(MovieRun {
        movie,
        frames_dir,
        reported_frames,
        first_frame,
        bundle,
        frames_deleted,
    })
}

fn resolve_movie(source: &Path, config: &DetectorConfig) -> CoreResult<PathBuf> {
    if source.is_dir() {
        discovery::find_movie_file(source, config)
    } else if source.is_file() {
        Ok(source.to_path_buf())
    } else {
        error!("Movie source {} does not exist", source.display());
        Err(CoreError::MovieNotFound(source.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::FixedThreshold;

    #[test]
    fn test_analyze_histograms_end_to_end() {
        let histograms = HistogramMatrix::from_rows(vec![
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![9.0, 9.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        ])
        .unwrap();

        let bundle = analyze_histograms(histograms, &FixedThreshold(4.0)).unwrap();
        assert_eq!(bundle.diffs(), &[0.0, 0.0, 9.0, 9.0, 0.0]);
        assert_eq!(bundle.shots(), &[0, 2]);
    }

    #[test]
    fn test_analyze_frames_rejects_zero_count() {
        let dir = tempfile::tempdir().unwrap();
        let result = analyze_frames(&DetectorConfig::default(), dir.path(), 0, 1, |_, _| {});
        assert!(matches!(result, Err(CoreError::NoFramesFound { .. })));
    }

    #[test]
    fn test_resolve_missing_movie() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_movie(&dir.path().join("absent.mp4"), &DetectorConfig::default());
        assert!(matches!(result, Err(CoreError::MovieNotFound(_))));
    }
}
