// ============================================================================
// scenecut-core/src/histogram.rs
// ============================================================================
//
// HISTOGRAM EXTRACTION: Per-Frame Color Histograms
//
// Reads numbered frame images from disk in frame order and turns each one
// into a fixed-length feature vector: three per-channel histograms over
// `bins` equal-width buckets spanning [0, 256), concatenated as R, G, B.
//
// KEY COMPONENTS:
// - color_histogram: Histogram of a single decoded image
// - HistogramMatrix: Rows of equal-width histogram vectors in frame order
// - HistogramExtractor: Loads frame files and builds the matrix
//
// Every frame is required. A missing or undecodable file aborts extraction.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, error};

use crate::config::{CHANNELS, DetectorConfig, FrameNaming};
use crate::error::{CoreError, CoreResult};

/// Computes the concatenated R, G, B histogram of an image.
///
/// Each channel gets `bins` equal-width buckets over [0, 256); a channel value
/// `v` lands in bucket `v * bins / 256`. The result has `3 * bins` entries.
pub fn color_histogram(image: &RgbImage, bins: usize) -> CoreResult<Vec<f64>> {
    check_bins(bins)?;

    let mut counts = vec![0u64; CHANNELS * bins];
    for pixel in image.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            let bucket = usize::from(value) * bins / 256;
            counts[channel * bins + bucket] += 1;
        }
    }

    Ok(counts.into_iter().map(|count| count as f64).collect())
}

fn check_bins(bins: usize) -> CoreResult<()> {
    if (1..=256).contains(&bins) {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "bins must be between 1 and 256, got {bins}"
        )))
    }
}

/// Histogram vectors of a run, one row per frame, all of the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramMatrix {
    width: usize,
    rows: Vec<Vec<f64>>,
}

impl HistogramMatrix {
    /// Creates an empty matrix whose rows will have `width` values.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Builds a matrix from rows, checking that they all have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::new(width);
        for row in rows {
            matrix.push(row)?;
        }
        Ok(matrix)
    }

    /// Appends a row. Its length must equal the matrix width.
    pub fn push(&mut self, row: Vec<f64>) -> CoreResult<()> {
        if row.len() != self.width {
            return Err(CoreError::DimensionMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends all rows of `other`, in order.
    ///
    /// An empty matrix adopts the width of the first non-empty one appended
    /// to it.
    pub fn append(&mut self, other: HistogramMatrix) -> CoreResult<()> {
        if other.rows.is_empty() {
            return Ok(());
        }
        if self.rows.is_empty() {
            self.width = other.width;
        }
        if other.width != self.width {
            return Err(CoreError::DimensionMismatch {
                expected: self.width,
                actual: other.width,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Number of values per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (frames).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Loads numbered frame files and computes their histograms in frame order.
#[derive(Debug, Clone)]
pub struct HistogramExtractor {
    naming: FrameNaming,
    bins: usize,
}

impl HistogramExtractor {
    pub fn new(naming: FrameNaming, bins: usize) -> CoreResult<Self> {
        check_bins(bins)?;
        Ok(Self { naming, bins })
    }

    /// Creates an extractor from the naming and bin count of a configuration.
    pub fn from_config(config: &DetectorConfig) -> CoreResult<Self> {
        Self::new(config.naming.clone(), config.bins)
    }

    /// Width of the rows this extractor produces.
    pub fn histogram_width(&self) -> usize {
        CHANNELS * self.bins
    }

    /// Path of the file holding the given frame number.
    pub fn frame_path(&self, frames_dir: &Path, frame: u64) -> PathBuf {
        frames_dir.join(self.naming.file_name(frame))
    }

    /// Decodes one frame file and returns its histogram.
    pub fn histogram_for_file(&self, path: &Path) -> CoreResult<Vec<f64>> {
        let image = image::open(path).map_err(|source| {
            error!("Failed to read frame {}: {}", path.display(), source);
            CoreError::FrameRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        color_histogram(&image.to_rgb8(), self.bins)
    }

    /// Builds the histogram matrix for frames `first_frame .. first_frame + count`.
    pub fn extract(
        &self,
        frames_dir: &Path,
        count: usize,
        first_frame: u64,
    ) -> CoreResult<HistogramMatrix> {
        self.extract_with_progress(frames_dir, count, first_frame, |_, _| {})
    }

    /// Same as [`extract`](Self::extract), calling `progress(done, total)` after each frame.
    pub fn extract_with_progress<F>(
        &self,
        frames_dir: &Path,
        count: usize,
        first_frame: u64,
        mut progress: F,
    ) -> CoreResult<HistogramMatrix>
    where
        F: FnMut(usize, usize),
    {
        debug!(
            "Extracting {} histograms ({} bins) from {} starting at frame {}",
            count,
            self.bins,
            frames_dir.display(),
            first_frame
        );

        let mut matrix = HistogramMatrix::new(self.histogram_width());
        for offset in 0..count {
            let path = self.frame_path(frames_dir, first_frame + offset as u64);
            matrix.push(self.histogram_for_file(&path)?)?;
            progress(offset + 1, count);
        }
        Ok(matrix)
    }
}
