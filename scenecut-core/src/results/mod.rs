// ============================================================================
// scenecut-core/src/results/mod.rs
// ============================================================================
//
// RESULT ASSEMBLY: Bundling, Merging and Normalizing Detection Results
//
// A ResultBundle holds the histograms, the diff signal and the detected shot
// indices of one run (or of one chunk of a run). Bundles for consecutive
// frame ranges merge by concatenation along the frame axis.
//
// KEY COMPONENTS:
// - ResultBundle: Immutable per-run aggregate
// - normalize: Diff values relative to the run maximum
// - ShotRecord: One output row per shot
// - RunSummary: Serializable overview written as JSON
//
// Output files are handled by the writer submodule.

mod writer;

use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::error::{CoreError, CoreResult};
use crate::histogram::HistogramMatrix;

pub use writer::{
    OutputPaths, read_shot_list, read_shot_table, write_outputs, write_shot_list,
    write_shot_table, write_summary_json,
};

/// Divides every value by the largest one.
///
/// A signal whose maximum is zero (a perfectly uniform video) has no
/// meaningful relative strength and yields `CoreError::DegenerateSignal`
/// instead of NaNs.
pub fn normalize(diffs: &[f64]) -> CoreResult<Vec<f64>> {
    let max = diffs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if diffs.is_empty() {
        return Err(CoreError::DegenerateSignal(
            "cannot normalize an empty diff signal".to_string(),
        ));
    }
    if max == 0.0 || !max.is_finite() {
        return Err(CoreError::DegenerateSignal(format!(
            "maximum diff is {max} across {} frames",
            diffs.len()
        )));
    }
    Ok(diffs.iter().map(|d| d / max).collect())
}

/// One shot: its frame position, normalized and raw diff, and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub frame: usize,
    pub normalized_diff: f64,
    pub raw_diff: f64,
    pub histogram: Vec<f64>,
}

/// Histograms, diff signal and shot indices of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBundle {
    histograms: HistogramMatrix,
    diffs: Vec<f64>,
    shots: Vec<usize>,
}

impl ResultBundle {
    /// Assembles a bundle.
    ///
    /// The diff signal must have one value per histogram row and every shot
    /// index must lie in `[0, frame_count)`. Shots are stored sorted and
    /// de-duplicated.
    pub fn new(
        histograms: HistogramMatrix,
        diffs: Vec<f64>,
        mut shots: Vec<usize>,
    ) -> CoreResult<Self> {
        if diffs.len() != histograms.len() {
            return Err(CoreError::InvalidInput(format!(
                "diff signal has {} values for {} histogram rows",
                diffs.len(),
                histograms.len()
            )));
        }
        if let Some(&bad) = shots.iter().find(|&&shot| shot >= diffs.len()) {
            return Err(CoreError::InvalidInput(format!(
                "shot index {bad} is outside [0, {})",
                diffs.len()
            )));
        }
        shots.sort_unstable();
        shots.dedup();
        Ok(Self {
            histograms,
            diffs,
            shots,
        })
    }

    /// Concatenates bundles of consecutive frame ranges.
    ///
    /// Histogram rows and diff values are appended in order. Shot indices of
    /// each part are local to that part and get re-based by the number of
    /// frames in the parts before it.
    pub fn merge<I>(parts: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = ResultBundle>,
    {
        let mut histograms = HistogramMatrix::default();
        let mut diffs = Vec::new();
        let mut shots = Vec::new();

        for part in parts {
            let offset = diffs.len();
            histograms.append(part.histograms)?;
            diffs.extend(part.diffs);
            shots.extend(part.shots.into_iter().map(|shot| shot + offset));
        }

        Self::new(histograms, diffs, shots)
    }

    /// Splits the bundle into histograms, diffs and shots.
    pub fn into_parts(self) -> (HistogramMatrix, Vec<f64>, Vec<usize>) {
        (self.histograms, self.diffs, self.shots)
    }

    /// Number of frames covered.
    pub fn frame_count(&self) -> usize {
        self.diffs.len()
    }

    pub fn histograms(&self) -> &HistogramMatrix {
        &self.histograms
    }

    pub fn diffs(&self) -> &[f64] {
        &self.diffs
    }

    /// Sorted shot indices.
    pub fn shots(&self) -> &[usize] {
        &self.shots
    }

    /// Largest diff value, or `None` for an empty bundle.
    pub fn max_diff(&self) -> Option<f64> {
        self.diffs.iter().copied().reduce(f64::max)
    }

    /// Diff signal normalized by its maximum.
    pub fn normalized_diffs(&self) -> CoreResult<Vec<f64>> {
        normalize(&self.diffs)
    }

    /// One record per shot, in ascending frame order.
    pub fn shot_records(&self) -> CoreResult<Vec<ShotRecord>> {
        if self.shots.is_empty() {
            return Ok(Vec::new());
        }
        let norms = self.normalized_diffs()?;
        self.shots
            .iter()
            .map(|&shot| {
                let histogram = self
                    .histograms
                    .row(shot)
                    .ok_or_else(|| {
                        CoreError::InvalidInput(format!("no histogram row for shot {shot}"))
                    })?
                    .to_vec();
                Ok(ShotRecord {
                    frame: shot,
                    normalized_diff: norms[shot],
                    raw_diff: self.diffs[shot],
                    histogram,
                })
            })
            .collect()
    }

    /// Serializable overview of the bundle.
    pub fn summary(&self, config: &DetectorConfig) -> RunSummary {
        RunSummary {
            frame_count: self.frame_count(),
            shot_count: self.shots.len(),
            shots: self.shots.clone(),
            max_diff: self.max_diff(),
            histogram_width: self.histograms.width(),
            config: config.clone(),
        }
    }
}

/// JSON run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frame_count: usize,
    pub shot_count: usize,
    pub shots: Vec<usize>,
    pub max_diff: Option<f64>,
    pub histogram_width: usize,
    pub config: DetectorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> HistogramMatrix {
        HistogramMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[2.0, 4.0, 8.0]).unwrap(), vec![0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_degenerate() {
        let err = normalize(&[0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, CoreError::DegenerateSignal(_)));
        assert!(normalize(&[]).is_err());
    }

    #[test]
    fn test_new_sorts_and_validates_shots() {
        let bundle = ResultBundle::new(
            matrix(vec![vec![1.0], vec![2.0], vec![3.0]]),
            vec![1.0, 1.0, 1.0],
            vec![2, 0, 2],
        )
        .unwrap();
        assert_eq!(bundle.shots(), &[0, 2]);

        let err = ResultBundle::new(matrix(vec![vec![1.0]]), vec![1.0], vec![1]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = ResultBundle::new(matrix(vec![vec![1.0]]), vec![], vec![]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_merge_rebases_shots() {
        let first = ResultBundle::new(
            matrix(vec![vec![0.0, 1.0], vec![5.0, 1.0]]),
            vec![1.0, 5.0],
            vec![0, 1],
        )
        .unwrap();
        let second = ResultBundle::new(
            matrix(vec![vec![5.0, 1.0], vec![0.0, 0.0], vec![9.0, 9.0]]),
            vec![0.0, 5.0, 9.0],
            vec![0, 2],
        )
        .unwrap();

        let merged = ResultBundle::merge([first, second]).unwrap();
        assert_eq!(merged.frame_count(), 5);
        assert_eq!(merged.diffs(), &[1.0, 5.0, 0.0, 5.0, 9.0]);
        assert_eq!(merged.shots(), &[0, 1, 2, 4]);
        assert_eq!(merged.histograms().row(4), Some(&[9.0, 9.0][..]));
    }

    #[test]
    fn test_merge_rejects_width_mismatch() {
        let first = ResultBundle::new(matrix(vec![vec![0.0, 1.0]]), vec![1.0], vec![0]).unwrap();
        let second = ResultBundle::new(matrix(vec![vec![0.0]]), vec![0.0], vec![0]).unwrap();
        assert!(matches!(
            ResultBundle::merge([first, second]),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_shot_records() {
        let bundle = ResultBundle::new(
            matrix(vec![vec![2.0, 0.0], vec![2.0, 0.0], vec![0.0, 8.0]]),
            vec![2.0, 0.0, 8.0],
            vec![0, 2],
        )
        .unwrap();
        let records = bundle.shot_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].frame, 0);
        assert_eq!(records[0].normalized_diff, 0.25);
        assert_eq!(records[1].raw_diff, 8.0);
        assert_eq!(records[1].histogram, vec![0.0, 8.0]);
    }

    #[test]
    fn test_summary_reports_shots() {
        let bundle = ResultBundle::new(
            matrix(vec![vec![1.0], vec![4.0]]),
            vec![1.0, 3.0],
            vec![0, 1],
        )
        .unwrap();
        let summary = bundle.summary(&DetectorConfig::default());
        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.shot_count, 2);
        assert_eq!(summary.max_diff, Some(3.0));
        assert_eq!(summary.histogram_width, 1);
    }
}
