//! Frame-to-frame histogram difference signal.
//!
//! The distance between consecutive histograms is the Chebyshev distance
//! (largest absolute per-bin difference). A synthetic all-zero histogram
//! precedes frame 0, so the signal has exactly one value per frame.

use crate::error::{CoreError, CoreResult};
use crate::histogram::HistogramMatrix;

/// Largest absolute componentwise difference between two vectors.
pub fn chebyshev(a: &[f64], b: &[f64]) -> CoreResult<f64> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}

/// Computes the diff signal one histogram at a time.
///
/// The first row pushed is compared against zeros. Only the previous row is
/// kept, so callers can stream frames instead of holding the whole matrix.
#[derive(Debug, Clone)]
pub struct StreamingDiff {
    previous: Vec<f64>,
}

impl StreamingDiff {
    /// Starts a signal for rows of `width` values.
    pub fn new(width: usize) -> Self {
        Self {
            previous: vec![0.0; width],
        }
    }

    /// Returns the distance from the previous row and remembers `row`.
    pub fn push(&mut self, row: &[f64]) -> CoreResult<f64> {
        let distance = chebyshev(&self.previous, row)?;
        self.previous.clear();
        self.previous.extend_from_slice(row);
        Ok(distance)
    }
}

/// Diff signal of a histogram matrix, one value per row.
pub fn hist_diffs(histograms: &HistogramMatrix) -> CoreResult<Vec<f64>> {
    let mut stream = StreamingDiff::new(histograms.width());
    histograms.rows().map(|row| stream.push(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshev(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert_eq!(chebyshev(&[0.0, 0.0, 0.0], &[5.0, 0.0, 0.0]).unwrap(), 5.0);
        assert_eq!(chebyshev(&[4.0, -1.0], &[1.0, 6.0]).unwrap(), 7.0);
        assert_eq!(chebyshev(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_chebyshev_length_mismatch() {
        assert!(matches!(
            chebyshev(&[1.0], &[1.0, 2.0]),
            Err(CoreError::DimensionMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_hist_diffs_preserves_length() {
        for n in 0..6 {
            let rows: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, (i * i) as f64]).collect();
            let matrix = HistogramMatrix::from_rows(rows).unwrap();
            assert_eq!(hist_diffs(&matrix).unwrap().len(), n);
        }
    }

    #[test]
    fn test_hist_diffs_first_frame_against_zero() {
        let matrix = HistogramMatrix::from_rows(vec![
            vec![3.0, 7.0],
            vec![3.0, 7.0],
            vec![10.0, 1.0],
        ])
        .unwrap();
        assert_eq!(hist_diffs(&matrix).unwrap(), vec![7.0, 0.0, 7.0]);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let rows = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![9.0, 9.0], vec![0.0, 0.0]];
        let matrix = HistogramMatrix::from_rows(rows.clone()).unwrap();

        let mut stream = StreamingDiff::new(2);
        let streamed: Vec<f64> = rows.iter().map(|r| stream.push(r).unwrap()).collect();
        assert_eq!(streamed, hist_diffs(&matrix).unwrap());
    }
}
