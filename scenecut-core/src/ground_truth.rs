// ============================================================================
// scenecut-core/src/ground_truth.rs
// ============================================================================
//
// GROUND TRUTH: Reference Shot Lists and Detection Scoring
//
// Ground-truth files are comma-delimited with a header row. Shot start frames
// are read from the `start_frame` column, or from `s_frame` when the file
// uses the short name. Values are coerced to integers, so "12" and "12.0"
// are the same frame.
//
// KEY COMPONENTS:
// - read_ground_truth_csv: One file to a list of start frames
// - load_ground_truth_dir: Every `*.csv` in a directory, keyed by file stem
// - undo_ground_offset: Shift a list so its smallest frame becomes 0
// - evaluate: Match detected shots against ground truth within a tolerance

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::delimited;
use crate::error::{CoreError, CoreResult};

/// Accepted start-frame column names, in order of preference.
pub const START_FRAME_COLUMNS: &[&str] = &["start_frame", "s_frame"];

/// Reads the start frames listed in a ground-truth file.
///
/// # Returns
///
/// * `Ok(Vec<i64>)` - Start frames in file order
/// * `Err(CoreError::MalformedCsv)` - If neither start-frame column exists
/// * `Err(CoreError::CsvParse)` - If a value is not a number
pub fn read_ground_truth_csv(path: &Path) -> CoreResult<Vec<i64>> {
    let mut records = delimited::read_records(path)?.into_iter();

    let header = records.next().ok_or_else(|| missing_column(path))?;
    let column = START_FRAME_COLUMNS
        .iter()
        .find_map(|name| header.fields.iter().position(|field| field == name))
        .ok_or_else(|| missing_column(path))?;

    let frames = records
        .map(|record| {
            let field = record.fields.get(column).map(String::as_str).unwrap_or("");
            parse_frame(field).ok_or_else(|| CoreError::CsvParse {
                path: path.to_path_buf(),
                line: record.line,
                message: format!("invalid start frame '{field}'"),
            })
        })
        .collect::<CoreResult<Vec<i64>>>()?;

    debug!("Read {} ground-truth shots from {}", frames.len(), path.display());
    Ok(frames)
}

/// Loads every `*.csv` file in `dir`, keyed by file stem.
pub fn load_ground_truth_dir(dir: &Path) -> CoreResult<BTreeMap<String, Vec<i64>>> {
    let mut all_shots = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !path.is_file() || !is_csv {
            continue;
        }
        let Some(title) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        all_shots.insert(title.to_string(), read_ground_truth_csv(&path)?);
    }
    debug!("Loaded ground truth for {} titles from {}", all_shots.len(), dir.display());
    Ok(all_shots)
}

/// Subtracts the smallest value from every value.
pub fn undo_ground_offset(frames: &[i64]) -> Vec<i64> {
    match frames.iter().min() {
        Some(&offset) => frames.iter().map(|frame| frame - offset).collect(),
        None => Vec::new(),
    }
}

/// Detection scores against a ground-truth list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Scores detected shots against ground truth.
///
/// Each ground-truth frame, in ascending order, is matched to the closest
/// unmatched detection at most `tolerance` frames away (the earlier frame on
/// ties). Every detection and every ground-truth frame is used at most once.
/// Precision, recall and F1 are 0 when their denominators are 0.
pub fn evaluate(detected: &[i64], truth: &[i64], tolerance: u64) -> Evaluation {
    let mut detected = detected.to_vec();
    detected.sort_unstable();
    let mut truth = truth.to_vec();
    truth.sort_unstable();

    let mut used = vec![false; detected.len()];
    let mut true_positives = 0;

    for &frame in &truth {
        let best = detected
            .iter()
            .enumerate()
            .filter(|&(i, &d)| !used[i] && d.abs_diff(frame) <= tolerance)
            .min_by_key(|&(_, &d)| (d.abs_diff(frame), d))
            .map(|(i, _)| i);
        if let Some(i) = best {
            used[i] = true;
            true_positives += 1;
        }
    }

    let false_positives = detected.len() - true_positives;
    let false_negatives = truth.len() - true_positives;
    let precision = ratio(true_positives, detected.len());
    let recall = ratio(true_positives, truth.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Evaluation {
        true_positives,
        false_positives,
        false_negatives,
        precision,
        recall,
        f1,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Integer or integral-looking float; fractional values truncate toward zero.
fn parse_frame(field: &str) -> Option<i64> {
    let field = field.trim();
    if let Ok(frame) = field.parse::<i64>() {
        return Some(frame);
    }
    let value = field.parse::<f64>().ok()?;
    value.is_finite().then_some(value.trunc() as i64)
}

fn missing_column(path: &Path) -> CoreError {
    let column = START_FRAME_COLUMNS.join("|");
    error!("Ground-truth file {} has no {} column", path.display(), column);
    CoreError::MalformedCsv {
        path: path.to_path_buf(),
        column,
    }
}
