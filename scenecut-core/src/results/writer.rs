//! Output files for a finished run.
//!
//! - shot list: sorted shot indices, one per line, zero-padded to 6 digits
//! - shot table: `frame,normalized,raw,bin...` per shot, no header
//! - summary: pretty-printed JSON `RunSummary`

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{ResultBundle, RunSummary, ShotRecord};
use crate::config::DetectorConfig;
use crate::delimited;
use crate::error::{CoreError, CoreResult};

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub shot_list: PathBuf,
    pub shot_table: PathBuf,
}

/// Writes shot indices sorted ascending, one `{:06}` value per line.
pub fn write_shot_list(shots: &[usize], path: &Path) -> CoreResult<()> {
    let mut sorted = shots.to_vec();
    sorted.sort_unstable();

    let mut writer = BufWriter::new(File::create(path)?);
    for shot in &sorted {
        writeln!(writer, "{shot:06}")?;
    }
    writer.flush()?;

    debug!("Wrote {} shot indices to {}", sorted.len(), path.display());
    Ok(())
}

/// Reads a shot list written by [`write_shot_list`].
pub fn read_shot_list(path: &Path) -> CoreResult<Vec<usize>> {
    let reader = BufReader::new(File::open(path)?);
    let mut shots = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let shot = value.parse::<usize>().map_err(|e| CoreError::CsvParse {
            path: path.to_path_buf(),
            line: index + 1,
            message: format!("invalid shot index '{value}': {e}"),
        })?;
        shots.push(shot);
    }
    Ok(shots)
}

/// Writes one comma-delimited row per shot: frame, normalized diff, raw
/// diff, then the histogram bins.
pub fn write_shot_table(bundle: &ResultBundle, path: &Path) -> CoreResult<()> {
    let records = bundle.shot_records()?;
    let rows = records.iter().map(|record| {
        [
            record.frame.to_string(),
            record.normalized_diff.to_string(),
            record.raw_diff.to_string(),
        ]
        .into_iter()
        .chain(record.histogram.iter().map(f64::to_string))
        .collect::<Vec<_>>()
    });
    delimited::write_rows(path, rows)?;

    debug!("Wrote {} shot rows to {}", records.len(), path.display());
    Ok(())
}

/// Reads a shot table written by [`write_shot_table`].
pub fn read_shot_table(path: &Path) -> CoreResult<Vec<ShotRecord>> {
    let parse_error = |line: usize, message: String| CoreError::CsvParse {
        path: path.to_path_buf(),
        line,
        message,
    };

    delimited::read_records(path)?
        .into_iter()
        .map(|record| {
            if record.fields.len() < 3 {
                return Err(parse_error(
                    record.line,
                    format!("expected at least 3 fields, found {}", record.fields.len()),
                ));
            }
            let frame = parse_frame(&record.fields[0])
                .ok_or_else(|| parse_error(record.line, format!("invalid frame '{}'", record.fields[0])))?;
            let values = record.fields[1..]
                .iter()
                .map(|field| {
                    field
                        .parse::<f64>()
                        .map_err(|e| parse_error(record.line, format!("invalid number '{field}': {e}")))
                })
                .collect::<CoreResult<Vec<f64>>>()?;

            Ok(ShotRecord {
                frame,
                normalized_diff: values[0],
                raw_diff: values[1],
                histogram: values[2..].to_vec(),
            })
        })
        .collect()
}

/// Frame numbers are written as integers but tolerate a `.0` float form.
fn parse_frame(field: &str) -> Option<usize> {
    if let Ok(frame) = field.parse::<usize>() {
        return Some(frame);
    }
    let value = field.parse::<f64>().ok()?;
    (value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
}

/// Writes the JSON run summary.
pub fn write_summary_json(summary: &RunSummary, path: &Path) -> CoreResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Writes the shot list and the shot table into `output_dir` using the
/// configured file names.
pub fn write_outputs(
    bundle: &ResultBundle,
    output_dir: &Path,
    config: &DetectorConfig,
) -> CoreResult<OutputPaths> {
    fs::create_dir_all(output_dir)?;

    let paths = OutputPaths {
        shot_list: output_dir.join(&config.output_txt_name),
        shot_table: output_dir.join(&config.output_csv_name),
    };
    write_shot_list(bundle.shots(), &paths.shot_list)?;
    write_shot_table(bundle, &paths.shot_table)?;

    info!(
        "Wrote {} shots to {} and {}",
        bundle.shots().len(),
        paths.shot_list.display(),
        paths.shot_table.display()
    );
    Ok(paths)
}
