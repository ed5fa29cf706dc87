//! Minimal comma-delimited text reading and writing.
//!
//! Covers what the shot table and ground-truth files need: one record per
//! line, comma separators, optional double quotes around a field (with `""`
//! as an escaped quote). Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// A parsed record with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Reads every non-blank line of `path` as a record.
pub fn read_records(path: &Path) -> CoreResult<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() {
            continue;
        }
        let fields = split_line(trimmed).map_err(|message| CoreError::CsvParse {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        })?;
        records.push(Record {
            line: index + 1,
            fields,
        });
    }
    Ok(records)
}

/// Writes rows as comma-separated lines with no header.
pub fn write_rows<I, R>(path: &Path, rows: I) -> CoreResult<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        let line = row.into_iter().collect::<Vec<_>>().join(",");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field.trim().to_string());
    Ok(fields)
}
