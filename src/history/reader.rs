//! Discovery and decoding of CESM history files.
//!
//! History files are classic-format NetCDF, one file per simulated month,
//! named `<case>.<stream tag>.YYYY-MM.nc`. Each requested variable is
//! reduced to the arithmetic mean of its finite values, giving one scalar
//! sample per month.

use std::fs;
use std::path::{Path, PathBuf};

use netcdf3::{DataVector, FileReader};
use thiserror::Error;

use super::{Dataset, MonthStamp};

/// Errors that can occur while reading history files.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {detail}")]
    Decode { path: PathBuf, detail: String },
}

/// Lists history files in `dir` belonging to the given stream.
///
/// Matches `*.nc` entries whose name contains `.{file_tag}.`, sorted by
/// filename (CESM's zero-padded dates make that chronological), truncated
/// to `max_files`.
pub fn discover_history_files(
    dir: &Path,
    file_tag: &str,
    max_files: usize,
) -> Result<Vec<PathBuf>, HistoryError> {
    let tag = format!(".{}.", file_tag);
    let entries = fs::read_dir(dir).map_err(|source| HistoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| HistoryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if name.ends_with(".nc") && name.contains(&tag) {
            files.push(path);
        }
    }

    files.sort();
    files.truncate(max_files);
    Ok(files)
}

/// Extracts the `YYYY-MM` date token from a history filename.
///
/// Returns `None` when the final dot-separated token before `.nc` is not a
/// plain year-month pair (daily streams carry `YYYY-MM-DD` and are not
/// monthly history).
pub fn parse_month_stamp(filename: &str) -> Option<MonthStamp> {
    let stem = filename.strip_suffix(".nc")?;
    let token = stem.rsplit('.').next()?;
    let (year, month) = token.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(MonthStamp { year, month })
}

/// Loads the requested variables from an ordered list of monthly files.
///
/// Each file contributes at most one sample per variable. Variables absent
/// from the files are simply absent from the returned dataset. Files whose
/// names carry no date token get a positional stamp (twelve months per
/// year, starting at year 1).
pub fn load_history_files(
    files: &[PathBuf],
    variables: &[String],
) -> Result<Dataset, HistoryError> {
    let mut dataset = Dataset::new();

    for (index, path) in files.iter().enumerate() {
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_month_stamp)
            .unwrap_or(MonthStamp {
                year: (index / 12) as i32 + 1,
                month: (index % 12) as u8 + 1,
            });

        let mut reader = FileReader::open(path).map_err(|e| HistoryError::Decode {
            path: path.clone(),
            detail: e.to_string(),
        })?;

        for name in variables {
            if !reader.data_set().has_var(name) {
                continue;
            }
            let data = reader.read_var(name).map_err(|e| HistoryError::Decode {
                path: path.clone(),
                detail: e.to_string(),
            })?;
            if let Some(mean) = spatial_mean(&data) {
                dataset.push_sample(name, stamp, mean);
            }
        }
    }

    Ok(dataset)
}

/// Discovers and loads one component's history stream in a single call.
pub fn load_component(
    hist_dir: &Path,
    file_tag: &str,
    variables: &[String],
    max_files: usize,
) -> Result<Dataset, HistoryError> {
    let files = discover_history_files(hist_dir, file_tag, max_files)?;
    load_history_files(&files, variables)
}

/// Mean over the finite values of a decoded variable, or `None` when the
/// variable holds no finite value (fill values are not interpolated).
fn spatial_mean(data: &DataVector) -> Option<f64> {
    match data {
        DataVector::I8(v) => finite_mean(v.iter().map(|&x| x as f64)),
        DataVector::U8(v) => finite_mean(v.iter().map(|&x| x as f64)),
        DataVector::I16(v) => finite_mean(v.iter().map(|&x| x as f64)),
        DataVector::I32(v) => finite_mean(v.iter().map(|&x| x as f64)),
        DataVector::F32(v) => finite_mean(v.iter().map(|&x| x as f64)),
        DataVector::F64(v) => finite_mean(v.iter().copied()),
    }
}

fn finite_mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
