//! Benchmark measurement table.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a benchmark table from disk.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single benchmark run at a fixed node count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    /// Number of compute nodes used for the run.
    pub nodes: u32,
    /// Model throughput in simulated years per wall-clock day.
    pub years_per_day: f64,
    /// Wall-clock seconds needed to simulate one model day.
    pub seconds_per_day: f64,
}

/// An ordered set of benchmark runs.
///
/// The first sample is the scaling baseline; callers that want a different
/// baseline must reorder the samples before computing metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    pub samples: Vec<BenchmarkSample>,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::eiger_oct2025()
    }
}

impl BenchmarkTable {
    /// Measured CESM3 runs on CSCS Eiger, October 2025.
    pub fn eiger_oct2025() -> Self {
        Self {
            samples: vec![
                BenchmarkSample { nodes: 4, years_per_day: 4.51, seconds_per_day: 52.485 },
                BenchmarkSample { nodes: 6, years_per_day: 6.67, seconds_per_day: 35.502 },
                BenchmarkSample { nodes: 8, years_per_day: 8.35, seconds_per_day: 28.363 },
                BenchmarkSample { nodes: 12, years_per_day: 11.16, seconds_per_day: 21.209 },
            ],
        }
    }

    /// Loads a table from a JSON file containing an array of samples.
    pub fn from_json_file(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path)?;
        let samples: Vec<BenchmarkSample> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_table_shape() {
        let table = BenchmarkTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.samples[0].nodes, 4);
        assert_eq!(table.samples[3].nodes, 12);
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(
            &path,
            r#"[{"nodes": 2, "years_per_day": 1.5, "seconds_per_day": 10.0}]"#,
        )
        .unwrap();

        let table = BenchmarkTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.samples[0].nodes, 2);
        assert_eq!(table.samples[0].years_per_day, 1.5);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = BenchmarkTable::from_json_file(&path);
        assert!(matches!(result, Err(TableError::Json(_))));
    }
}
