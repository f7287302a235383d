//! Equilibration checks over a loaded dataset.

use thiserror::Error;

use crate::history::Dataset;

use super::trend::{annual_means, fit_linear, LinearFit, TrendError};

/// Errors that can occur during an equilibration check.
#[derive(Error, Debug)]
pub enum SpinupError {
    #[error("trend threshold must be positive, got {0}")]
    InvalidThreshold(f64),
    #[error("variable {variable}: {source}")]
    Trend {
        variable: String,
        #[source]
        source: TrendError,
    },
}

/// Trend analysis for one monitored variable.
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibrationReport {
    pub variable: String,
    /// True when `|trend| < threshold`.
    pub equilibrated: bool,
    /// Fitted line over the annual means; `fit.slope` is the trend in
    /// variable units per year.
    pub fit: LinearFit,
    pub annual_means: Vec<f64>,
}

impl EquilibrationReport {
    /// Fitted trend in variable units per year.
    pub fn trend(&self) -> f64 {
        self.fit.slope
    }
}

/// Outcome of requesting one variable from the dataset.
///
/// A variable absent from the loaded history is a reportable condition,
/// not an error: it must never halt processing of subsequent variables.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableCheck {
    /// Variable present; trend analysis completed.
    Analyzed(EquilibrationReport),
    /// Variable absent from the loaded history.
    NotFound { variable: String },
}

/// Checks whether a variable has reached equilibrium.
///
/// Resamples the variable's monthly series to annual means, fits a linear
/// trend over year indices 0, 1, 2, ..., and compares the slope magnitude
/// against `threshold` (variable units per year).
pub fn check_equilibration(
    dataset: &Dataset,
    variable: &str,
    threshold: f64,
) -> Result<VariableCheck, SpinupError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(SpinupError::InvalidThreshold(threshold));
    }

    let series = match dataset.variable(variable) {
        Some(series) => series,
        None => {
            return Ok(VariableCheck::NotFound {
                variable: variable.to_string(),
            })
        }
    };

    let annual = annual_means(series);
    let fit = fit_linear(&annual).map_err(|source| SpinupError::Trend {
        variable: variable.to_string(),
        source,
    })?;

    Ok(VariableCheck::Analyzed(EquilibrationReport {
        variable: variable.to_string(),
        equilibrated: fit.slope.abs() < threshold,
        fit,
        annual_means: annual,
    }))
}

/// Checks every variable in order, one outcome per variable.
///
/// Strictly sequential; a missing variable or failed fit for one variable
/// leaves the remaining variables unaffected.
pub fn analyze_group(
    dataset: &Dataset,
    variables: &[String],
    threshold: f64,
) -> Vec<(String, Result<VariableCheck, SpinupError>)> {
    variables
        .iter()
        .map(|name| (name.clone(), check_equilibration(dataset, name, threshold)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MonthStamp;

    /// Twelve months per year, one value per year.
    fn dataset_with(name: &str, yearly: &[f64]) -> Dataset {
        let mut ds = Dataset::new();
        for (i, &value) in yearly.iter().enumerate() {
            for month in 1..=12u8 {
                ds.push_sample(name, MonthStamp { year: i as i32 + 1, month }, value);
            }
        }
        ds
    }

    #[test]
    fn test_flat_series_is_equilibrated() {
        let ds = dataset_with("TS", &[288.15; 8]);
        let check = check_equilibration(&ds, "TS", 0.01).unwrap();
        match check {
            VariableCheck::Analyzed(report) => {
                assert!(report.equilibrated);
                assert_eq!(report.trend(), 0.0);
                assert_eq!(report.annual_means.len(), 8);
            }
            VariableCheck::NotFound { .. } => panic!("TS should be present"),
        }
    }

    #[test]
    fn test_trending_series_is_not_equilibrated() {
        let yearly: Vec<f64> = (0..10).map(|y| 1.0 + 0.02 * y as f64).collect();
        let ds = dataset_with("FLNT", &yearly);
        let check = check_equilibration(&ds, "FLNT", 0.01).unwrap();
        match check {
            VariableCheck::Analyzed(report) => {
                assert!(!report.equilibrated);
                assert!((report.trend() - 0.02).abs() < 1e-9);
            }
            VariableCheck::NotFound { .. } => panic!("FLNT should be present"),
        }
    }

    #[test]
    fn test_missing_variable_is_not_found() {
        let ds = dataset_with("TS", &[1.0, 1.0]);
        let check = check_equilibration(&ds, "PRECT", 0.01).unwrap();
        assert_eq!(
            check,
            VariableCheck::NotFound { variable: "PRECT".to_string() }
        );
    }

    #[test]
    fn test_group_continues_past_missing_variable() {
        let mut ds = dataset_with("TS", &[1.0, 1.0, 1.0]);
        for (i, &value) in [2.0, 2.0, 2.0].iter().enumerate() {
            for month in 1..=12u8 {
                ds.push_sample("FLNT", MonthStamp { year: i as i32 + 1, month }, value);
            }
        }

        let vars: Vec<String> = ["TS", "BOGUS", "FLNT"].iter().map(|s| s.to_string()).collect();
        let outcomes = analyze_group(&ds, &vars, 0.01);

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[0].1,
            Ok(VariableCheck::Analyzed(_))
        ));
        assert!(matches!(
            outcomes[1].1,
            Ok(VariableCheck::NotFound { .. })
        ));
        // The variable after the missing one is still analyzed.
        assert!(matches!(
            outcomes[2].1,
            Ok(VariableCheck::Analyzed(_))
        ));
    }

    #[test]
    fn test_single_year_is_insufficient_data() {
        let ds = dataset_with("GPP", &[3.5]);
        let result = check_equilibration(&ds, "GPP", 0.01);
        assert!(matches!(
            result,
            Err(SpinupError::Trend {
                source: TrendError::InsufficientData { points: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_threshold_is_rejected() {
        let ds = dataset_with("TS", &[1.0, 1.0]);
        assert!(matches!(
            check_equilibration(&ds, "TS", 0.0),
            Err(SpinupError::InvalidThreshold(_))
        ));
        assert!(matches!(
            check_equilibration(&ds, "TS", -0.01),
            Err(SpinupError::InvalidThreshold(_))
        ));
    }
}
