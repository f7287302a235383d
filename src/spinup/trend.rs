//! Annual resampling and linear trend fitting.

use thiserror::Error;

use crate::history::VariableSeries;

/// Errors that can occur while fitting a trend.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendError {
    #[error("need at least 2 annual points for a trend fit, got {points}")]
    InsufficientData { points: usize },
}

/// Least-squares line fitted to a series indexed 0, 1, 2, ...
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change per index step (units per year for annual series).
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Resamples a monthly series to one arithmetic mean per calendar year.
///
/// Samples are grouped by consecutive runs of the same stamp year, so the
/// series must be in time order. A trailing partial year is included as the
/// mean of the months present.
pub fn annual_means(series: &VariableSeries) -> Vec<f64> {
    let mut means = Vec::new();
    let mut current_year: Option<i32> = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    for (stamp, value) in series.iter() {
        if current_year != Some(stamp.year) {
            if count > 0 {
                means.push(sum / count as f64);
            }
            current_year = Some(stamp.year);
            sum = 0.0;
            count = 0;
        }
        sum += value;
        count += 1;
    }
    if count > 0 {
        means.push(sum / count as f64);
    }

    means
}

/// Ordinary least-squares fit of `values` against x = 0, 1, 2, ...
///
/// Minimizes the sum of squared residuals. A slope is undefined below two
/// points, which is an `InsufficientData` error rather than a solver
/// convention.
pub fn fit_linear(values: &[f64]) -> Result<LinearFit, TrendError> {
    let n = values.len();
    if n < 2 {
        return Err(TrendError::InsufficientData { points: n });
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    // sxx > 0 whenever n >= 2.
    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MonthStamp;

    fn monthly_series(years: i32, value_for: impl Fn(i32, u8) -> f64) -> VariableSeries {
        let mut series = VariableSeries::new();
        for year in 1..=years {
            for month in 1..=12u8 {
                series.push(MonthStamp { year, month }, value_for(year, month));
            }
        }
        series
    }

    #[test]
    fn test_annual_means_average_each_year() {
        // Months 1..=12 of every year hold 1.0..=12.0.
        let series = monthly_series(3, |_, month| month as f64);
        assert_eq!(annual_means(&series), vec![6.5, 6.5, 6.5]);
    }

    #[test]
    fn test_annual_means_include_partial_final_year() {
        let mut series = monthly_series(1, |_, _| 1.0);
        for month in 1..=6u8 {
            series.push(MonthStamp { year: 2, month }, 2.0);
        }

        let annual = annual_means(&series);
        assert_eq!(annual, vec![1.0, 2.0]);
    }

    #[test]
    fn test_annual_means_empty_series() {
        assert!(annual_means(&VariableSeries::new()).is_empty());
    }

    #[test]
    fn test_flat_series_has_zero_slope() {
        let values = vec![288.15; 10];
        let fit = fit_linear(&values).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 288.15).abs() < 1e-12);
    }

    #[test]
    fn test_linear_series_recovers_slope() {
        let values: Vec<f64> = (0..10).map(|i| 5.0 + 0.02 * i as f64).collect();
        let fit = fit_linear(&values).unwrap();
        assert!((fit.slope - 0.02).abs() < 1e-12);
        assert!((fit.intercept - 5.0).abs() < 1e-12);
        assert!((fit.value_at(9.0) - 5.18).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_short_series() {
        assert_eq!(
            fit_linear(&[]),
            Err(TrendError::InsufficientData { points: 0 })
        );
        assert_eq!(
            fit_linear(&[1.0]),
            Err(TrendError::InsufficientData { points: 1 })
        );
    }
}
