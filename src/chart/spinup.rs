//! Per-variable spin-up progress charts.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::spinup::EquilibrationReport;

use super::{ChartError, MEASURED_BLUE, TREND_RED};

/// Annual-mean series with its fitted trend line.
///
/// Writes `<VAR>_spinup.png` and returns its path.
pub fn render_spinup_series(
    report: &EquilibrationReport,
    output_dir: &Path,
) -> Result<PathBuf, ChartError> {
    if report.annual_means.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let path = output_dir.join(format!("{}_spinup.png", report.variable));

    let annual: Vec<(f64, f64)> = report
        .annual_means
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let last_year = (report.annual_means.len() - 1) as f64;
    let x_min = -0.5;
    let x_max = last_year + 0.5;

    let value_min = annual.iter().map(|&(_, v)| v).fold(f64::MAX, f64::min);
    let value_max = annual.iter().map(|&(_, v)| v).fold(f64::MIN, f64::max);
    // Keep a visible band around flat series.
    let pad = ((value_max - value_min) * 0.15).max(value_max.abs() * 0.02).max(1e-6);
    let y_min = value_min - pad;
    let y_max = value_max + pad;

    let root = BitMapBackend::new(&path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::backend)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} - Spin-up Progress", report.variable),
            ("sans-serif", 28).into_font(),
        )
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(ChartError::backend)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(report.variable.as_str())
        .draw()
        .map_err(ChartError::backend)?;

    chart
        .draw_series(LineSeries::new(annual.clone(), MEASURED_BLUE.stroke_width(2)))
        .map_err(ChartError::backend)?
        .label("Annual mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], MEASURED_BLUE.stroke_width(2)));

    chart
        .draw_series(
            annual
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, MEASURED_BLUE.filled())),
        )
        .map_err(ChartError::backend)?;

    let trend = vec![
        (0.0, report.fit.value_at(0.0)),
        (last_year, report.fit.value_at(last_year)),
    ];
    chart
        .draw_series(LineSeries::new(trend, TREND_RED.mix(0.8).stroke_width(1)))
        .map_err(ChartError::backend)?
        .label(format!("Trend: {:+.4}/year", report.fit.slope))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], TREND_RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(ChartError::backend)?;

    root.present().map_err(ChartError::backend)?;
    Ok(path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spinup::LinearFit;
    use tempfile::tempdir;

    fn report(variable: &str, annual_means: Vec<f64>, slope: f64, intercept: f64) -> EquilibrationReport {
        EquilibrationReport {
            variable: variable.to_string(),
            equilibrated: slope.abs() < 0.01,
            fit: LinearFit { slope, intercept },
            annual_means,
        }
    }

    #[test]
    fn test_render_spinup_series_writes_named_png() {
        let dir = tempdir().unwrap();
        let annual: Vec<f64> = (0..10).map(|i| 288.0 + 0.02 * i as f64).collect();
        let path = render_spinup_series(&report("TS", annual, 0.02, 288.0), dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "TS_spinup.png");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_flat_series() {
        // A constant series still needs a non-degenerate value axis.
        let dir = tempdir().unwrap();
        let path = render_spinup_series(
            &report("TLAI", vec![1.5; 6], 0.0, 1.5),
            dir.path(),
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_empty_report_is_rejected() {
        let dir = tempdir().unwrap();
        let result = render_spinup_series(&report("GPP", Vec::new(), 0.0, 0.0), dir.path());
        assert!(matches!(result, Err(ChartError::EmptyInput)));
    }
}
