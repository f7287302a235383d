//! Benchmark scaling charts.

use std::path::{Path, PathBuf};

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::benchmark::ScalingMetrics;

use super::{ChartError, COST_GREEN, EFFICIENCY_ORANGE, IDEAL_MAGENTA, MEASURED_BLUE};

/// Node axis range with one node of padding on each side.
fn node_range(metrics: &ScalingMetrics) -> (f64, f64) {
    let min = *metrics.nodes.iter().min().unwrap() as f64;
    let max = *metrics.nodes.iter().max().unwrap() as f64;
    (min - 1.0, max + 1.0)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().cloned().fold(f64::MIN, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().cloned().fold(f64::MAX, f64::min)
}

/// Measured throughput vs ideal linear scaling.
///
/// Writes `scaling_throughput.png` and returns its path.
pub fn render_throughput(
    metrics: &ScalingMetrics,
    output_dir: &Path,
) -> Result<PathBuf, ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let path = output_dir.join("scaling_throughput.png");

    let measured: Vec<(f64, f64)> = metrics
        .nodes
        .iter()
        .zip(&metrics.throughput)
        .map(|(&n, &t)| (n as f64, t))
        .collect();

    let base_nodes = metrics.nodes[0] as f64;
    let base_throughput = metrics.throughput[0];
    let ideal: Vec<(f64, f64)> = metrics
        .nodes
        .iter()
        .map(|&n| (n as f64, base_throughput * n as f64 / base_nodes))
        .collect();

    let (x_min, x_max) = node_range(metrics);
    let y_max = max_of(&metrics.throughput)
        .max(ideal.last().map(|&(_, y)| y).unwrap_or(0.0))
        * 1.15;

    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::backend)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Model Throughput", ("sans-serif", 28).into_font())
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(ChartError::backend)?;

    chart
        .configure_mesh()
        .x_desc("Number of Nodes")
        .y_desc("Throughput (simulated years/day)")
        .draw()
        .map_err(ChartError::backend)?;

    chart
        .draw_series(LineSeries::new(
            ideal,
            IDEAL_MAGENTA.mix(0.6).stroke_width(1),
        ))
        .map_err(ChartError::backend)?
        .label("Ideal linear scaling")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], IDEAL_MAGENTA));

    chart
        .draw_series(LineSeries::new(
            measured.clone(),
            MEASURED_BLUE.stroke_width(2),
        ))
        .map_err(ChartError::backend)?
        .label("Measured")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], MEASURED_BLUE.stroke_width(2)));

    chart
        .draw_series(
            measured
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, MEASURED_BLUE.filled())),
        )
        .map_err(ChartError::backend)?;

    chart
        .draw_series(measured.iter().map(|&(x, y)| {
            Text::new(
                format!("{:.2}", y),
                (x, y + y_max * 0.03),
                ("sans-serif", 14).into_font(),
            )
        }))
        .map_err(ChartError::backend)?;

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

/// Two panels: speedup vs ideal, and parallel efficiency with reference
/// lines at 100% and 80%.
///
/// Writes `scaling_efficiency.png` and returns its path.
pub fn render_efficiency(
    metrics: &ScalingMetrics,
    output_dir: &Path,
) -> Result<PathBuf, ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let path = output_dir.join("scaling_efficiency.png");

    let root = BitMapBackend::new(&path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::backend)?;
    let panels = root.split_evenly((1, 2));

    let (x_min, x_max) = node_range(metrics);
    let base_nodes = metrics.nodes[0] as f64;

    // Left panel: speedup.
    {
        let speedup: Vec<(f64, f64)> = metrics
            .nodes
            .iter()
            .zip(&metrics.speedup)
            .map(|(&n, &s)| (n as f64, s))
            .collect();
        let ideal: Vec<(f64, f64)> = metrics
            .nodes
            .iter()
            .map(|&n| (n as f64, n as f64 / base_nodes))
            .collect();
        let y_max = max_of(&metrics.speedup)
            .max(ideal.last().map(|&(_, y)| y).unwrap_or(0.0))
            * 1.15;

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Strong Scaling: Speedup", ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(ChartError::backend)?;

        chart
            .configure_mesh()
            .x_desc("Number of Nodes")
            .y_desc("Speedup (relative to baseline)")
            .draw()
            .map_err(ChartError::backend)?;

        chart
            .draw_series(LineSeries::new(ideal, IDEAL_MAGENTA.mix(0.6).stroke_width(1)))
            .map_err(ChartError::backend)?
            .label("Ideal speedup")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], IDEAL_MAGENTA));

        chart
            .draw_series(LineSeries::new(speedup.clone(), MEASURED_BLUE.stroke_width(2)))
            .map_err(ChartError::backend)?
            .label("Measured speedup")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], MEASURED_BLUE.stroke_width(2))
            });

        chart
            .draw_series(
                speedup
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, MEASURED_BLUE.filled())),
            )
            .map_err(ChartError::backend)?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(ChartError::backend)?;
    }

    // Right panel: efficiency.
    {
        let efficiency: Vec<(f64, f64)> = metrics
            .nodes
            .iter()
            .zip(&metrics.efficiency)
            .map(|(&n, &e)| (n as f64, e))
            .collect();
        let y_min = (min_of(&metrics.efficiency) - 10.0).min(70.0);
        let y_max = (max_of(&metrics.efficiency) + 5.0).max(105.0);

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Strong Scaling: Efficiency", ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(ChartError::backend)?;

        chart
            .configure_mesh()
            .x_desc("Number of Nodes")
            .y_desc("Parallel Efficiency (%)")
            .draw()
            .map_err(ChartError::backend)?;

        chart
            .draw_series(LineSeries::new(
                vec![(x_min, 100.0), (x_max, 100.0)],
                IDEAL_MAGENTA.mix(0.6).stroke_width(1),
            ))
            .map_err(ChartError::backend)?
            .label("Ideal (100%)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], IDEAL_MAGENTA));

        chart
            .draw_series(LineSeries::new(
                vec![(x_min, 80.0), (x_max, 80.0)],
                BLACK.mix(0.4).stroke_width(1),
            ))
            .map_err(ChartError::backend)?
            .label("80% threshold")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK.mix(0.4)));

        chart
            .draw_series(LineSeries::new(
                efficiency.clone(),
                EFFICIENCY_ORANGE.stroke_width(2),
            ))
            .map_err(ChartError::backend)?
            .label("Parallel efficiency")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], EFFICIENCY_ORANGE.stroke_width(2))
            });

        chart
            .draw_series(
                efficiency
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, EFFICIENCY_ORANGE.filled())),
            )
            .map_err(ChartError::backend)?;

        chart
            .draw_series(efficiency.iter().map(|&(x, y)| {
                Text::new(
                    format!("{:.0}%", y),
                    (x, y + (y_max - y_min) * 0.03),
                    ("sans-serif", 14).into_font(),
                )
            }))
            .map_err(ChartError::backend)?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(ChartError::backend)?;
    }

    root.present().map_err(ChartError::backend)?;
    Ok(path.clone())
}

/// Resource cost bars (node-hours per simulated year).
///
/// Writes `scaling_cost.png` and returns its path.
pub fn render_cost(metrics: &ScalingMetrics, output_dir: &Path) -> Result<PathBuf, ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let path = output_dir.join("scaling_cost.png");

    let (x_min, x_max) = node_range(metrics);
    let y_max = max_of(&metrics.node_hours_per_year) * 1.15;

    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::backend)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Resource Cost per Simulated Year",
            ("sans-serif", 28).into_font(),
        )
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(ChartError::backend)?;

    chart
        .configure_mesh()
        .x_desc("Number of Nodes")
        .y_desc("Node-Hours per Simulated Year")
        .draw()
        .map_err(ChartError::backend)?;

    draw_cost_bars(&mut chart, metrics, y_max)?;

    root.present().map_err(ChartError::backend)?;
    Ok(path.clone())
}

/// Three-panel digest: throughput, efficiency, cost.
///
/// Writes `scaling_summary.png` and returns its path.
pub fn render_summary(metrics: &ScalingMetrics, output_dir: &Path) -> Result<PathBuf, ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let path = output_dir.join("scaling_summary.png");

    let root = BitMapBackend::new(&path, (1800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::backend)?;
    let panels = root.split_evenly((1, 3));

    let (x_min, x_max) = node_range(metrics);

    // Panel 1: throughput.
    {
        let measured: Vec<(f64, f64)> = metrics
            .nodes
            .iter()
            .zip(&metrics.throughput)
            .map(|(&n, &t)| (n as f64, t))
            .collect();
        let y_max = max_of(&metrics.throughput) * 1.15;

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Throughput", ("sans-serif", 22).into_font())
            .margin(18)
            .x_label_area_size(44)
            .y_label_area_size(52)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(ChartError::backend)?;
        chart
            .configure_mesh()
            .x_desc("Nodes")
            .y_desc("Years/Day")
            .draw()
            .map_err(ChartError::backend)?;
        chart
            .draw_series(LineSeries::new(measured.clone(), MEASURED_BLUE.stroke_width(2)))
            .map_err(ChartError::backend)?;
        chart
            .draw_series(
                measured
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, MEASURED_BLUE.filled())),
            )
            .map_err(ChartError::backend)?;
    }

    // Panel 2: efficiency bars with the 80% reference line.
    {
        let y_min = (min_of(&metrics.efficiency) - 10.0).min(70.0);
        let y_max = (max_of(&metrics.efficiency) + 5.0).max(105.0);

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Parallel Efficiency", ("sans-serif", 22).into_font())
            .margin(18)
            .x_label_area_size(44)
            .y_label_area_size(52)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(ChartError::backend)?;
        chart
            .configure_mesh()
            .x_desc("Nodes")
            .y_desc("Efficiency (%)")
            .draw()
            .map_err(ChartError::backend)?;
        chart
            .draw_series(
                metrics
                    .nodes
                    .iter()
                    .zip(&metrics.efficiency)
                    .map(|(&n, &e)| {
                        let x = n as f64;
                        Rectangle::new([(x - 0.45, y_min), (x + 0.45, e)], EFFICIENCY_ORANGE.filled())
                    }),
            )
            .map_err(ChartError::backend)?;
        chart
            .draw_series(LineSeries::new(
                vec![(x_min, 80.0), (x_max, 80.0)],
                BLACK.mix(0.4).stroke_width(1),
            ))
            .map_err(ChartError::backend)?;
    }

    // Panel 3: cost bars.
    {
        let y_max = max_of(&metrics.node_hours_per_year) * 1.15;

        let mut chart = ChartBuilder::on(&panels[2])
            .caption("Resource Cost", ("sans-serif", 22).into_font())
            .margin(18)
            .x_label_area_size(44)
            .y_label_area_size(52)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(ChartError::backend)?;
        chart
            .configure_mesh()
            .x_desc("Nodes")
            .y_desc("NH/Year")
            .draw()
            .map_err(ChartError::backend)?;
        draw_cost_bars(&mut chart, metrics, y_max)?;
    }

    root.present().map_err(ChartError::backend)?;
    Ok(path.clone())
}

fn draw_cost_bars<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    metrics: &ScalingMetrics,
    y_max: f64,
) -> Result<(), ChartError>
where
    DB: DrawingBackend,
{
    chart
        .draw_series(
            metrics
                .nodes
                .iter()
                .zip(&metrics.node_hours_per_year)
                .map(|(&n, &nh)| {
                    let x = n as f64;
                    Rectangle::new([(x - 0.45, 0.0), (x + 0.45, nh)], COST_GREEN.filled())
                }),
        )
        .map_err(ChartError::backend)?;

    chart
        .draw_series(
            metrics
                .nodes
                .iter()
                .zip(&metrics.node_hours_per_year)
                .map(|(&n, &nh)| {
                    Text::new(
                        format!("{:.1}", nh),
                        (n as f64 - 0.3, nh + y_max * 0.02),
                        ("sans-serif", 14).into_font(),
                    )
                }),
        )
        .map_err(ChartError::backend)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{calculate_metrics, BenchmarkTable};
    use tempfile::tempdir;

    fn eiger_metrics() -> ScalingMetrics {
        calculate_metrics(&BenchmarkTable::default()).unwrap()
    }

    #[test]
    fn test_render_throughput_writes_png() {
        let dir = tempdir().unwrap();
        let path = render_throughput(&eiger_metrics(), dir.path()).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_all_scaling_charts() {
        let dir = tempdir().unwrap();
        let metrics = eiger_metrics();

        assert!(render_efficiency(&metrics, dir.path()).unwrap().exists());
        assert!(render_cost(&metrics, dir.path()).unwrap().exists());
        assert!(render_summary(&metrics, dir.path()).unwrap().exists());
    }

    #[test]
    fn test_render_empty_metrics_is_rejected() {
        let dir = tempdir().unwrap();
        let empty = ScalingMetrics {
            nodes: Vec::new(),
            throughput: Vec::new(),
            speedup: Vec::new(),
            efficiency: Vec::new(),
            node_hours_per_year: Vec::new(),
        };
        assert!(matches!(
            render_throughput(&empty, dir.path()),
            Err(ChartError::EmptyInput)
        ));
    }
}
