//! Chart rendering for scaling metrics and spin-up series.
//!
//! Pure presentation: renderers consume computed metrics and series and
//! write PNG files, overwriting any previous run's output.

mod scaling;
mod spinup;

use plotters::style::RGBColor;
use thiserror::Error;

pub use scaling::{render_cost, render_efficiency, render_summary, render_throughput};
pub use spinup::render_spinup_series;

/// Errors that can occur while rendering a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("chart backend error: {0}")]
    Backend(String),
    #[error("nothing to draw: input is empty")]
    EmptyInput,
}

impl ChartError {
    pub(crate) fn backend<E: std::fmt::Display>(e: E) -> Self {
        ChartError::Backend(e.to_string())
    }
}

// Shared series palette.
pub(crate) const MEASURED_BLUE: RGBColor = RGBColor(0x2e, 0x86, 0xab);
pub(crate) const IDEAL_MAGENTA: RGBColor = RGBColor(0xa2, 0x3b, 0x72);
pub(crate) const EFFICIENCY_ORANGE: RGBColor = RGBColor(0xf1, 0x8f, 0x01);
pub(crate) const COST_GREEN: RGBColor = RGBColor(0x52, 0xb7, 0x88);
pub(crate) const TREND_RED: RGBColor = RGBColor(0xd6, 0x28, 0x28);
