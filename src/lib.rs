//! Analysis utilities for CESM climate-model runs.
//!
//! Two independent pipelines: strong-scaling metrics and charts derived
//! from benchmark runs, and spin-up equilibration diagnostics over monthly
//! history output.

pub mod benchmark;
pub mod chart;
pub mod history;
pub mod spinup;

pub use benchmark::{calculate_metrics, BenchmarkSample, BenchmarkTable, ScalingMetrics};
pub use chart::ChartError;
pub use history::{Dataset, MonthStamp, VariableSeries};
pub use spinup::{
    check_equilibration, EquilibrationReport, MonitorConfig, VariableCheck, VariableGroup,
};
