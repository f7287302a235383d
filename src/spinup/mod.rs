//! Spin-up equilibration diagnostics.
//!
//! Resamples monthly variable series to annual means, fits a linear trend,
//! and classifies each monitored variable as equilibrated or still drifting.

mod analyze;
mod config;
mod trend;

pub use analyze::{
    analyze_group, check_equilibration, EquilibrationReport, SpinupError, VariableCheck,
};
pub use config::{MonitorConfig, VariableGroup};
pub use trend::{annual_means, fit_linear, LinearFit, TrendError};
