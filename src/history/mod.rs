//! Loading of CESM monthly history output.
//!
//! Discovers per-month history files in a case archive and reduces each
//! requested variable to one scalar sample per month.

mod dataset;
mod reader;

pub use dataset::{Dataset, MonthStamp, VariableSeries};
pub use reader::{
    discover_history_files, load_component, load_history_files, parse_month_stamp, HistoryError,
};
