//! Monitoring configuration.

use serde::{Deserialize, Serialize};

/// One model component's history stream and the variables to monitor in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableGroup {
    /// Display name used in console output ("atmosphere", "land").
    pub label: String,
    /// History subdirectory relative to the case root.
    pub hist_subdir: String,
    /// Stream tag embedded in history filenames (e.g. "cam.h0").
    pub file_tag: String,
    /// Variable names to monitor, processed in order.
    pub variables: Vec<String>,
    /// Whether a missing history directory aborts the run.
    pub required: bool,
}

impl VariableGroup {
    /// Monthly atmosphere stream: surface temperature, precipitation,
    /// outgoing longwave.
    pub fn cam_monthly() -> Self {
        Self {
            label: "atmosphere".to_string(),
            hist_subdir: "archive/atm/hist".to_string(),
            file_tag: "cam.h0".to_string(),
            variables: vec!["TS".to_string(), "PRECT".to_string(), "FLNT".to_string()],
            required: true,
        }
    }

    /// Monthly land stream: 2m temperature, GPP, leaf area index.
    pub fn clm_monthly() -> Self {
        Self {
            label: "land".to_string(),
            hist_subdir: "archive/lnd/hist".to_string(),
            file_tag: "clm2.h0".to_string(),
            variables: vec!["TSA".to_string(), "GPP".to_string(), "TLAI".to_string()],
            required: false,
        }
    }
}

/// Configuration for one diagnostics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Max acceptable trend magnitude, in variable units per year.
    pub threshold: f64,
    /// Number of simulated years of monthly files to load.
    pub years: u32,
    /// Component groups, processed in order.
    pub groups: Vec<VariableGroup>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            years: 10,
            groups: vec![VariableGroup::cam_monthly(), VariableGroup::clm_monthly()],
        }
    }
}

impl MonitorConfig {
    /// Number of monthly files to load per stream, assuming monthly cadence.
    pub fn max_files(&self) -> usize {
        self.years as usize * 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.threshold, 0.01);
        assert_eq!(config.max_files(), 120);
        assert_eq!(config.groups.len(), 2);

        let atm = &config.groups[0];
        assert_eq!(atm.variables, vec!["TS", "PRECT", "FLNT"]);
        assert!(atm.required);

        let lnd = &config.groups[1];
        assert_eq!(lnd.variables, vec!["TSA", "GPP", "TLAI"]);
        assert!(!lnd.required);
    }
}
