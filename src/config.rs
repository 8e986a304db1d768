//! Runner configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Knobs for one run of the booking-portal scenario.
///
/// Defaults mirror the suite as checked in. A YAML file passed with
/// `--config` overrides any subset of fields; the common ones can be
/// overridden again by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// Explicit-wait timeout for element interactions (ms)
    pub wait_timeout_ms: u64,

    /// Run the browser without a visible window
    pub headless: bool,

    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Workbook holding the test data
    pub data_file: PathBuf,

    /// Worksheet looked up by exact name
    pub data_sheet: String,

    /// Cell coordinates of the target URL (0-based)
    pub data_row: u32,
    pub data_col: u32,

    /// Directory for reports and screenshots
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        let headless = std::env::var("VOYAGE_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            wait_timeout_ms: 10_000,
            headless,
            viewport_width: 1920,
            viewport_height: 1080,
            data_file: PathBuf::from("testdata/booking.xlsx"),
            data_sheet: "Sheet1".to_string(),
            data_row: 0,
            data_col: 0,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl RunConfig {
    /// Load the configuration, applying YAML overrides when a file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("cannot read config file {}", p.display()))?;
                let config = serde_yaml::from_str(&raw)
                    .with_context(|| format!("invalid config file {}", p.display()))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_checked_in_suite() {
        let config = RunConfig::default();
        assert_eq!(config.wait_timeout_ms, 10_000);
        assert_eq!(config.data_sheet, "Sheet1");
        assert_eq!(config.data_row, 0);
        assert_eq!(config.data_col, 0);
        assert_eq!(config.data_file, PathBuf::from("testdata/booking.xlsx"));
    }

    #[test]
    fn yaml_overrides_are_partial() {
        let config: RunConfig =
            serde_yaml::from_str("waitTimeoutMs: 5000\ndataSheet: Staging\n").unwrap();
        assert_eq!(config.wait_timeout_ms, 5_000);
        assert_eq!(config.data_sheet, "Staging");
        // untouched fields keep their defaults
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.viewport_width, 1920);
    }
}
