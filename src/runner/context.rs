use std::path::PathBuf;

use crate::config::RunConfig;

/// Per-run context: resolved input and output paths.
///
/// Everything a step needs travels through this object or the session;
/// there is no ambient state.
pub struct RunContext {
    /// Output directory for reports and screenshots
    pub output_dir: PathBuf,

    /// Workbook holding the test data
    pub data_file: PathBuf,
    pub data_sheet: String,
    pub data_row: u32,
    pub data_col: u32,
}

impl RunContext {
    /// Build the context and make sure the managed output tree exists.
    pub fn new(config: &RunConfig) -> std::io::Result<Self> {
        let output_dir = config.output_dir.clone();
        std::fs::create_dir_all(output_dir.join("screenshots"))?;

        Ok(Self {
            output_dir,
            data_file: config.data_file.clone(),
            data_sheet: config.data_sheet.clone(),
            data_row: config.data_row,
            data_col: config.data_col,
        })
    }

    /// Fixed screenshot path, overwritten each run.
    pub fn screenshot_path(&self) -> PathBuf {
        self.output_dir.join("screenshots").join("offers.png")
    }

    /// Fixed HTML report path, overwritten each run.
    pub fn html_report_path(&self) -> PathBuf {
        self.output_dir.join("report.html")
    }

    /// JSON sidecar next to the HTML report.
    pub fn json_report_path(&self) -> PathBuf {
        self.output_dir.join("results.json")
    }
}
