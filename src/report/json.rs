use anyhow::Result;
use std::path::Path;

use super::types::RunReport;

/// Write the JSON sidecar, overwriting any prior file at `output`.
pub fn generate(report: &RunReport, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output, json)?;
    Ok(())
}
