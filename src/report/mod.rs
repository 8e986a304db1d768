pub mod html;
pub mod json;
pub mod types;

use anyhow::{Context, Result};
use std::path::Path;

use crate::runner::context::RunContext;
use crate::runner::state::RunState;
use types::{ReportRecord, RunReport};

/// Persist the run exactly once: JSON sidecar first, then the HTML report.
///
/// Called from teardown after the session is closed, whether the sequence
/// finished or aborted.
pub fn flush(run: &RunState, record: &ReportRecord, ctx: &RunContext) -> Result<()> {
    let report = RunReport::assemble(run, record);

    json::generate(&report, &ctx.json_report_path())?;
    html::generate(&report, &ctx.html_report_path())?;
    println!("HTML report saved to: {}", ctx.html_report_path().display());

    Ok(())
}

/// Re-render an HTML report from a persisted results file.
pub fn regenerate(results_path: &Path, output: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("cannot read results file {}", results_path.display()))?;
    let report: RunReport = serde_json::from_str(&raw)
        .with_context(|| format!("invalid results file {}", results_path.display()))?;
    html::generate(&report, output)
}
