//! Error taxonomy for the test runner.
//!
//! Every failure a run can hit has a named variant. The sequencer treats
//! assertion mismatches on validation steps as soft (recorded, run
//! continues); everything else unwinds to teardown.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the spreadsheet test data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open workbook {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("worksheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("no value in cell (row {row}, column {col})")]
    CellMissing { row: u32, col: u32 },

    #[error("cell (row {row}, column {col}) holds '{found}', expected a string")]
    CellNotText { row: u32, col: u32, found: String },
}

/// Failures raised by the browser session.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("browser startup failed: {0:#}")]
    Startup(anyhow::Error),

    #[error("timed out after {timeout_ms}ms waiting for {locator}")]
    Timeout { locator: String, timeout_ms: u64 },

    #[error("element not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("browser engine error: {0:#}")]
    Engine(anyhow::Error),
}

/// One result type for every scenario step.
#[derive(Debug, Error)]
pub enum StepError {
    /// A validation mismatch. The only candidate for soft failure.
    #[error("{0}")]
    Assertion(String),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl StepError {
    pub fn is_assertion(&self) -> bool {
        matches!(self, StepError::Assertion(_))
    }
}
