//! Report data model.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runner::state::{RunState, RunSummary, StepReport};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of a report event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Pass,
    Fail,
}

/// One timestamped entry in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEvent {
    pub seq: usize,
    pub timestamp: String,
    pub kind: EventKind,
    pub message: String,
}

/// Append-only ordered log of test events, scoped to one session.
///
/// Accumulates in memory and is persisted exactly once at teardown. If the
/// process dies before the flush, the events are gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub test_name: String,
    pub engine: String,
    pub started_at: String,
    pub events: Vec<ReportEvent>,
    pub screenshots: Vec<String>,
}

impl ReportRecord {
    pub fn new(test_name: &str, engine: &str) -> Self {
        Self {
            test_name: test_name.to_string(),
            engine: engine.to_string(),
            started_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            events: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(EventKind::Info, message.into());
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.push(EventKind::Pass, message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(EventKind::Fail, message.into());
    }

    /// Attach a captured screenshot to the record.
    pub fn attach_screenshot(&mut self, path: &Path) {
        self.screenshots.push(path.display().to_string());
    }

    fn push(&mut self, kind: EventKind, message: String) {
        let seq = self.events.len();
        self.events.push(ReportEvent {
            seq,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            kind,
            message,
        });
    }

    /// (info, pass, fail) event counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.events.iter().fold((0, 0, 0), |(i, p, f), e| match e.kind {
            EventKind::Info => (i + 1, p, f),
            EventKind::Pass => (i, p + 1, f),
            EventKind::Fail => (i, p, f + 1),
        })
    }
}

/// Everything one run persists, as written to `results.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub test_name: String,
    pub engine: String,
    pub started_at: String,
    pub generated_at: String,
    pub steps: Vec<StepReport>,
    pub summary: RunSummary,
    pub events: Vec<ReportEvent>,
    pub screenshots: Vec<String>,
}

impl RunReport {
    pub fn assemble(run: &RunState, record: &ReportRecord) -> Self {
        Self {
            run_id: run.run_id.clone(),
            test_name: record.test_name.clone(),
            engine: record.engine.clone(),
            started_at: record.started_at.clone(),
            generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            steps: run.steps.iter().map(|s| s.to_report()).collect(),
            summary: run.summary(),
            events: record.events.clone(),
            screenshots: record.screenshots.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_keep_append_order() {
        let mut record = ReportRecord::new("t", "chromium");
        record.info("one");
        record.pass("two");
        record.fail("three");
        record.info("four");

        let messages: Vec<&str> = record.events.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two", "three", "four"]);
        let seqs: Vec<usize> = record.events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn counts_by_kind() {
        let mut record = ReportRecord::new("t", "chromium");
        record.info("a");
        record.info("b");
        record.pass("c");
        record.fail("d");
        assert_eq!(record.counts(), (2, 1, 1));
    }

    #[test]
    fn screenshots_attach_as_paths() {
        let mut record = ReportRecord::new("t", "chromium");
        record.attach_screenshot(Path::new("output/screenshots/offers.png"));
        assert_eq!(record.screenshots, vec!["output/screenshots/offers.png"]);
    }
}
