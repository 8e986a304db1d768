pub mod context;
pub mod scenario;
pub mod state;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::config::RunConfig;
use crate::data;
use crate::driver::web::WebSession;
use crate::driver::{Driver, Engine};
use crate::error::StepError;
use crate::report;
use crate::report::types::ReportRecord;

use context::RunContext;
use scenario::{OnFail, STEPS};
use state::{RunState, RunSummary};

const TEST_NAME: &str = "Travel Portal Offers Test";

/// Run the scenario once against the given engine.
///
/// A bootstrap failure is fatal and returns an error; once the session is
/// open, the run always reaches teardown and always flushes a report.
pub async fn run(engine: Engine, config: &RunConfig) -> Result<RunSummary> {
    let ctx = RunContext::new(config)?;
    let session = WebSession::open(engine, config).await?;
    run_with_driver(&session, &ctx).await
}

/// Drive the scenario on an already-open session, then tear down.
///
/// Teardown order is fixed: close the session first, flush the report
/// second, so the closure event is part of the persisted report.
pub(crate) async fn run_with_driver(driver: &dyn Driver, ctx: &RunContext) -> Result<RunSummary> {
    let engine = driver.engine();
    let names: Vec<&str> = STEPS.iter().map(|s| s.name).collect();
    let mut run = RunState::new(engine.as_str(), &names);
    let mut record = ReportRecord::new(TEST_NAME, engine.as_str());

    record.info(format!("Browser {engine} is opened."));
    run.start();

    let outcome = drive(driver, ctx, &mut run, &mut record).await;

    match driver.close().await {
        Ok(()) => record.info("Browser closed."),
        Err(e) => log::warn!("browser close failed: {e}"),
    }
    run.finish();

    report::flush(&run, &record, ctx)?;

    let summary = run.summary();
    print_summary(&summary);
    if let Err(e) = outcome {
        println!("  {} run aborted: {}", "✗".red(), e);
    }

    Ok(summary)
}

/// The Interaction Sequencer: resolve the URL, then walk the fixed steps.
async fn drive(
    driver: &dyn Driver,
    ctx: &RunContext,
    run: &mut RunState,
    record: &mut ReportRecord,
) -> Result<(), StepError> {
    // The target URL is resolved once, before any navigation. Without it
    // nothing else can run.
    let url = match data::read_cell(&ctx.data_file, &ctx.data_sheet, ctx.data_row, ctx.data_col) {
        Ok(url) => url,
        Err(e) => {
            let err = StepError::from(e);
            record.fail(format!("Failed to read test data: {err}"));
            run.step_mut(0).start();
            run.step_mut(0).fail(format!("test data unavailable: {err}"));
            run.skip_remaining("test data unavailable");
            return Err(err);
        }
    };

    for (index, spec) in STEPS.iter().enumerate() {
        let spinner = step_spinner(index, spec.name);
        run.step_mut(index).start();

        match scenario::run_step(spec.kind, driver, ctx, &url, record).await {
            Ok(()) => {
                run.step_mut(index).pass();
                spinner.finish_and_clear();
                println!("  {} {}", "✓".green(), spec.name);
            }
            Err(err) => {
                run.step_mut(index).fail(err.to_string());
                record.fail(err.to_string());
                spinner.finish_and_clear();
                println!("  {} {}: {}", "✗".red(), spec.name, err);

                let soft = err.is_assertion() && spec.on_fail == OnFail::Record;
                if !soft {
                    run.skip_remaining("aborted by earlier failure");
                    return Err(err);
                }
            }
        }
    }

    Ok(())
}

fn step_spinner(index: usize, name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("  {spinner} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("[{index}] {}... ", name.dimmed()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_summary(summary: &RunSummary) {
    println!("\n{} Test run finished", "■".blue().bold());
    println!("  Total steps: {}", summary.total_steps);
    println!(
        "  {} passed, {} failed, {} skipped",
        summary.passed.to_string().green(),
        summary.failed.to_string().red(),
        summary.skipped.to_string().yellow()
    );
    if let Some(duration) = summary.total_duration_ms {
        println!("  Duration: {}ms", duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::driver::Locator;
    use crate::error::DriverError;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Scripted driver for sequencer tests. Serves a canned title, banner
    /// and package list; can be told to time out on click.
    struct MockDriver {
        title: String,
        banner_text: String,
        packages: Vec<(String, String)>,
        fail_click: bool,
        closed: AtomicBool,
    }

    impl MockDriver {
        fn on_offers_page() -> Self {
            Self {
                title: scenario::EXPECTED_TITLE.to_string(),
                banner_text: format!("{} this week", scenario::BANNER_TEXT),
                packages: vec![
                    ("Goa Getaway".to_string(), "Rs. 15,499".to_string()),
                    ("Kerala Backwaters".to_string(), "Rs. 22,999".to_string()),
                    ("Ladakh Circuit".to_string(), "Rs. 31,250".to_string()),
                ],
                fail_click: false,
                closed: AtomicBool::new(false),
            }
        }

        /// 1-based card position baked into the sub-element XPath.
        fn card_position(selector: &str) -> Option<usize> {
            let rest = selector.split("])[").nth(1)?;
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
    }

    #[async_trait]
    impl Driver for MockDriver {
        fn engine(&self) -> Engine {
            Engine::Chromium
        }

        async fn goto(&self, _url: &str) -> Result<(), DriverError> {
            Ok(())
        }

        async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
            if self.fail_click {
                return Err(DriverError::Timeout {
                    locator: locator.to_string(),
                    timeout_ms: 10_000,
                });
            }
            Ok(())
        }

        async fn title(&self) -> Result<String, DriverError> {
            Ok(self.title.clone())
        }

        async fn visible_text(&self, _locator: &Locator) -> Result<String, DriverError> {
            Ok(self.banner_text.clone())
        }

        async fn text(&self, locator: &Locator) -> Result<String, DriverError> {
            let selector = locator.to_selector();
            let pos = Self::card_position(&selector)
                .ok_or_else(|| DriverError::NotFound(selector.clone()))?;
            let (name, price) = self
                .packages
                .get(pos - 1)
                .ok_or_else(|| DriverError::NotFound(selector.clone()))?;
            if selector.ends_with("//h3") {
                Ok(name.clone())
            } else {
                Ok(price.clone())
            }
        }

        async fn count(&self, _locator: &Locator) -> Result<usize, DriverError> {
            Ok(self.packages.len())
        }

        async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
            std::fs::write(path, b"not really a png")?;
            Ok(())
        }

        async fn close(&self) -> Result<(), DriverError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_context(url_cell: Option<&str>) -> (RunContext, PathBuf) {
        let dir = std::env::temp_dir().join(format!("voyage-run-{}", uuid::Uuid::new_v4()));
        let data_file = dir.join("booking.xlsx");
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(url) = url_cell {
            fixtures::write_workbook(&data_file, "Sheet1", &[(url, true)]);
        }

        let config = RunConfig {
            output_dir: dir.clone(),
            data_file,
            ..RunConfig::default()
        };
        (RunContext::new(&config).unwrap(), dir)
    }

    #[tokio::test]
    async fn happy_path_passes_every_step() {
        let (ctx, dir) = test_context(Some("https://example.com"));
        let driver = MockDriver::on_offers_page();

        let summary = run_with_driver(&driver, &ctx).await.unwrap();
        assert_eq!(summary.passed, 6);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);
        assert!(driver.closed.load(Ordering::SeqCst));
        assert!(ctx.html_report_path().is_file());
        assert!(ctx.json_report_path().is_file());
        assert!(ctx.screenshot_path().is_file());

        let html = std::fs::read_to_string(ctx.html_report_path()).unwrap();
        assert!(html.contains("Browser chromium is opened."));
        assert!(html.contains("Website opened: https://example.com"));
        assert!(html.contains("Browser closed."));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn title_mismatch_is_recorded_and_run_continues() {
        let (ctx, dir) = test_context(Some("https://example.com"));
        let mut driver = MockDriver::on_offers_page();
        driver.title = "Some Other Page".to_string();

        let summary = run_with_driver(&driver, &ctx).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed, 5);
        assert_eq!(summary.skipped, 0);
        // the later screenshot step still ran
        assert!(ctx.screenshot_path().is_file());

        let json = std::fs::read_to_string(ctx.json_report_path()).unwrap();
        assert!(json.contains("Title validation failed!"));
        assert!(json.contains(scenario::EXPECTED_TITLE));
        assert!(json.contains("Some Other Page"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn click_timeout_aborts_but_teardown_still_runs() {
        let (ctx, dir) = test_context(Some("https://example.com"));
        let mut driver = MockDriver::on_offers_page();
        driver.fail_click = true;

        let summary = run_with_driver(&driver, &ctx).await.unwrap();
        assert_eq!(summary.passed, 1); // navigate
        assert_eq!(summary.failed, 1); // open offers page
        assert_eq!(summary.skipped, 4);
        assert!(driver.closed.load(Ordering::SeqCst));

        let html = std::fs::read_to_string(ctx.html_report_path()).unwrap();
        assert!(html.contains("Browser chromium is opened."));
        assert!(html.contains("Browser closed."));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn listing_is_capped_at_five_packages() {
        let (ctx, dir) = test_context(Some("https://example.com"));
        let mut driver = MockDriver::on_offers_page();
        driver.packages = (1..=7)
            .map(|i| (format!("Trip {i}"), format!("Rs. {i}00")))
            .collect();

        run_with_driver(&driver, &ctx).await.unwrap();

        let json = std::fs::read_to_string(ctx.json_report_path()).unwrap();
        for i in 1..=5 {
            assert!(json.contains(&format!("Package {i}: Trip {i} - Price: Rs. {i}00")));
        }
        assert!(!json.contains("Package 6:"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_test_data_skips_sequence_but_flushes_report() {
        let (ctx, dir) = test_context(None);
        let driver = MockDriver::on_offers_page();

        let summary = run_with_driver(&driver, &ctx).await.unwrap();
        assert_eq!(summary.failed, 1); // navigate carries the data failure
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.skipped, 5);
        assert!(driver.closed.load(Ordering::SeqCst));

        let json = std::fs::read_to_string(ctx.json_report_path()).unwrap();
        assert!(json.contains("Failed to read test data"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
