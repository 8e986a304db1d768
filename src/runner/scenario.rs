//! The booking-portal Offers scenario.
//!
//! A strictly ordered, non-branching sequence of six steps, run once per
//! test. The constants below pin the page expectations the suite checks.

use crate::driver::{Driver, Locator};
use crate::error::StepError;
use crate::report::types::ReportRecord;
use crate::runner::context::RunContext;

/// Expected title of the Offers page.
pub const EXPECTED_TITLE: &str =
    "Domestic Flights Offers | Deals on Domestic Flight Booking | Yatra.com";

/// Substring the offers banner must contain.
pub const BANNER_TEXT: &str = "Great Offers & Amazing Deals";

/// Most packages listed per run.
pub const MAX_PACKAGES: usize = 5;

fn offers_link() -> Locator {
    Locator::LinkText("Offers".to_string())
}

fn banner() -> Locator {
    Locator::XPath("//h2[contains(text(),'Great Offers & Amazing Deals')]".to_string())
}

fn package_cards() -> Locator {
    Locator::XPath("//div[@class='packageDetails']".to_string())
}

/// Name sub-element of the card at `pos` (1-based, document order).
fn package_name(pos: usize) -> Locator {
    Locator::XPath(format!("(//div[@class='packageDetails'])[{pos}]//h3"))
}

/// Price sub-element of the card at `pos` (1-based, document order).
fn package_price(pos: usize) -> Locator {
    Locator::XPath(format!(
        "(//div[@class='packageDetails'])[{pos}]//span[contains(@class, 'price')]"
    ))
}

/// The scenario steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Navigate,
    OpenOffers,
    CheckTitle,
    CheckBanner,
    Screenshot,
    ListPackages,
}

/// What the sequencer does when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFail {
    /// Record the failure and keep going. Only assertion mismatches
    /// qualify; a timeout or I/O failure aborts even on these steps.
    Record,
    /// Record the failure, skip the remaining steps, go to teardown.
    Abort,
}

pub struct StepSpec {
    pub kind: StepKind,
    pub name: &'static str,
    pub on_fail: OnFail,
}

/// Failure policy, one row per step.
pub const STEPS: [StepSpec; 6] = [
    StepSpec { kind: StepKind::Navigate, name: "navigate", on_fail: OnFail::Abort },
    StepSpec { kind: StepKind::OpenOffers, name: "open offers page", on_fail: OnFail::Abort },
    StepSpec { kind: StepKind::CheckTitle, name: "validate page title", on_fail: OnFail::Record },
    StepSpec { kind: StepKind::CheckBanner, name: "validate banner text", on_fail: OnFail::Record },
    StepSpec { kind: StepKind::Screenshot, name: "capture screenshot", on_fail: OnFail::Abort },
    StepSpec { kind: StepKind::ListPackages, name: "list holiday packages", on_fail: OnFail::Abort },
];

/// Execute one step against the open session, appending its events to the
/// report record. Failures come back as a [`StepError`]; the sequencer owns
/// the continue-or-abort decision.
pub async fn run_step(
    kind: StepKind,
    driver: &dyn Driver,
    ctx: &RunContext,
    url: &str,
    record: &mut ReportRecord,
) -> Result<(), StepError> {
    match kind {
        StepKind::Navigate => {
            driver.goto(url).await?;
            record.info(format!("Website opened: {url}"));
            Ok(())
        }

        StepKind::OpenOffers => {
            driver.click(&offers_link()).await?;
            record.info("Offers link clicked");
            Ok(())
        }

        StepKind::CheckTitle => {
            let actual = driver.title().await?;
            if actual == EXPECTED_TITLE {
                record.pass(format!("Title validation passed: {actual}"));
                Ok(())
            } else {
                Err(StepError::Assertion(format!(
                    "Title validation failed! Expected: {EXPECTED_TITLE}, Got: {actual}"
                )))
            }
        }

        StepKind::CheckBanner => {
            let text = driver.visible_text(&banner()).await?;
            if text.contains(BANNER_TEXT) {
                record.pass(format!("Banner logo validation passed: {text}"));
                Ok(())
            } else {
                Err(StepError::Assertion(format!(
                    "Banner logo validation failed! Got: {text}"
                )))
            }
        }

        StepKind::Screenshot => {
            let path = ctx.screenshot_path();
            driver.screenshot(&path).await?;
            record.attach_screenshot(&path);
            record.info(format!("Screenshot captured: {}", path.display()));
            Ok(())
        }

        StepKind::ListPackages => {
            let total = driver.count(&package_cards()).await?;
            for pos in 1..=total.min(MAX_PACKAGES) {
                let name = driver.text(&package_name(pos)).await?;
                let price = driver.text(&package_price(pos)).await?;
                record.info(format!("Package {pos}: {name} - Price: {price}"));
            }
            Ok(())
        }
    }
}
