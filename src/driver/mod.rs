pub mod web;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::DriverError;

/// Browser engine, resolved once at the CLI boundary.
///
/// The suite runs on exactly two engines. `"ie"` is still accepted as a
/// legacy alias from the Selenium suite this replaced and maps to the
/// secondary engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Chromium,
    Firefox,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Chromium => "chromium",
            Engine::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized selectors are rejected up front instead of leaving the
/// session unset.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown browser engine '{0}' (expected chrome, chromium or firefox)")]
pub struct UnknownEngine(pub String);

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Engine::Chromium),
            "firefox" => Ok(Engine::Firefox),
            "ie" => {
                log::warn!("engine selector 'ie' is deprecated; running firefox");
                Ok(Engine::Firefox)
            }
            _ => Err(UnknownEngine(s.to_string())),
        }
    }
}

/// Structural address of an element on a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Anchor element by its exact visible text
    LinkText(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Locator {
    /// Render as a Playwright selector string.
    pub fn to_selector(&self) -> String {
        match self {
            Locator::LinkText(text) => {
                format!("xpath=//a[normalize-space(text())=\"{}\"]", text)
            }
            Locator::Css(css) => css.clone(),
            Locator::XPath(xpath) => format!("xpath={}", xpath),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector())
    }
}

/// Browser operations the scenario steps need.
///
/// Small enough to script in tests; the production implementation is the
/// Playwright-backed [`web::WebSession`].
#[async_trait]
pub trait Driver: Send + Sync {
    fn engine(&self) -> Engine;

    /// Load a URL, blocking until the navigation settles.
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    /// Wait (bounded by the session timeout) for the element, then click it.
    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    /// Current page title.
    async fn title(&self) -> Result<String, DriverError>;

    /// Wait for the element to become visible, then return its text.
    async fn visible_text(&self, locator: &Locator) -> Result<String, DriverError>;

    /// Text of an element, without waiting.
    async fn text(&self, locator: &Locator) -> Result<String, DriverError>;

    /// Number of elements currently matching the locator.
    async fn count(&self, locator: &Locator) -> Result<usize, DriverError>;

    /// Capture the viewport to `path`. Parent directories must already exist.
    async fn screenshot(&self, path: &Path) -> Result<(), DriverError>;

    /// Close the underlying browser.
    async fn close(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_selectors_are_case_insensitive() {
        assert_eq!(Engine::from_str("chrome").unwrap(), Engine::Chromium);
        assert_eq!(Engine::from_str("Chrome").unwrap(), Engine::Chromium);
        assert_eq!(Engine::from_str("CHROMIUM").unwrap(), Engine::Chromium);
        assert_eq!(Engine::from_str("firefox").unwrap(), Engine::Firefox);
    }

    #[test]
    fn legacy_ie_alias_maps_to_secondary_engine() {
        assert_eq!(Engine::from_str("ie").unwrap(), Engine::Firefox);
        assert_eq!(Engine::from_str("IE").unwrap(), Engine::Firefox);
    }

    #[test]
    fn unknown_engine_is_an_error() {
        let err = Engine::from_str("netscape").unwrap_err();
        assert_eq!(err, UnknownEngine("netscape".to_string()));
        assert!(err.to_string().contains("netscape"));
    }

    #[test]
    fn locators_render_playwright_selectors() {
        assert_eq!(
            Locator::LinkText("Offers".into()).to_selector(),
            "xpath=//a[normalize-space(text())=\"Offers\"]"
        );
        assert_eq!(Locator::Css("div.card".into()).to_selector(), "div.card");
        assert_eq!(
            Locator::XPath("//h2[contains(text(),'Deals')]".into()).to_selector(),
            "xpath=//h2[contains(text(),'Deals')]"
        );
    }
}
