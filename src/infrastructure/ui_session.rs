//! UI session capability.
//!
//! The one surface the pipeline uses to talk to the browser. Production code
//! backs it with a chromiumoxide page ([`super::PageSession`]); tests back it
//! with fakes.

use std::path::Path;

use thiserror::Error;

/// UI interaction errors
#[derive(Debug, Error)]
pub enum UiError {
    /// No element matched the selector before the timeout elapsed
    #[error("no element matched '{selector}' within {timeout_ms}ms")]
    Timeout { selector: String, timeout_ms: u64 },

    /// The element is not present on the page
    #[error("element '{selector}' not found")]
    NotFound { selector: String },

    /// Navigation failed
    #[error("navigation to '{url}' failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A driver call (script evaluation, click dispatch, ...) failed
    #[error("driver call failed on '{selector}': {source}")]
    Driver {
        selector: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Screenshotting an element failed
    #[error("screenshot of '{selector}' failed: {source}")]
    Screenshot {
        selector: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Capability surface of one live UI session.
///
/// All operations address elements by CSS selector. Operations that target a
/// specific control wait for it up to the session's configured timeout and
/// fail with [`UiError::Timeout`] when it never shows up; `is_visible` is an
/// immediate check and never waits.
#[allow(async_fn_in_trait)]
pub trait UiSession {
    async fn navigate(&self, url: &str) -> Result<(), UiError>;

    async fn click(&self, selector: &str) -> Result<(), UiError>;

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), UiError>;

    async fn fill(&self, selector: &str, text: &str) -> Result<(), UiError>;

    async fn is_visible(&self, selector: &str) -> Result<bool, UiError>;

    async fn inner_text(&self, selector: &str) -> Result<String, UiError>;

    async fn inner_html(&self, selector: &str) -> Result<String, UiError>;

    async fn screenshot(&self, selector: &str, path: &Path) -> Result<(), UiError>;
}
