//! Chromiumoxide-backed UI session.
//!
//! The only owner of the order-form `Page`. Everything the pipeline does to
//! the page goes through the [`UiSession`] capability implemented here; most
//! interactions are driven through script evaluation.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::Page;
use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;
use crate::infrastructure::ui_session::{UiError, UiSession};

/// UI session over one chromiumoxide page
pub struct PageSession {
    page: Page,
    timeout_ms: u64,
    poll_interval_ms: u64,
}

impl PageSession {
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            timeout_ms: config.ui_timeout_ms,
            poll_interval_ms: config.ui_poll_interval_ms,
        }
    }

    /// Evaluate a script and deserialize its completion value
    async fn eval<T: serde::de::DeserializeOwned>(
        &self,
        selector: &str,
        js_code: String,
    ) -> Result<T, UiError> {
        let result = self
            .page
            .evaluate(js_code)
            .await
            .map_err(|e| UiError::Driver {
                selector: selector.to_string(),
                source: Box::new(e),
            })?;
        result.into_value().map_err(|e| UiError::Driver {
            selector: selector.to_string(),
            source: Box::new(e),
        })
    }

    /// Poll until the selector matches an element, up to the session timeout
    async fn wait_for(&self, selector: &str) -> Result<(), UiError> {
        let mut waited = 0u64;
        loop {
            let present: bool = self
                .eval(
                    selector,
                    format!("!!document.querySelector({})", js_str(selector)),
                )
                .await?;
            if present {
                return Ok(());
            }
            if waited >= self.timeout_ms {
                return Err(UiError::Timeout {
                    selector: selector.to_string(),
                    timeout_ms: self.timeout_ms,
                });
            }
            sleep(Duration::from_millis(self.poll_interval_ms)).await;
            waited += self.poll_interval_ms;
        }
    }
}

impl UiSession for PageSession {
    async fn navigate(&self, url: &str) -> Result<(), UiError> {
        debug!("navigating to {}", url);
        self.page.goto(url).await.map_err(|e| UiError::Navigation {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), UiError> {
        self.wait_for(selector).await?;
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| UiError::Driver {
                selector: selector.to_string(),
                source: Box::new(e),
            })?;
        element.click().await.map_err(|e| UiError::Driver {
            selector: selector.to_string(),
            source: Box::new(e),
        })?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), UiError> {
        self.wait_for(selector).await?;
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                el.value = {val};
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = js_str(selector),
            val = js_str(value),
        );
        let ok: bool = self.eval(selector, js_code).await?;
        if ok {
            Ok(())
        } else {
            Err(UiError::NotFound {
                selector: selector.to_string(),
            })
        }
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), UiError> {
        self.wait_for(selector).await?;
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                const setter = Object.getOwnPropertyDescriptor(
                    window.HTMLInputElement.prototype, 'value').set;
                setter.call(el, {val});
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = js_str(selector),
            val = js_str(text),
        );
        let ok: bool = self.eval(selector, js_code).await?;
        if ok {
            Ok(())
        } else {
            Err(UiError::NotFound {
                selector: selector.to_string(),
            })
        }
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, UiError> {
        // No waiting here: callers probe for modals and banners that are
        // expected to be absent most of the time.
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return !!(el && (el.offsetWidth || el.offsetHeight || el.getClientRects().length));
            }})()"#,
            sel = js_str(selector),
        );
        self.eval(selector, js_code).await
    }

    async fn inner_text(&self, selector: &str) -> Result<String, UiError> {
        self.wait_for(selector).await?;
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return el ? el.innerText : null;
            }})()"#,
            sel = js_str(selector),
        );
        let text: Option<String> = self.eval(selector, js_code).await?;
        text.ok_or_else(|| UiError::NotFound {
            selector: selector.to_string(),
        })
    }

    async fn inner_html(&self, selector: &str) -> Result<String, UiError> {
        self.wait_for(selector).await?;
        let js_code = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return el ? el.innerHTML : null;
            }})()"#,
            sel = js_str(selector),
        );
        let html: Option<String> = self.eval(selector, js_code).await?;
        html.ok_or_else(|| UiError::NotFound {
            selector: selector.to_string(),
        })
    }

    async fn screenshot(&self, selector: &str, path: &Path) -> Result<(), UiError> {
        self.wait_for(selector).await?;
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| UiError::Screenshot {
                selector: selector.to_string(),
                source: Box::new(e),
            })?;
        element
            .save_screenshot(CaptureScreenshotFormat::Png, path)
            .await
            .map_err(|e| UiError::Screenshot {
                selector: selector.to_string(),
                source: Box::new(e),
            })?;
        Ok(())
    }
}

/// Quote a string as a JS literal (handles quotes and backslashes)
pub(crate) fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
