//! Form submission service.
//!
//! Drives one order through the form: dismiss the blocking modal, pick the
//! head and body parts, fill the free-text fields, open the preview. Every
//! interaction error propagates to the caller; nothing is swallowed here.

use tracing::{debug, info};

use crate::error::OrderError;
use crate::infrastructure::UiSession;
use crate::models::OrderRecord;
use crate::selectors;

/// Form submission service
pub struct FormSubmitter;

impl FormSubmitter {
    pub fn new() -> Self {
        Self
    }

    /// Dismiss the blocking modal if it is up. Idempotent: a no-op when the
    /// modal is absent.
    pub async fn close_modal<S: UiSession>(&self, session: &S) -> Result<(), OrderError> {
        if session.is_visible(selectors::MODAL_OK_BUTTON).await? {
            debug!("dismissing modal");
            session.click(selectors::MODAL_OK_BUTTON).await?;
        }
        Ok(())
    }

    /// Fill every field of the order form
    pub async fn fill_form<S: UiSession>(
        &self,
        session: &S,
        order: &OrderRecord,
    ) -> Result<(), OrderError> {
        info!("filling form for order {}", order.order_number);

        self.select_head(session, &order.head).await?;
        self.select_body(session, &order.body).await?;
        self.fill_legs(session, &order.legs).await?;
        self.fill_address(session, &order.address).await?;

        Ok(())
    }

    /// Open the robot preview
    pub async fn click_preview<S: UiSession>(&self, session: &S) -> Result<(), OrderError> {
        session.click(selectors::PREVIEW_BUTTON).await?;
        Ok(())
    }

    /// Head is a dropdown, single choice
    async fn select_head<S: UiSession>(&self, session: &S, value: &str) -> Result<(), OrderError> {
        debug!("head input: {}", value);
        session
            .select_option(selectors::HEAD_DROPDOWN, value)
            .await?;
        Ok(())
    }

    /// Body is a radio group, mutually exclusive choice
    async fn select_body<S: UiSession>(&self, session: &S, value: &str) -> Result<(), OrderError> {
        debug!("body input: {}", value);
        session.click(&selectors::body_radio(value)).await?;
        Ok(())
    }

    async fn fill_legs<S: UiSession>(&self, session: &S, value: &str) -> Result<(), OrderError> {
        debug!("legs input: {}", value);
        session.fill(selectors::LEGS_INPUT, value).await?;
        Ok(())
    }

    async fn fill_address<S: UiSession>(&self, session: &S, value: &str) -> Result<(), OrderError> {
        debug!("address input: {}", value);
        session.fill(selectors::ADDRESS_INPUT, value).await?;
        Ok(())
    }
}

impl Default for FormSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::UiError;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every interaction; the modal is only visible on the first probe
    struct RecordingSession {
        modal_visible: bool,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingSession {
        fn new(modal_visible: bool) -> Self {
            Self {
                modal_visible,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().expect("lock").push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    impl UiSession for RecordingSession {
        async fn navigate(&self, url: &str) -> Result<(), UiError> {
            self.record(format!("navigate {url}"));
            Ok(())
        }

        async fn click(&self, selector: &str) -> Result<(), UiError> {
            self.record(format!("click {selector}"));
            Ok(())
        }

        async fn select_option(&self, selector: &str, value: &str) -> Result<(), UiError> {
            self.record(format!("select {selector}={value}"));
            Ok(())
        }

        async fn fill(&self, selector: &str, text: &str) -> Result<(), UiError> {
            self.record(format!("fill {selector}={text}"));
            Ok(())
        }

        async fn is_visible(&self, selector: &str) -> Result<bool, UiError> {
            self.record(format!("is_visible {selector}"));
            Ok(self.modal_visible)
        }

        async fn inner_text(&self, _selector: &str) -> Result<String, UiError> {
            Ok(String::new())
        }

        async fn inner_html(&self, _selector: &str) -> Result<String, UiError> {
            Ok(String::new())
        }

        async fn screenshot(&self, _selector: &str, _path: &Path) -> Result<(), UiError> {
            Ok(())
        }
    }

    fn order() -> OrderRecord {
        OrderRecord {
            order_number: "1".to_string(),
            head: "2".to_string(),
            body: "1".to_string(),
            legs: "Red".to_string(),
            address: "Stockholm St 1".to_string(),
        }
    }

    #[tokio::test]
    async fn fill_form_touches_every_field_in_order() {
        let session = RecordingSession::new(false);
        let submitter = FormSubmitter::new();

        submitter.fill_form(&session, &order()).await.expect("fill");

        assert_eq!(
            session.calls(),
            vec![
                "select #head=2".to_string(),
                format!("click {}", selectors::body_radio("1")),
                "fill input[type='number']=Red".to_string(),
                "fill #address=Stockholm St 1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn close_modal_is_noop_when_absent() {
        let session = RecordingSession::new(false);
        let submitter = FormSubmitter::new();

        submitter.close_modal(&session).await.expect("close");

        assert_eq!(
            session.calls(),
            vec![format!("is_visible {}", selectors::MODAL_OK_BUTTON)]
        );
    }

    #[tokio::test]
    async fn close_modal_clicks_when_visible() {
        let session = RecordingSession::new(true);
        let submitter = FormSubmitter::new();

        submitter.close_modal(&session).await.expect("close");

        assert_eq!(
            session.calls(),
            vec![
                format!("is_visible {}", selectors::MODAL_OK_BUTTON),
                format!("click {}", selectors::MODAL_OK_BUTTON),
            ]
        );
    }
}
