//! Per-order processing flow.
//!
//! One order, start to finish: dismiss the modal, fill the form, open the
//! preview, submit with retry, capture the receipt, reset the form for the
//! next order. The flow holds no page itself; the session is passed in by
//! the batch runner.

use tracing::debug;

use crate::config::Config;
use crate::error::OrderError;
use crate::infrastructure::{ReceiptRenderer, UiSession};
use crate::models::OrderRecord;
use crate::selectors;
use crate::services::{FormSubmitter, ReceiptArtifact, ReceiptCapturer};
use crate::workflow::order_ctx::OrderCtx;
use crate::workflow::submission;

/// Per-order processing flow
pub struct OrderFlow<R: ReceiptRenderer> {
    submitter: FormSubmitter,
    capturer: ReceiptCapturer<R>,
    max_retries: usize,
}

impl<R: ReceiptRenderer> OrderFlow<R> {
    pub fn new(config: &Config, renderer: R) -> Self {
        Self {
            submitter: FormSubmitter::new(),
            capturer: ReceiptCapturer::new(renderer, &config.receipts_dir),
            max_retries: config.max_retries,
        }
    }

    /// Run one order through the whole pipeline.
    ///
    /// Any error returned here is a per-order failure; the caller logs it and
    /// moves on to the next order.
    pub async fn run<S: UiSession>(
        &self,
        session: &S,
        order: &OrderRecord,
        ctx: &OrderCtx,
    ) -> Result<ReceiptArtifact, OrderError> {
        self.submitter.close_modal(session).await?;
        self.submitter.fill_form(session, order).await?;
        self.submitter.click_preview(session).await?;

        submission::submit_with_retry(session, ctx, self.max_retries).await?;

        let artifact = self.capturer.capture(session, &order.order_number).await?;

        // Reset the form so the next order starts from a clean page
        debug!("{} resetting form for the next order", ctx);
        session.click(selectors::ORDER_ANOTHER_BUTTON).await?;

        Ok(artifact)
    }
}
