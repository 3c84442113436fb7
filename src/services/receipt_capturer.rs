//! Receipt capture service.
//!
//! For a completed order: serialize the on-page receipt to a PDF, screenshot
//! the robot preview to a PNG, then append the PNG to the PDF as a centered
//! page. The PDF is assembled at a hidden work path and only moved to its
//! canonical name once the merge succeeded, so a failed capture leaves no
//! artifact for the archiver to pick up. File names are derived from the
//! order number only, so repeating a capture overwrites instead of
//! duplicating.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::OrderError;
use crate::infrastructure::{CaptureError, ReceiptRenderer, UiSession};
use crate::selectors;

/// Artifacts produced for one successful order.
///
/// The PNG is transient: once merged into the PDF it is removed from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptArtifact {
    pub pdf_path: PathBuf,
    pub png_path: PathBuf,
}

/// Receipt capture service
pub struct ReceiptCapturer<R: ReceiptRenderer> {
    renderer: R,
    receipts_dir: PathBuf,
}

impl<R: ReceiptRenderer> ReceiptCapturer<R> {
    pub fn new(renderer: R, receipts_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            receipts_dir: receipts_dir.into(),
        }
    }

    /// Canonical PDF path for an order
    pub fn pdf_path(&self, order_number: &str) -> PathBuf {
        self.receipts_dir.join(format!("receipt-{}.pdf", order_number))
    }

    fn png_path(&self, order_number: &str) -> PathBuf {
        self.receipts_dir.join(format!("receipt-{}.png", order_number))
    }

    /// Hidden assembly path; never survives a capture, success or failure
    fn work_path(&self, order_number: &str) -> PathBuf {
        self.receipts_dir
            .join(format!(".receipt-{}.part.pdf", order_number))
    }

    /// Capture the receipt of the order currently confirmed on the page
    pub async fn capture<S: UiSession>(
        &self,
        session: &S,
        order_number: &str,
    ) -> Result<ReceiptArtifact, OrderError> {
        fs::create_dir_all(&self.receipts_dir).map_err(|e| {
            OrderError::Capture(CaptureError::Io {
                path: self.receipts_dir.display().to_string(),
                source: e,
            })
        })?;

        let html = session
            .inner_html(selectors::RECEIPT)
            .await
            .map_err(|e| missing_content(selectors::RECEIPT, e))?;

        let pdf_path = self.pdf_path(order_number);
        let png_path = self.png_path(order_number);
        let work_path = self.work_path(order_number);

        if let Err(e) = self.assemble(session, &html, &work_path, &png_path).await {
            discard(&work_path);
            discard(&png_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&work_path, &pdf_path) {
            discard(&work_path);
            discard(&png_path);
            return Err(OrderError::Capture(CaptureError::Io {
                path: pdf_path.display().to_string(),
                source: e,
            }));
        }

        // The PNG now lives inside the PDF; a leftover file is harmless
        if let Err(e) = fs::remove_file(&png_path) {
            warn!("could not remove {}: {}", png_path.display(), e);
        }

        info!("✓ receipt for order {} consolidated", order_number);
        Ok(ReceiptArtifact { pdf_path, png_path })
    }

    /// Build the merged PDF at the work path
    async fn assemble<S: UiSession>(
        &self,
        session: &S,
        html: &str,
        work_path: &Path,
        png_path: &Path,
    ) -> Result<(), OrderError> {
        self.renderer
            .html_to_pdf(html, work_path)
            .await
            .map_err(OrderError::Capture)?;
        debug!("receipt PDF written to {}", work_path.display());

        session
            .screenshot(selectors::PREVIEW_IMAGE, png_path)
            .await
            .map_err(|e| missing_content(selectors::PREVIEW_IMAGE, e))?;
        debug!("preview PNG written to {}", png_path.display());

        self.renderer
            .append_image(work_path, png_path)
            .map_err(OrderError::Capture)
    }
}

/// Best-effort removal of a partial artifact
fn discard(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

fn missing_content(selector: &str, source: crate::infrastructure::UiError) -> OrderError {
    OrderError::Capture(CaptureError::MissingContent {
        selector: selector.to_string(),
        source,
    })
}
