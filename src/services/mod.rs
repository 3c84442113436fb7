//! Service layer.
//!
//! Each service covers one capability over a single order or a single file
//! set. None of them knows about the batch loop.

pub mod archiver;
pub mod form_submitter;
pub mod order_source;
pub mod receipt_capturer;

pub use form_submitter::FormSubmitter;
pub use order_source::OrderSource;
pub use receipt_capturer::{ReceiptArtifact, ReceiptCapturer};
