//! Infrastructure layer.
//!
//! Holds the scarce resources (the browser page and the PDF render pipeline)
//! and exposes them only as capabilities. Nothing in this layer knows what an
//! order is or what the processing flow looks like.

pub mod page_session;
pub mod pdf_engine;
pub mod ui_session;

pub use page_session::PageSession;
pub use pdf_engine::{CaptureError, ChromiumPdfEngine, ReceiptRenderer};
pub use ui_session::{UiError, UiSession};
