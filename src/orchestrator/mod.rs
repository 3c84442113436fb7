//! Orchestration layer.
//!
//! ## Responsibilities
//!
//! The top of the system: owns the browser, pulls the batch, and schedules
//! the per-order flow.
//!
//! ### `batch_runner`
//! - owns the application lifecycle (initialize, run)
//! - fetches the order sequence once via `OrderSource`
//! - iterates orders strictly sequentially, one browser session for all
//! - isolates per-order failures: a failed order is logged and skipped,
//!   never aborts the batch
//! - archives the receipts directory after the loop, however many orders
//!   failed
//! - reports the final statistics
//!
//! ## Layering
//!
//! ```text
//! batch_runner (Vec<OrderRecord>)
//!     ↓
//! workflow::OrderFlow (one OrderRecord)
//!     ↓
//! services (form / retry / capture / archive)
//!     ↓
//! infrastructure (PageSession, ChromiumPdfEngine)
//! ```

pub mod batch_runner;

pub use batch_runner::{run_batch, App, BatchStats};
