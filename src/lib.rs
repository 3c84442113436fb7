//! # Robot Order Submit
//!
//! Automates the RobotSpareBin order workflow: download the order CSV, submit
//! each order through the web form, capture the receipt as a merged
//! PDF+screenshot artifact, and archive all receipts into one zip.
//!
//! ## Architecture
//!
//! The system is split into four layers:
//!
//! ### ① Infrastructure
//! - `infrastructure/` - holds the scarce resources (browser page, PDF
//!   renderer) and exposes only capabilities
//! - `PageSession` - the only page owner, implements [`UiSession`]
//! - `ChromiumPdfEngine` - implements [`ReceiptRenderer`]
//!
//! ### ② Services
//! - `services/` - "what I can do", each handling a single concern
//! - `OrderSource` - download + parse the order CSV
//! - `FormSubmitter` - drive one order through the form
//! - `ReceiptCapturer` - PDF + PNG artifacts, merged into one file
//! - `archiver` - zip the receipts directory
//!
//! ### ③ Workflow
//! - `workflow/` - the complete processing flow for a single order
//! - `OrderCtx` - context (order number + batch index)
//! - `OrderFlow` - orchestration (modal → fill → preview → submit → capture)
//! - `submission` - bounded retry around the submit step
//!
//! ### ④ Orchestration
//! - `orchestrator/batch_runner` - iterates the batch, isolates per-order
//!   failures, triggers archiving
//! - `orchestrator::App` - owns the browser and wires everything together

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod selectors;
pub mod services;
pub mod utils;
pub mod workflow;

pub use browser::launch_headless_browser;
pub use config::Config;
pub use error::{AppError, OrderError, ServerRejection};
pub use infrastructure::{CaptureError, PageSession, ReceiptRenderer, UiError, UiSession};
pub use models::OrderRecord;
pub use orchestrator::{run_batch, App, BatchStats};
pub use workflow::{OrderCtx, OrderFlow};
