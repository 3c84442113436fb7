//! Batch runner - orchestration layer.
//!
//! Iterates the order sequence, isolates per-order failures, and triggers
//! the final archiving step. The resilience contract lives here: one bad
//! order must never block the rest of the batch. Only a missing feed or a
//! failed archive is fatal.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::{AppError, AppResult, ArchiveError};
use crate::infrastructure::{ChromiumPdfEngine, PageSession, ReceiptRenderer, UiSession};
use crate::models::OrderRecord;
use crate::services::{archiver, OrderSource};
use crate::workflow::{OrderCtx, OrderFlow};

/// Application main structure
pub struct App {
    config: Config,
    _browser: Browser,
    session: PageSession,
    renderer: ChromiumPdfEngine,
}

impl App {
    /// Launch the browser and set up the session and render pipeline
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, page) = browser::launch_headless_browser(&config).await?;
        let session = PageSession::new(page, &config);
        let renderer = ChromiumPdfEngine::new(&browser).await?;

        Ok(Self {
            config,
            _browser: browser,
            session,
            renderer,
        })
    }

    /// Run the whole batch: fetch, process, archive
    pub async fn run(&self) -> Result<()> {
        let source = OrderSource::new(&self.config);
        let orders = source.fetch_orders().await?;

        if orders.is_empty() {
            warn!("⚠️ order feed is empty, nothing to process");
        }

        let flow = OrderFlow::new(&self.config, self.renderer.clone());
        let stats = run_batch(&self.session, &flow, &orders, &self.config).await?;

        print_final_stats(&stats, &self.config);
        Ok(())
    }
}

/// Batch statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}

/// Process every order of the batch, then archive the receipts.
///
/// Per-order errors are inspected here, logged with the order identifier,
/// and counted; processing always continues with the next order. The
/// archive step runs regardless of how many orders failed.
pub async fn run_batch<S: UiSession, R: ReceiptRenderer>(
    session: &S,
    flow: &OrderFlow<R>,
    orders: &[OrderRecord],
    config: &Config,
) -> AppResult<BatchStats> {
    let mut stats = BatchStats {
        total: orders.len(),
        ..Default::default()
    };

    // The archiver reads this directory even when every order failed
    fs::create_dir_all(&config.receipts_dir).map_err(|e| {
        AppError::Archive(ArchiveError::Io {
            path: config.receipts_dir.clone(),
            source: e,
        })
    })?;

    // ========== Sequential order loop ==========
    for (index, order) in orders.iter().enumerate() {
        let ctx = OrderCtx::new(order.order_number.clone(), index + 1);
        info!("\n{}", "─".repeat(60));
        info!("📦 {} processing ({}/{})", ctx, index + 1, orders.len());

        match flow.run(session, order, &ctx).await {
            Ok(artifact) => {
                info!("{} ✅ receipt stored: {}", ctx, artifact.pdf_path.display());
                stats.succeeded += 1;
            }
            Err(e) => {
                error!("{} ❌ processing failed: {}", ctx, e);
                stats.failed += 1;
            }
        }
    }

    // ========== Archive, however the loop went ==========
    info!("\n📦 archiving receipts...");
    archiver::archive_receipts(
        Path::new(&config.receipts_dir),
        Path::new(&config.archive_path),
    )?;

    Ok(stats)
}

// ========== Log helpers ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 robot order batch run");
    info!("📊 submit attempts per order: {}", config.max_retries);
    info!("📁 receipts directory: {}", config.receipts_dir);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &BatchStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 batch complete");
    info!(
        "finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ succeeded: {}/{}", stats.succeeded, stats.total);
    info!("❌ failed: {}", stats.failed);
    info!("🗜 archive: {}", config.archive_path);
    info!("{}", "=".repeat(60));
    info!("done");
}
