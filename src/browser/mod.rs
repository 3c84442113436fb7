//! Browser lifecycle.
//!
//! Launches the one browser instance the batch run owns and opens the order
//! form page in it.

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::BrowserError;

/// Launch the browser and navigate a fresh page to the order form
pub async fn launch_headless_browser(config: &Config) -> Result<(Browser, Page), BrowserError> {
    info!("🚀 launching browser...");
    debug!("order form URL: {}", config.order_page_url);

    let mut builder = BrowserConfig::builder().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if !config.headless {
        builder = builder.with_head();
    }
    let browser_config = builder
        .build()
        .map_err(|message| BrowserError::ConfigurationFailed { message })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("browser launch failed: {}", e);
        BrowserError::LaunchFailed {
            source: Box::new(e),
        }
    })?;
    debug!("browser launched");

    // Drive browser events in the background
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // Short settle delay so the browser state is synchronized
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser
        .new_page(config.order_page_url.as_str())
        .await
        .map_err(|e| {
            error!("cannot open order form page: {}", e);
            BrowserError::NavigationFailed {
                url: config.order_page_url.clone(),
                source: Box::new(e),
            }
        })?;

    info!("✅ order form open at: {}", config.order_page_url);

    Ok((browser, page))
}
