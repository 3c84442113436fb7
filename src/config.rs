/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the robot order form
    pub order_page_url: String,
    /// URL of the order CSV feed
    pub csv_url: String,
    /// Fixed local path the CSV is downloaded to (overwritten each run)
    pub csv_download_path: String,
    /// Directory receipt artifacts are written into
    pub receipts_dir: String,
    /// Path of the final receipts archive
    pub archive_path: String,
    /// Total submit attempts per order (first try included)
    pub max_retries: usize,
    /// How long to wait for a UI control before giving up (ms)
    pub ui_timeout_ms: u64,
    /// Poll interval while waiting for a UI control (ms)
    pub ui_poll_interval_ms: u64,
    /// Run the browser headless
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order_page_url: "https://robotsparebinindustries.com/#/robot-order".to_string(),
            csv_url: "https://robotsparebinindustries.com/orders.csv".to_string(),
            csv_download_path: "output/orders.csv".to_string(),
            receipts_dir: "output/receipts".to_string(),
            archive_path: "output/receipts.zip".to_string(),
            max_retries: 3,
            ui_timeout_ms: 10_000,
            ui_poll_interval_ms: 200,
            headless: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            order_page_url: std::env::var("ORDER_PAGE_URL").unwrap_or(default.order_page_url),
            csv_url: std::env::var("ORDERS_CSV_URL").unwrap_or(default.csv_url),
            csv_download_path: std::env::var("ORDERS_CSV_PATH").unwrap_or(default.csv_download_path),
            receipts_dir: std::env::var("RECEIPTS_DIR").unwrap_or(default.receipts_dir),
            archive_path: std::env::var("RECEIPTS_ARCHIVE_PATH").unwrap_or(default.archive_path),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            ui_timeout_ms: std::env::var("UI_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ui_timeout_ms),
            ui_poll_interval_ms: std::env::var("UI_POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ui_poll_interval_ms),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
        }
    }
}
