//! Order feed service.
//!
//! Downloads the CSV feed to a fixed local path (overwriting any prior copy)
//! and parses it into order records. A failure here is fatal to the batch:
//! with no feed there is nothing to process, so there is no retry at this
//! layer.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ParseError};
use crate::models::OrderRecord;

/// Header column the feed must carry; its absence means a bogus download
const ORDER_NUMBER_COLUMN: &str = "Order number";

/// Order feed service
pub struct OrderSource {
    csv_url: String,
    download_path: PathBuf,
}

impl OrderSource {
    pub fn new(config: &Config) -> Self {
        Self {
            csv_url: config.csv_url.clone(),
            download_path: PathBuf::from(&config.csv_download_path),
        }
    }

    /// Download the feed and parse it into the ordered batch sequence
    pub async fn fetch_orders(&self) -> AppResult<Vec<OrderRecord>> {
        self.download().await?;
        let orders = read_orders(&self.download_path)?;
        info!("✓ order feed parsed: {} orders", orders.len());
        Ok(orders)
    }

    async fn download(&self) -> AppResult<()> {
        info!("⬇ downloading order feed from {}", self.csv_url);

        let response = reqwest::get(&self.csv_url)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::download_unreachable(&self.csv_url, e))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::download_unreachable(&self.csv_url, e))?;

        if let Some(parent) = self.download_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::download_write_failed(parent.display().to_string(), e))?;
        }
        fs::write(&self.download_path, &bytes)
            .map_err(|e| AppError::download_write_failed(self.download_path.display().to_string(), e))?;

        debug!(
            "feed written to {} ({} bytes)",
            self.download_path.display(),
            bytes.len()
        );
        Ok(())
    }
}

/// Parse the downloaded feed, first row as header
pub fn read_orders(path: &Path) -> AppResult<Vec<OrderRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            AppError::Parse(ParseError::ReadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::parse_malformed(path.display().to_string(), e))?;
    if !headers.iter().any(|h| h == ORDER_NUMBER_COLUMN) {
        return Err(AppError::Parse(ParseError::MissingHeader {
            path: path.display().to_string(),
        }));
    }

    let mut orders = Vec::new();
    for record in reader.deserialize() {
        let order: OrderRecord =
            record.map_err(|e| AppError::parse_malformed(path.display().to_string(), e))?;
        orders.push(order);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Write;

    fn write_feed(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write feed");
        file
    }

    #[test]
    fn reads_ordered_records() {
        let feed = write_feed(
            "Order number,Head,Body,Legs,Address\n\
             1,2,1,Red,Stockholm St 1\n\
             2,3,3,Blue,Helsinki Rd 7\n",
        );

        let orders = read_orders(feed.path()).expect("parse");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_number, "1");
        assert_eq!(orders[1].address, "Helsinki Rd 7");
    }

    #[test]
    fn missing_header_is_a_parse_error() {
        let feed = write_feed("1,2,1,Red,Stockholm St 1\n");

        let result = read_orders(feed.path());
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MissingHeader { .. }))
        ));
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let feed = write_feed("Order number,Head,Body,Legs,Address\n1,2,1\n");

        let result = read_orders(feed.path());
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::Malformed { .. }))
        ));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let result = read_orders(Path::new("definitely/not/here.csv"));
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::ReadFailed { .. }))
        ));
    }
}
