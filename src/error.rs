use std::fmt;

use crate::infrastructure::{CaptureError, UiError};

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Order feed could not be downloaded
    Download(DownloadError),
    /// Order feed could not be parsed
    Parse(ParseError),
    /// Browser launch / navigation errors
    Browser(BrowserError),
    /// Receipts archive could not be written
    Archive(ArchiveError),
    /// Per-order pipeline error (recoverable at the batch boundary)
    Order(OrderError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Download(e) => write!(f, "download error: {}", e),
            AppError::Parse(e) => write!(f, "parse error: {}", e),
            AppError::Browser(e) => write!(f, "browser error: {}", e),
            AppError::Archive(e) => write!(f, "archive error: {}", e),
            AppError::Order(e) => write!(f, "order error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Download(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Browser(e) => Some(e),
            AppError::Archive(e) => Some(e),
            AppError::Order(e) => Some(e),
        }
    }
}

/// Order feed download errors. Fatal: there is nothing to process.
#[derive(Debug)]
pub enum DownloadError {
    /// The remote resource was unreachable
    Unreachable {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing the downloaded bytes to the fixed local path failed
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Unreachable { url, source } => {
                write!(f, "cannot reach {}: {}", url, source)
            }
            DownloadError::WriteFailed { path, source } => {
                write!(f, "cannot write download to {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Unreachable { source, .. }
            | DownloadError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// Order feed parse errors. Fatal: there is nothing to process.
#[derive(Debug)]
pub enum ParseError {
    /// The CSV is missing the expected header row
    MissingHeader { path: String },
    /// The CSV is malformed (ragged rows, bad encoding, ...)
    Malformed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The downloaded file could not be read back
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader { path } => {
                write!(f, "missing header row in {}", path)
            }
            ParseError::Malformed { path, source } => {
                write!(f, "malformed CSV in {}: {}", path, source)
            }
            ParseError::ReadFailed { path, source } => {
                write!(f, "cannot read {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Malformed { source, .. } | ParseError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ParseError::MissingHeader { .. } => None,
        }
    }
}

/// Browser lifecycle errors
#[derive(Debug)]
pub enum BrowserError {
    /// The browser configuration was rejected
    ConfigurationFailed { message: String },
    /// Launching the headless browser failed
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Creating a page failed
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Navigation failed
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::ConfigurationFailed { message } => {
                write!(f, "browser configuration rejected: {}", message)
            }
            BrowserError::LaunchFailed { source } => {
                write!(f, "cannot launch browser: {}", source)
            }
            BrowserError::PageCreationFailed { source } => {
                write!(f, "cannot create page: {}", source)
            }
            BrowserError::NavigationFailed { url, source } => {
                write!(f, "cannot navigate to {}: {}", url, source)
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::LaunchFailed { source }
            | BrowserError::PageCreationFailed { source }
            | BrowserError::NavigationFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            BrowserError::ConfigurationFailed { .. } => None,
        }
    }
}

/// Archive errors. Fatal: the batch output is incomplete without the bundle.
#[derive(Debug)]
pub enum ArchiveError {
    /// Filesystem error while walking or reading the receipts directory
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Zip writer error
    Zip {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Io { path, source } => {
                write!(f, "archive I/O failed ({}): {}", path, source)
            }
            ArchiveError::Zip { path, source } => {
                write!(f, "zip write failed ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Io { source, .. } => Some(source),
            ArchiveError::Zip { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// Per-order pipeline error.
///
/// Everything here is recoverable at the batch boundary: the order is logged
/// and skipped, the batch continues.
#[derive(Debug)]
pub enum OrderError {
    /// A form control was missing or not interactable in time
    Ui(UiError),
    /// The server rejected the submission (error banner shown)
    Server(ServerRejection),
    /// Receipt artifacts could not be produced
    Capture(CaptureError),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::Ui(e) => write!(f, "UI interaction failed: {}", e),
            OrderError::Server(e) => write!(f, "{}", e),
            OrderError::Capture(e) => write!(f, "receipt capture failed: {}", e),
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderError::Ui(e) => Some(e),
            OrderError::Server(e) => Some(e),
            OrderError::Capture(e) => Some(e),
        }
    }
}

impl From<UiError> for OrderError {
    fn from(err: UiError) -> Self {
        OrderError::Ui(err)
    }
}

impl From<ServerRejection> for OrderError {
    fn from(err: ServerRejection) -> Self {
        OrderError::Server(err)
    }
}

impl From<CaptureError> for OrderError {
    fn from(err: CaptureError) -> Self {
        OrderError::Capture(err)
    }
}

/// The post-submit error banner was visible; carries its text
#[derive(Debug, Clone)]
pub struct ServerRejection {
    pub message: String,
}

impl ServerRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server rejected the order: {}", self.message)
    }
}

impl std::error::Error for ServerRejection {}

// ========== Convenience constructors ==========

impl AppError {
    /// Download failure for a given URL
    pub fn download_unreachable(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Download(DownloadError::Unreachable {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// Failure writing the downloaded feed to disk
    pub fn download_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Download(DownloadError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// Malformed CSV at a given path
    pub fn parse_malformed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Parse(ParseError::Malformed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// Zip write failure
    pub fn archive_zip_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Archive(ArchiveError::Zip {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result type alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
