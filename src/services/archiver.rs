//! Receipts archiver.
//!
//! Bundles the receipts directory into one deflate-compressed zip, written
//! once at the end of a batch run. Entries are sorted by file name so the
//! archive layout is deterministic.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult, ArchiveError};

/// Zip the files of `receipts_dir` into `archive_path`
pub fn archive_receipts(receipts_dir: &Path, archive_path: &Path) -> AppResult<()> {
    let io_err = |path: &Path, source: io::Error| {
        AppError::Archive(ArchiveError::Io {
            path: path.display().to_string(),
            source,
        })
    };

    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let file = File::create(archive_path).map_err(|e| io_err(archive_path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = fs::read_dir(receipts_dir)
        .map_err(|e| io_err(receipts_dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(receipts_dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut bundled = 0usize;
    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        debug!("bundling {}", name);
        zip.start_file(&name, options)
            .map_err(|e| AppError::archive_zip_failed(archive_path.display().to_string(), e))?;
        let mut source = File::open(&path).map_err(|e| io_err(&path, e))?;
        io::copy(&mut source, &mut zip).map_err(|e| io_err(&path, e))?;
        bundled += 1;
    }

    zip.finish()
        .map_err(|e| AppError::archive_zip_failed(archive_path.display().to_string(), e))?;

    info!(
        "✓ {} receipt file(s) archived to {}",
        bundled,
        archive_path.display()
    );
    Ok(())
}
