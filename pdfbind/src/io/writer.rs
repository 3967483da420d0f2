//! Writing the merged document to disk.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite checks
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::io::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> pdfbind::Result<()> {
//! let writer = PdfWriter::new();
//! writer.write(&bytes, Path::new("merged_document.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;

use crate::error::{PdfBindError, Result};
use crate::utils::format_file_size;

/// Options for writing output files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { atomic: true }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes serialized PDFs to disk.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that writes straight to the target path.
    pub fn non_atomic() -> Self {
        Self::with_options(WriteOptions { atomic: false })
    }

    /// Write `bytes` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::FailedToCreateOutput`] or
    /// [`PdfBindError::FailedToWrite`] on I/O failure. With atomic writes
    /// the target is left untouched on failure.
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        let write_path = if self.options.atomic {
            temp_path(path)
        } else {
            path.to_path_buf()
        };

        let result = write_file(&write_path, bytes).await;
        if result.is_err() && self.options.atomic {
            let _ = tokio::fs::remove_file(&write_path).await;
        }
        result?;

        if self.options.atomic
            && let Err(e) = tokio::fs::rename(&write_path, path).await
        {
            let _ = tokio::fs::remove_file(&write_path).await;
            return Err(PdfBindError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output file");

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        })
    }

    /// Check that the output directory exists and is writable.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::InvalidConfig`] if the parent directory is
    /// missing or read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
            PdfBindError::invalid_config(format!(
                "Output directory does not exist: {}",
                parent.display()
            ))
        })?;

        if !metadata.is_dir() {
            return Err(PdfBindError::invalid_config(format!(
                "Output directory is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfBindError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        tokio::fs::File::create(path)
            .await
            .map_err(|e| PdfBindError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

    let to_write_error = |e| PdfBindError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    };

    file.write_all(bytes).await.map_err(to_write_error)?;
    file.flush().await.map_err(to_write_error)?;
    file.sync_all().await.map_err(to_write_error)?;

    Ok(())
}

/// Hidden sibling of `path` used as the atomic write target.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
