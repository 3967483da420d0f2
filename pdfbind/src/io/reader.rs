//! Reading selected files from disk.
//!
//! Files are read whole, one after another, in the order given. Nothing is
//! decoded here; a file becomes a [`SelectedFile`] carrying its name and raw
//! bytes, and decoding happens when the merge runs.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::io::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfbind::Result<()> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (files, stats) = reader.read_all(&paths).await?;
//! println!("Read {} files, {}", files.len(), stats.format_total_size());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfBindError, Result};
use crate::files::SelectedFile;
use crate::utils::{display_name, format_file_size};

/// Statistics for a batch read.
#[derive(Debug, Clone, Default)]
pub struct ReadStatistics {
    /// Number of files read.
    pub file_count: usize,

    /// Combined size of the files in bytes.
    pub total_size: u64,

    /// Total time taken.
    pub total_time: Duration,
}

impl ReadStatistics {
    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Reads input files into memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one file.
    ///
    /// The file is listed under its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path is not a regular file
    /// - The file cannot be read
    pub async fn read(&self, path: &Path) -> Result<SelectedFile> {
        check_path_exists(path).await?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| PdfBindError::FailedToRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "read input file");

        Ok(SelectedFile::new(display_name(path), content))
    }

    /// Read several files sequentially, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first file that cannot be read.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<(Vec<SelectedFile>, ReadStatistics)> {
        self.read_with_progress(paths, |_, _| {}).await
    }

    /// Read several files sequentially, calling `on_progress` with the
    /// index and content of each file as it is read.
    ///
    /// # Errors
    ///
    /// Returns the error of the first file that cannot be read.
    pub async fn read_with_progress<F>(
        &self,
        paths: &[PathBuf],
        mut on_progress: F,
    ) -> Result<(Vec<SelectedFile>, ReadStatistics)>
    where
        F: FnMut(usize, &SelectedFile),
    {
        let start = Instant::now();
        let mut files = Vec::with_capacity(paths.len());
        let mut total_size = 0;

        for (idx, path) in paths.iter().enumerate() {
            let file = self.read(path).await?;
            total_size += file.content.len() as u64;
            on_progress(idx, &file);
            files.push(file);
        }

        let stats = ReadStatistics {
            file_count: files.len(),
            total_size,
            total_time: start.elapsed(),
        };

        Ok((files, stats))
    }
}

/// Check that `path` exists and is a regular file.
///
/// # Errors
///
/// Returns [`PdfBindError::FileNotFound`] or [`PdfBindError::NotAFile`].
pub async fn check_path_exists(path: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PdfBindError::file_not_found(path.to_path_buf())
        } else {
            PdfBindError::FailedToRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !metadata.is_file() {
        return Err(PdfBindError::not_a_file(path.to_path_buf()));
    }

    Ok(())
}
