//! Utilities for input path collection, naming and sizes.

pub mod text;

pub use text::{chapter_title, decode_text_string, encode_text_string};

use crate::{Result, error::PdfBindError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand CLI inputs into concrete file paths, keeping their order.
///
/// Each input may be:
/// - a directory: the `.pdf` files inside it, sorted by file name
///   (descending into subdirectories when `recursive` is set)
/// - a glob pattern such as `"chapters/*.pdf"`
/// - a plain path, taken as given
///
/// Errors:
/// - Invalid glob patterns.
/// - Filesystem errors while walking directories or matching globs.
pub fn collect_paths_for_patterns<T>(patterns: T, recursive: bool) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<Path>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern.as_ref(), recursive)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

fn collect_paths_for_pattern(pattern: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if pattern.is_dir() {
        return collect_pdfs_in_dir(pattern, recursive);
    }

    let text = pattern.to_string_lossy();
    if !is_glob_pattern(&text) {
        return Ok(vec![pattern.to_path_buf()]);
    }

    let mut resolved_paths = Vec::new();

    let paths = glob::glob(&text).map_err(|err| {
        PdfBindError::invalid_config(format!("Invalid glob pattern '{text}': {err}"))
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfBindError::other(err.to_string()))?;
        if path.is_file() {
            resolved_paths.push(path);
        }
    }

    if resolved_paths.is_empty() {
        tracing::warn!(pattern = %text, "glob pattern matched no files");
    }

    Ok(resolved_paths)
}

fn collect_pdfs_in_dir(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.map_err(|err| PdfBindError::other(err.to_string()))?;
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

fn is_glob_pattern(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// Whether the path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// The name a file is listed under: its file name, or the whole path when
/// it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
