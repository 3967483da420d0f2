//! Output formatting and display for pdfbind.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - The file list with its per-row move controls
//! - Dry-run plans and merge summaries
//!
//! Developer diagnostics go through `tracing` instead.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::output::OutputFormatter;
//! use pdfbind::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Merging files...");
//! formatter.success("Done! Saved as merged_document.pdf");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::path::Path;

use crate::files::FileList;
use crate::merge::{MergePlan, MergeStatistics};
use crate::utils::format_file_size;

/// One row of the file list: position, name, size and which moves apply.
pub fn format_file_row(files: &FileList, index: usize) -> Option<String> {
    let entry = files.get(index)?;
    let up = if files.can_move(index, -1) { "↑" } else { " " };
    let down = if files.can_move(index, 1) { "↓" } else { " " };

    Some(format!(
        "{up}{down} {} ({})",
        entry.display_name,
        format_file_size(entry.size())
    ))
}

/// Display the file list in merge order.
pub fn display_file_list(formatter: &OutputFormatter, files: &FileList) {
    formatter.section(&format!("Files ({}):", files.len()));
    for index in 0..files.len() {
        if let Some(row) = format_file_row(files, index) {
            formatter.list_item(index + 1, &row);
        }
    }
}

/// One line of a dry-run plan.
pub fn format_plan_line(name: &str, pages: usize, chapter: Option<&str>) -> String {
    let pages = match pages {
        0 => "no pages, skipped".to_string(),
        1 => "1 page".to_string(),
        n => format!("{n} pages"),
    };

    match chapter {
        Some(title) => format!("{name}: {pages}, chapter \"{title}\""),
        None => format!("{name}: {pages}"),
    }
}

/// Display what a merge would produce.
pub fn display_plan(formatter: &OutputFormatter, plan: &MergePlan) {
    formatter.section("Dry run - no output written");
    for (index, file) in plan.files.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format_plan_line(&file.name, file.pages, file.chapter.as_deref()),
        );
    }
    formatter.blank_line();
    formatter.info(&format!(
        "Would write {} ({} pages, {} chapters)",
        plan.file_name, plan.total_pages, plan.chapters
    ));
}

/// One-line summary of a finished merge.
pub fn format_summary(stats: &MergeStatistics, output: &Path) -> String {
    format!(
        "Merged {} file(s) into {}: {} pages, {} chapters, {}",
        stats.files_merged,
        output.display(),
        stats.total_pages,
        stats.chapters,
        stats.format_output_size()
    )
}

/// Display merge statistics to the user.
pub fn display_summary(formatter: &OutputFormatter, stats: &MergeStatistics, output: &Path) {
    if stats.files_empty > 0 {
        formatter.warning(&format!(
            "{} file(s) had no pages and were skipped",
            stats.files_empty
        ));
    }

    formatter.success(&format_summary(stats, output));
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail("Time", &format!("{} ms", stats.elapsed_ms));
}
