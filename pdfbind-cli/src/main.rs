//! pdfbind - Bind PDF files into a single document with chapter bookmarks.
//!
//! Command-line front end: picks the files, applies the requested order,
//! runs the merge and writes the result to disk.

mod cli;

use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::Cli;
use pdfbind::config::{Config, OverwriteMode};
use pdfbind::error::PdfBindError;
use pdfbind::io::{PdfReader, PdfWriter};
use pdfbind::merge::{MergeOutput, Merger};
use pdfbind::output::{OutputFormatter, display_file_list, display_plan, display_summary};
use pdfbind::session::Session;
use pdfbind::utils::collect_paths_for_patterns;

#[tokio::main]
async fn main() {
    init_tracing();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (warnings by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(mut cli: Cli) -> Result<(), PdfBindError> {
    cli.validate()?;

    // Fold the input list into the direct inputs before building the config
    cli.inputs = cli.get_all_inputs().await?;
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfbind::NAME, pdfbind::VERSION));
        formatter.blank_line();
    }

    let paths = collect_paths_for_patterns(&config.inputs, config.recursive)?;
    let (paths, skipped) = config.exclude_output(paths);
    for path in &skipped {
        formatter.warning(&format!(
            "Skipping {}: it is the output file",
            path.display()
        ));
    }
    if paths.is_empty() {
        return Err(PdfBindError::NoFilesToMerge);
    }
    tracing::debug!(
        inputs = paths.len(),
        chapters = config.options.chapters,
        output = %config.output_path().display(),
        "resolved configuration"
    );

    formatter.info(&format!("Reading {} file(s)...", paths.len()));
    let (selected, read_stats) = PdfReader::new()
        .read_with_progress(&paths, |idx, file| {
            formatter.debug(&format!("[{}/{}] {}", idx + 1, paths.len(), file.name));
        })
        .await?;
    formatter.detail("Read", &read_stats.format_total_size());

    let mut session = Session::with_default_chapters(config.options.chapters);
    *session.options_mut() = config.options.clone();
    session.add_files(selected);
    if let Some(sort) = config.sort {
        session.sort(sort);
    }

    if formatter.is_verbose() {
        display_file_list(&formatter, session.files());
    }

    // Dry run mode - decode everything, write nothing
    if config.dry_run {
        let plan = Merger::new().plan(session.files().entries(), session.options())?;
        if config.json {
            print_json(&plan)?;
        } else {
            display_plan(&formatter, &plan);
        }
        return Ok(());
    }

    let output_path = config.output_path();
    handle_output_overwrite(&config, &output_path, &formatter).await?;

    let writer = PdfWriter::new();
    writer.can_write(&output_path).await?;

    let output = merge_in_background(&mut session, &formatter).await?;

    let write_stats = writer.write(&output.bytes, &output_path).await?;
    formatter.status(session.status());

    if config.json {
        print_json(&json!({
            "output": write_stats.output_path,
            "fileName": output.file_name,
            "statistics": output.statistics,
        }))?;
    } else {
        display_summary(&formatter, &output.statistics, &output_path);
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

/// Run the session's merge job on a blocking thread.
async fn merge_in_background(
    session: &mut Session,
    formatter: &OutputFormatter,
) -> Result<MergeOutput, PdfBindError> {
    let job = session.begin_merge()?;
    formatter.status(session.status());

    let result = tokio::task::spawn_blocking(move || job.run())
        .await
        .unwrap_or_else(|e| Err(PdfBindError::merge_failed(format!("Merge task failed: {e}"))));

    session.finish_merge(&result);
    result
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PdfBindError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PdfBindError::other(format!("Failed to encode JSON report: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    output_path: &Path,
    formatter: &OutputFormatter,
) -> Result<(), PdfBindError> {
    if !PdfWriter::new().exists(output_path).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfBindError::output_exists(output_path.to_path_buf())),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet or JSON mode
            if formatter.is_quiet() {
                return Err(PdfBindError::output_exists(output_path.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output_path.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfBindError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfBindError::Cancelled)
            }
        }
    }
}
