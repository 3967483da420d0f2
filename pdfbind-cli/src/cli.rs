//! CLI argument parsing for pdfbind.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use pdfbind::config::{
    CHAPTERS_ENV, CompressionLevel, Config, DEFAULT_CHAPTERS, MergeOptions, OverwriteMode,
    SortMode, parse_flag,
};
use pdfbind::error::{PdfBindError, Result};

/// Bind PDF files into a single document with one bookmark per file.
///
/// Every page of every input is copied, in the order given (or sorted with
/// --sort). Each input with at least one page becomes a chapter in the
/// outline, titled with its file name without the .pdf extension.
#[derive(Parser, Debug)]
#[command(name = "pdfbind")]
#[command(version)]
#[command(about = "Bind PDF files into a single document with chapter bookmarks", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files, directories or glob patterns (in order)
    ///
    /// Directories contribute the PDF files directly inside them, sorted by
    /// name. Explicitly named files are taken as given.
    ///
    /// Examples:
    ///   pdfbind intro.pdf body.pdf --name book
    ///   pdfbind "chapters/*.pdf" --sort alpha
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<PathBuf>,

    /// Name of the merged document
    ///
    /// ".pdf" is appended unless the name already ends with it.
    /// Defaults to merged_document.pdf.
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,

    /// Directory the merged document is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Add one bookmark per input file
    ///
    /// On by default; the default can be changed with the PDFBIND_CHAPTERS
    /// environment variable.
    #[arg(long, overrides_with = "no_chapters")]
    pub chapters: bool,

    /// Do not add bookmarks
    #[arg(long, overrides_with = "chapters")]
    pub no_chapters: bool,

    /// Reorder the inputs before merging
    ///
    /// - alpha: by file name, locale-aware
    /// - upload: the order the files were given in
    #[arg(short, long, value_name = "ORDER")]
    #[arg(value_parser = ["alpha", "alphabetical", "name", "upload", "original"])]
    pub sort: Option<String>,

    /// Compression level for output PDF
    ///
    /// - none: streams are left as decoded
    /// - standard: streams are compressed (default)
    /// - maximum: streams are compressed and unused objects dropped
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Dry run - decode inputs and preview the merge without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print a JSON report on stdout instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Verbose output - show every file and detailed statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Read input paths from a file (one path per line)
    ///
    /// Lines starting with '#' are comments. Use '-' to read from stdin.
    /// Paths from the list are appended after direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// The chapter default is read from `PDFBIND_CHAPTERS`.
    ///
    /// # Errors
    ///
    /// Returns an error if an option value is invalid or the resulting
    /// configuration does not validate.
    pub fn to_config(&self) -> Result<Config> {
        let env_chapters = std::env::var(CHAPTERS_ENV).ok();
        self.to_config_with_env(env_chapters.as_deref())
    }

    /// [`Cli::to_config`] with the environment's chapter default passed in.
    pub fn to_config_with_env(&self, env_chapters: Option<&str>) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;
        let sort = self.sort.as_deref().map(SortMode::from_str).transpose()?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let mut config = Config::new(self.inputs.clone());
        config.output_dir = self.output_dir.clone();
        config.options = MergeOptions {
            chapters: self.resolve_chapters(env_chapters)?,
            output_name: self.name.clone(),
            compression,
        };
        config.sort = sort;
        config.recursive = self.recursive;
        config.dry_run = self.dry_run;
        config.verbose = self.verbose;
        config.quiet = self.quiet;
        config.json = self.json;
        config.overwrite_mode = overwrite_mode;

        config.validate().map_err(|e| {
            PdfBindError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Explicit flags win over the environment, which wins over the
    /// built-in default.
    fn resolve_chapters(&self, env_chapters: Option<&str>) -> Result<bool> {
        if self.chapters {
            return Ok(true);
        }
        if self.no_chapters {
            return Ok(false);
        }

        match env_chapters {
            None => Ok(DEFAULT_CHAPTERS),
            Some(value) => parse_flag(value).ok_or_else(|| {
                PdfBindError::invalid_config(format!(
                    "Invalid value for {CHAPTERS_ENV}: {value}. Use true or false"
                ))
            }),
        }
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to merge or an option value is
    /// not recognised.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(PdfBindError::invalid_config("No input files specified"));
        }

        CompressionLevel::from_str(&self.compression)?;

        if let Some(sort) = self.sort.as_deref() {
            SortMode::from_str(sort)?;
        }

        Ok(())
    }

    /// Get all input paths including those from the input-list file.
    ///
    /// Paths from the file are appended after direct inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the input list cannot be read or nothing is
    /// left to merge.
    pub async fn get_all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = self.inputs.clone();

        if let Some(ref input_list_path) = self.input_list {
            let additional_inputs = read_input_list(input_list_path).await?;
            all_inputs.extend(additional_inputs);
        }

        if all_inputs.is_empty() {
            return Err(PdfBindError::NoFilesToMerge);
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a list file, or stdin for `-`.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    if path.as_os_str() == "-" {
        return parse_input_list(BufReader::new(tokio::io::stdin()), path).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| PdfBindError::FailedToReadInputList {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_input_list(BufReader::new(file), path).await
}

/// One path per line; blank lines and `#` comments are skipped.
async fn parse_input_list<R>(reader: R, path: &Path) -> Result<Vec<PathBuf>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| PdfBindError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfBindError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
