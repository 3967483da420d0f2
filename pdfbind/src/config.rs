//! Configuration module for pdfbind.
//!
//! Holds the options a merge is run with, the rules for naming the output
//! file, and the CLI-level [`Config`] that drives a whole invocation:
//! - Merge options (chapter outline, output name, compression)
//! - Output filename resolution
//! - Sort modes for the file list
//! - Overwrite policy and verbosity

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfBindError, Result};

/// Name used for the merged document when the user leaves the name empty.
pub const DEFAULT_OUTPUT_NAME: &str = "merged_document.pdf";

/// Whether chapter bookmarks are produced when nothing else says otherwise.
pub const DEFAULT_CHAPTERS: bool = true;

/// Environment variable overriding [`DEFAULT_CHAPTERS`] for the CLI.
pub const CHAPTERS_ENV: &str = "PDFBIND_CHAPTERS";

const PDF_SUFFIX: &str = ".pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Streams are written as decoded.
    None,
    /// Streams are flate-compressed.
    #[default]
    Standard,
    /// Streams are compressed and unreachable objects pruned.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfBindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfBindError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Ordering applied to the whole file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// By display name, locale-aware ascending.
    Alphabetical,
    /// By the order files were originally added.
    Upload,
}

impl FromStr for SortMode {
    type Err = PdfBindError;

    /// Parse a sort mode.
    ///
    /// Accepts `alpha`/`alphabetical`/`name` and `upload`/`original`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alpha" | "alphabetical" | "name" => Ok(Self::Alphabetical),
            "upload" | "original" => Ok(Self::Upload),
            _ => Err(PdfBindError::invalid_config(format!(
                "Invalid sort mode: {s}. Must be one of: alpha, upload"
            ))),
        }
    }
}

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask before overwriting.
    #[default]
    Prompt,
    /// Overwrite without asking.
    Force,
    /// Never overwrite.
    NoClobber,
}

/// Options a single merge is run with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    /// Produce one outline entry per input file.
    pub chapters: bool,

    /// Name typed by the user; resolved with [`resolve_output_name`].
    pub output_name: Option<String>,

    /// Compression applied before serialization.
    pub compression: CompressionLevel,
}

impl MergeOptions {
    /// Options with the given chapter default and everything else unset.
    pub fn with_chapters(chapters: bool) -> Self {
        Self {
            chapters,
            output_name: None,
            compression: CompressionLevel::default(),
        }
    }

    /// The filename the merged document will be delivered under.
    pub fn file_name(&self) -> String {
        resolve_output_name(self.output_name.as_deref())
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::with_chapters(DEFAULT_CHAPTERS)
    }
}

/// Resolve the user's output name into a filename.
///
/// The input is trimmed. An empty or missing name yields
/// [`DEFAULT_OUTPUT_NAME`]; otherwise `.pdf` is appended unless the name
/// already ends with it (compared case-insensitively).
///
/// # Examples
///
/// ```
/// use pdfbind::config::resolve_output_name;
///
/// assert_eq!(resolve_output_name(Some("report")), "report.pdf");
/// assert_eq!(resolve_output_name(Some("Report.PDF")), "Report.PDF");
/// assert_eq!(resolve_output_name(Some("  ")), "merged_document.pdf");
/// ```
pub fn resolve_output_name(input: Option<&str>) -> String {
    let name = input.map(str::trim).unwrap_or_default();

    if name.is_empty() {
        return DEFAULT_OUTPUT_NAME.to_string();
    }

    if name.to_lowercase().ends_with(PDF_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{PDF_SUFFIX}")
    }
}

/// Parse a boolean flag value as found in environment variables.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validated configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Files, glob patterns or directories, in the order given.
    pub inputs: Vec<PathBuf>,

    /// Directory the merged document is written to.
    pub output_dir: PathBuf,

    /// Options forwarded to the merge engine.
    pub options: MergeOptions,

    /// Sort applied after the files are added.
    pub sort: Option<SortMode>,

    /// Descend into subdirectories of directory inputs.
    pub recursive: bool,

    /// Decode and report, but write nothing.
    pub dry_run: bool,

    /// Show per-file details.
    pub verbose: bool,

    /// Suppress everything but errors.
    pub quiet: bool,

    /// Print a JSON report instead of the human summary.
    pub json: bool,

    /// Policy for an existing output file.
    pub overwrite_mode: OverwriteMode,
}

impl Config {
    /// Create a config for the given inputs with default settings.
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: PathBuf::from("."),
            options: MergeOptions::default(),
            sort: None,
            recursive: false,
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
        }
    }

    /// Full path of the merged document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.options.file_name())
    }

    /// Check option combinations that cannot be expressed to clap.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::InvalidConfig`] when there are no inputs,
    /// when verbose and quiet are both set, when the output name contains a
    /// path separator, or when the output would overwrite an input.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfBindError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfBindError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(name) = self.options.output_name.as_deref()
            && name.contains(['/', '\\'])
        {
            return Err(PdfBindError::invalid_config(format!(
                "Output name must be a file name, not a path: {name}"
            )));
        }

        let output = self.output_path();
        if self.inputs.iter().any(|input| same_path(input, &output)) {
            return Err(PdfBindError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                output.display()
            )));
        }

        Ok(())
    }

    /// Split expanded inputs into the files to merge and those that are
    /// the output file itself.
    ///
    /// Directory and glob inputs are expanded after [`Config::validate`]
    /// runs, so a previous output sitting in an input directory is only
    /// caught here.
    pub fn exclude_output(&self, paths: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let output = self.output_path();
        paths
            .into_iter()
            .partition(|path| !same_path(path, &output))
    }

    /// Whether human-readable progress should be printed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
