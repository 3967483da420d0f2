//! Application state for an interactive merge session.
//!
//! A [`Session`] owns the file list, the merge options, the status line and
//! the in-flight flag. Front ends mutate it through its methods and render
//! from [`Session::controls`] and [`Session::status`].
//!
//! A merge can be driven in one call with [`Session::merge`], or split so
//! the work runs elsewhere (a blocking thread, for instance):
//!
//! ```no_run
//! # use pdfbind::session::Session;
//! # fn example(session: &mut Session) -> pdfbind::Result<()> {
//! let job = session.begin_merge()?;
//! let result = job.run();
//! session.finish_merge(&result);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::config::{DEFAULT_CHAPTERS, MergeOptions, SortMode};
use crate::error::{PdfBindError, Result};
use crate::files::{FileEntry, FileList, SelectedFile};
use crate::merge::{MergeOutput, Merger};

/// The status line shown under the controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Status {
    /// Nothing to report.
    #[default]
    Idle,
    /// A merge is running.
    Working,
    /// The last merge produced `file_name`.
    #[serde(rename_all = "camelCase")]
    Done {
        /// Name the merged document was delivered under.
        file_name: String,
    },
    /// The last merge failed.
    Failed {
        /// What went wrong.
        message: String,
    },
}

impl Status {
    /// Human-readable status text.
    pub fn message(&self) -> String {
        match self {
            Status::Idle => String::new(),
            Status::Working => "Merging files...".to_string(),
            Status::Done { file_name } => format!("Done! Saved as {file_name}"),
            Status::Failed { message } => format!("Merge failed: {message}"),
        }
    }
}

/// Which controls a front end should show and enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// The list and its controls are visible at all.
    pub visible: bool,
    /// The merge action is available.
    pub merge_enabled: bool,
    /// The reset action is available.
    pub reset_enabled: bool,
    /// The sort actions are available.
    pub sort_enabled: bool,
}

/// A snapshot of the list and options, ready to merge.
#[derive(Debug, Clone)]
pub struct MergeJob {
    files: Vec<FileEntry>,
    options: MergeOptions,
}

impl MergeJob {
    /// Files in merge order.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Options the job runs with.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Run the merge.
    pub fn run(&self) -> Result<MergeOutput> {
        Merger::new().merge(&self.files, &self.options)
    }
}

/// Interactive merge session.
#[derive(Debug, Clone)]
pub struct Session {
    files: FileList,
    options: MergeOptions,
    default_chapters: bool,
    status: Status,
    busy: bool,
}

impl Session {
    /// Create an empty session with the library's chapter default.
    pub fn new() -> Self {
        Self::with_default_chapters(DEFAULT_CHAPTERS)
    }

    /// Create an empty session whose chapter option starts at (and resets
    /// to) `chapters`.
    pub fn with_default_chapters(chapters: bool) -> Self {
        Self {
            files: FileList::new(),
            options: MergeOptions::with_chapters(chapters),
            default_chapters: chapters,
            status: Status::Idle,
            busy: false,
        }
    }

    /// The file list.
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Current merge options.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Mutable access to the merge options.
    pub fn options_mut(&mut self) -> &mut MergeOptions {
        &mut self.options
    }

    /// Current status line.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether a merge is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Add files to the end of the list.
    pub fn add_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.files.add(files)
    }

    /// Remove the file at `index`.
    ///
    /// Removing the last file returns the session to its initial state.
    pub fn remove_file(&mut self, index: usize) -> Option<FileEntry> {
        let removed = self.files.remove(index)?;
        if self.files.is_empty() && !self.busy {
            self.reset_state();
        }
        Some(removed)
    }

    /// Swap the file at `index` with the one `delta` positions away.
    pub fn move_file(&mut self, index: usize, delta: isize) -> bool {
        self.files.move_item(index, delta)
    }

    /// Sort the whole list.
    pub fn sort(&mut self, mode: SortMode) {
        self.files.sort(mode);
    }

    /// Set the chapter option.
    pub fn set_chapters(&mut self, chapters: bool) {
        self.options.chapters = chapters;
    }

    /// Set the output name typed by the user.
    pub fn set_output_name(&mut self, name: impl Into<String>) {
        self.options.output_name = Some(name.into());
    }

    /// Clear the list, options and status.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::MergeInProgress`] while a merge is running.
    pub fn reset(&mut self) -> Result<()> {
        if self.busy {
            return Err(PdfBindError::MergeInProgress);
        }
        self.reset_state();
        Ok(())
    }

    fn reset_state(&mut self) {
        self.files.clear();
        self.options = MergeOptions {
            compression: self.options.compression,
            ..MergeOptions::with_chapters(self.default_chapters)
        };
        self.status = Status::Idle;
    }

    /// Snapshot the list and options and mark the session busy.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::MergeInProgress`] while another merge is
    /// running and [`PdfBindError::NoFilesToMerge`] for an empty list.
    pub fn begin_merge(&mut self) -> Result<MergeJob> {
        if self.busy {
            return Err(PdfBindError::MergeInProgress);
        }
        if self.files.is_empty() {
            return Err(PdfBindError::NoFilesToMerge);
        }

        self.busy = true;
        self.status = Status::Working;

        Ok(MergeJob {
            files: self.files.entries().to_vec(),
            options: self.options.clone(),
        })
    }

    /// Record the outcome of a job started with [`Session::begin_merge`].
    pub fn finish_merge(&mut self, result: &Result<MergeOutput>) {
        self.busy = false;
        self.status = match result {
            Ok(output) => Status::Done {
                file_name: output.file_name.clone(),
            },
            Err(e) => {
                tracing::error!(error = %e, "merge failed");
                Status::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    /// Merge the current list.
    ///
    /// # Errors
    ///
    /// Fails like [`Session::begin_merge`] and [`Merger::merge`]; merge
    /// failures are also recorded in the status.
    pub fn merge(&mut self) -> Result<MergeOutput> {
        let job = self.begin_merge()?;
        let result = job.run();
        self.finish_merge(&result);
        result
    }

    /// Which controls are shown and enabled in the current state.
    pub fn controls(&self) -> Controls {
        let has_files = !self.files.is_empty();
        Controls {
            visible: has_files,
            merge_enabled: has_files && !self.busy,
            reset_enabled: has_files && !self.busy,
            sort_enabled: has_files && !self.busy,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
