//! pdfbind - Bind PDF files into a single document with a chapter outline.
//!
//! This library holds everything behind the merge screen:
//!
//! - An ordered file list with reordering and sorting
//! - A session object tracking options, status and the in-flight merge
//! - The merge engine, copying every page of every file in list order
//! - An outline builder giving each input file a bookmark
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use pdfbind::config::SortMode;
//! use pdfbind::files::SelectedFile;
//! use pdfbind::session::Session;
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfbind::Result<()> {
//! let mut session = Session::new();
//! session.add_files([
//!     SelectedFile::new("chapter-2.pdf", a),
//!     SelectedFile::new("chapter-1.pdf", b),
//! ]);
//! session.sort(SortMode::Alphabetical);
//! session.set_output_name("book");
//!
//! let output = session.merge()?;
//! assert_eq!(output.file_name, "book.pdf");
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfbind::config::MergeOptions;
//! use pdfbind::io::{PdfReader, PdfWriter};
//! use pdfbind::files::FileList;
//! use pdfbind::merge::Merger;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> pdfbind::Result<()> {
//! let (selected, _) = PdfReader::new()
//!     .read_all(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await?;
//!
//! let mut files = FileList::new();
//! files.add(selected);
//!
//! let output = Merger::new().merge(files.entries(), &MergeOptions::default())?;
//! PdfWriter::new()
//!     .write(&output.bytes, Path::new(&output.file_name))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod files;
pub mod io;
pub mod merge;
pub mod output;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, MergeOptions};
pub use error::{PdfBindError, Result};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
