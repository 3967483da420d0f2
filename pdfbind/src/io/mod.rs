//! Input and output for pdfbind.
//!
//! - [`PdfReader`] reads the selected files into memory
//! - [`PdfWriter`] writes the merged document atomically

pub mod reader;
pub mod writer;

pub use reader::{PdfReader, ReadStatistics, check_path_exists};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
