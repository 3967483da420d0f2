//! PDF merge operations.
//!
//! - [`Merger`] copies the pages of every listed file into one document
//! - [`OutlineBuilder`] gives that document one bookmark per input file

pub mod merger;
pub mod outline;

pub use merger::{MergeOutput, MergePlan, MergeStatistics, Merger, PlannedFile};
pub use outline::{Chapter, OutlineBuilder, OutlineEntry};
