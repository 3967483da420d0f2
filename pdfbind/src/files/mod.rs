//! The ordered list of files waiting to be merged.
//!
//! Files join the list in the order they were selected. Each entry keeps
//! its insertion order separately from its position, so the user can
//! reorder and sort freely and still return to the original upload order.
//! Every operation is total: out-of-range indices are ignored and reported
//! through the return value.
//!
//! # Examples
//!
//! ```
//! use pdfbind::config::SortMode;
//! use pdfbind::files::{FileList, SelectedFile};
//!
//! let mut list = FileList::new();
//! list.add([
//!     SelectedFile::new("b.pdf", b"%PDF-1.7".to_vec()),
//!     SelectedFile::new("a.pdf", b"%PDF-1.7".to_vec()),
//! ]);
//!
//! list.sort(SortMode::Alphabetical);
//! assert_eq!(list.names(), vec!["a.pdf", "b.pdf"]);
//!
//! list.sort(SortMode::Upload);
//! assert_eq!(list.names(), vec!["b.pdf", "a.pdf"]);
//! ```

mod collate;

pub use collate::locale_cmp;

use serde::Serialize;
use std::sync::Arc;

use crate::config::SortMode;

/// A file picked by the user, before it joins the list.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Name shown to the user, usually the file name.
    pub name: String,

    /// Raw file content.
    pub content: Arc<[u8]>,
}

impl SelectedFile {
    /// Create a selected file from its name and content.
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One file in the merge list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// File content, shared with any merge job snapshotting the list.
    #[serde(skip)]
    pub content: Arc<[u8]>,

    /// Name shown to the user and used as the chapter title.
    pub display_name: String,

    /// Position in the sequence of all files ever added to the list.
    pub insertion_order: u64,
}

impl FileEntry {
    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Ordered list of files to merge.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    entries: Vec<FileEntry>,
    next_insertion: u64,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files in the order given.
    ///
    /// Returns the number of entries added.
    pub fn add<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let before = self.entries.len();

        for file in files {
            self.entries.push(FileEntry {
                content: file.content,
                display_name: file.name,
                insertion_order: self.next_insertion,
            });
            self.next_insertion += 1;
        }

        self.entries.len() - before
    }

    /// Remove the entry at `index`.
    ///
    /// Returns the removed entry, or `None` when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<FileEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Whether `move_item(index, delta)` would change the list.
    pub fn can_move(&self, index: usize, delta: isize) -> bool {
        self.target_index(index, delta).is_some()
    }

    /// Swap the entry at `index` with the one `delta` positions away.
    ///
    /// Does nothing and returns `false` when either position is out of
    /// range. Moving back by `-delta` restores the previous order.
    pub fn move_item(&mut self, index: usize, delta: isize) -> bool {
        match self.target_index(index, delta) {
            Some(target) => {
                self.entries.swap(index, target);
                true
            }
            None => false,
        }
    }

    fn target_index(&self, index: usize, delta: isize) -> Option<usize> {
        if index >= self.entries.len() || delta == 0 {
            return None;
        }
        index
            .checked_add_signed(delta)
            .filter(|&target| target < self.entries.len())
    }

    /// Reorder the whole list.
    ///
    /// [`SortMode::Alphabetical`] orders by display name using
    /// [`locale_cmp`]; [`SortMode::Upload`] restores insertion order.
    /// Both sorts are stable.
    pub fn sort(&mut self, mode: SortMode) {
        match mode {
            SortMode::Alphabetical => self
                .entries
                .sort_by(|a, b| locale_cmp(&a.display_name, &b.display_name)),
            SortMode::Upload => self.entries.sort_by_key(|entry| entry.insertion_order),
        }
    }

    /// Remove every entry and restart insertion numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_insertion = 0;
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Entries in merge order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Iterate over entries in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Display names in merge order.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.display_name.as_str())
            .collect()
    }

    /// Combined size of all entries in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(FileEntry::size).sum()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
