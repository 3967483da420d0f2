//! Core PDF merging implementation.
//!
//! Inputs are decoded one at a time, in list order. Each decoded document
//! is renumbered above the output's highest object id, its objects are
//! moved into the output, and its page tree is grafted under the output's
//! page tree root. Grafting the whole subtree keeps attributes that pages
//! inherit from their parents (media box, resources, rotation).

use lopdf::{Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::time::Instant;

use crate::config::{CompressionLevel, MergeOptions};
use crate::error::{PdfBindError, Result};
use crate::files::FileEntry;
use crate::merge::outline::{Chapter, OutlineBuilder};
use crate::utils::{chapter_title, format_file_size};

const OUTPUT_VERSION: &str = "1.7";

/// Statistics about a merge operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatistics {
    /// Number of files whose pages were copied.
    pub files_merged: usize,

    /// Number of files skipped because they have no pages.
    pub files_empty: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Number of outline entries written.
    pub chapters: usize,

    /// Combined size of the inputs in bytes.
    pub input_size: u64,

    /// Size of the serialized output in bytes.
    pub output_size: u64,

    /// Wall-clock time of the merge in milliseconds.
    pub elapsed_ms: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The serialized PDF.
    pub bytes: Vec<u8>,

    /// Resolved filename to deliver the PDF under.
    pub file_name: String,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// One file as it would be merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedFile {
    /// Display name of the input.
    pub name: String,

    /// Number of pages the input contributes.
    pub pages: usize,

    /// Outline title, if the input gets a chapter.
    pub chapter: Option<String>,
}

/// What a merge would produce, without producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// Resolved output filename.
    pub file_name: String,

    /// Inputs in merge order.
    pub files: Vec<PlannedFile>,

    /// Total number of pages in the output.
    pub total_pages: usize,

    /// Number of outline entries the output would carry.
    pub chapters: usize,
}

/// The output document while inputs are being copied into it.
struct Assembly {
    document: Document,
    pages_root: ObjectId,
    chapters: Vec<Chapter>,
    files_merged: usize,
    files_empty: usize,
    total_pages: usize,
}

/// PDF merger that combines the file list into a single document.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    /// Builder for the chapter outline.
    outline: OutlineBuilder,
}

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self {
            outline: OutlineBuilder::new(),
        }
    }

    /// Merge `files`, in order, into a single PDF.
    ///
    /// With `options.chapters` set, every input with at least one page gets
    /// an outline entry titled after its name and pointing at its first
    /// page.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `files` is empty
    /// - Any input cannot be decoded (the whole merge is aborted)
    /// - The outline cannot be attached
    /// - Serialization fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfbind::config::MergeOptions;
    /// # use pdfbind::files::FileList;
    /// # use pdfbind::merge::Merger;
    /// # fn example(list: &FileList) -> pdfbind::Result<()> {
    /// let output = Merger::new().merge(list.entries(), &MergeOptions::default())?;
    /// println!("{}: {} pages", output.file_name, output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, files: &[FileEntry], options: &MergeOptions) -> Result<MergeOutput> {
        let start = Instant::now();

        if files.is_empty() {
            return Err(PdfBindError::NoFilesToMerge);
        }

        let mut assembly = self.assemble(files, options)?;

        let chapters = if options.chapters {
            self.outline
                .add_chapters(&mut assembly.document, &assembly.chapters)?
        } else {
            0
        };

        apply_compression(&mut assembly.document, options.compression);

        let mut bytes = Vec::new();
        assembly
            .document
            .save_to(&mut bytes)
            .map_err(|e| PdfBindError::merge_failed(format!("Failed to serialize PDF: {e}")))?;

        let statistics = MergeStatistics {
            files_merged: assembly.files_merged,
            files_empty: assembly.files_empty,
            total_pages: assembly.total_pages,
            chapters,
            input_size: files.iter().map(FileEntry::size).sum(),
            output_size: bytes.len() as u64,
            elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::debug!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            chapters = statistics.chapters,
            bytes = statistics.output_size,
            "merge complete"
        );

        Ok(MergeOutput {
            bytes,
            file_name: options.file_name(),
            statistics,
        })
    }

    /// Decode every input and report what [`Merger::merge`] would produce.
    ///
    /// # Errors
    ///
    /// Fails like [`Merger::merge`] on an empty list or an undecodable
    /// input.
    pub fn plan(&self, files: &[FileEntry], options: &MergeOptions) -> Result<MergePlan> {
        if files.is_empty() {
            return Err(PdfBindError::NoFilesToMerge);
        }

        let mut planned = Vec::with_capacity(files.len());
        for entry in files {
            let pages = load_document(entry)?.get_pages().len();
            let chapter = (options.chapters && pages > 0)
                .then(|| chapter_title(&entry.display_name).to_string());

            planned.push(PlannedFile {
                name: entry.display_name.clone(),
                pages,
                chapter,
            });
        }

        Ok(MergePlan {
            file_name: options.file_name(),
            total_pages: planned.iter().map(|file| file.pages).sum(),
            chapters: planned.iter().filter(|file| file.chapter.is_some()).count(),
            files: planned,
        })
    }

    /// Copy every input into a fresh output document.
    fn assemble(&self, files: &[FileEntry], options: &MergeOptions) -> Result<Assembly> {
        let mut document = Document::with_version(OUTPUT_VERSION);
        let pages_root = document.new_object_id();
        let catalog_id = document.new_object_id();

        document.objects.insert(
            pages_root,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0_i64,
            }),
        );
        document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_root,
            }),
        );
        document.trailer.set("Root", catalog_id);

        let mut assembly = Assembly {
            document,
            pages_root,
            chapters: Vec::new(),
            files_merged: 0,
            files_empty: 0,
            total_pages: 0,
        };

        for entry in files {
            let source = load_document(entry)?;
            self.import(&mut assembly, entry, source, options)?;
        }

        Ok(assembly)
    }

    /// Move one decoded input into the assembly.
    fn import(
        &self,
        assembly: &mut Assembly,
        entry: &FileEntry,
        mut source: Document,
        options: &MergeOptions,
    ) -> Result<()> {
        let page_count = source.get_pages().len();
        if page_count == 0 {
            tracing::debug!(file = %entry.display_name, "skipping file without pages");
            assembly.files_empty += 1;
            return Ok(());
        }

        source.renumber_objects_with(assembly.document.max_id + 1);
        assembly.document.max_id = source.max_id;

        let first_page = source
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| {
                PdfBindError::failed_to_load_pdf(&entry.display_name, "Page tree has no pages")
            })?;
        let (source_catalog, source_root) = page_tree_root(&source).map_err(|reason| {
            PdfBindError::failed_to_load_pdf(&entry.display_name, reason)
        })?;

        // The input catalog is replaced by the output's own.
        source.objects.remove(&source_catalog);
        assembly.document.objects.extend(source.objects);

        graft_page_tree(
            &mut assembly.document,
            assembly.pages_root,
            source_root,
            page_count,
        )?;

        if options.chapters {
            assembly
                .chapters
                .push(Chapter::new(chapter_title(&entry.display_name), first_page));
        }

        assembly.files_merged += 1;
        assembly.total_pages += page_count;

        tracing::debug!(
            file = %entry.display_name,
            pages = page_count,
            total = assembly.total_pages,
            "imported file"
        );

        Ok(())
    }
}

/// Decode one list entry.
fn load_document(entry: &FileEntry) -> Result<Document> {
    Document::load_mem(&entry.content).map_err(|e| {
        tracing::debug!(file = %entry.display_name, error = %e, "failed to decode file");
        PdfBindError::failed_to_load_pdf(&entry.display_name, e.to_string())
    })
}

/// Catalog id and page tree root id of a decoded document.
fn page_tree_root(doc: &Document) -> std::result::Result<(ObjectId, ObjectId), String> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| format!("Failed to get catalog reference: {e}"))?;

    let pages_id = doc
        .get_dictionary(catalog_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| format!("Failed to get pages reference: {e}"))?;

    Ok((catalog_id, pages_id))
}

/// Hang the page tree rooted at `subtree` under `root`.
fn graft_page_tree(
    merged: &mut Document,
    root: ObjectId,
    subtree: ObjectId,
    page_count: usize,
) -> Result<()> {
    merged
        .get_dictionary_mut(subtree)
        .map_err(|e| PdfBindError::merge_failed(format!("Failed to get pages object: {e}")))?
        .set("Parent", root);

    let pages = merged
        .get_dictionary_mut(root)
        .map_err(|e| PdfBindError::merge_failed(format!("Failed to get pages object: {e}")))?;

    pages
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|_| PdfBindError::merge_failed("Pages dictionary missing Kids array"))?
        .push(Object::Reference(subtree));

    let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", Object::Integer(current_count + page_count as i64));

    Ok(())
}

fn apply_compression(document: &mut Document, level: CompressionLevel) {
    match level {
        CompressionLevel::None => {}
        CompressionLevel::Standard => {
            document.compress();
        }
        CompressionLevel::Maximum => {
            let pruned = document.prune_objects();
            tracing::debug!(count = pruned.len(), "pruned unreachable objects");
            document.compress();
        }
    }

    // Always renumber for consistency
    document.renumber_objects();
}
