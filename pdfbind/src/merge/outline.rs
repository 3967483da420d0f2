//! Chapter outline (bookmark tree) for merged documents.
//!
//! The outline is a flat, doubly linked list of nodes hanging off a single
//! `/Outlines` root. Nodes live in the document's object table and refer to
//! each other by object id:
//!
//! ```text
//! Catalog ── /Outlines ──> Root { First, Last, Count }
//!                           │
//!              ┌────────────┴─────────────┐
//!              v                          v
//!           Node 1 <── Prev/Next ──> ... Node N     (Parent -> Root)
//! ```

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use serde::Serialize;

use crate::error::{PdfBindError, Result};
use crate::utils::{decode_text_string, encode_text_string};

/// One input file promoted to an outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Title shown in the bookmark pane.
    pub title: String,

    /// First page of the file inside the merged document.
    pub page: ObjectId,
}

impl Chapter {
    /// Create a chapter pointing at `page`.
    pub fn new(title: impl Into<String>, page: ObjectId) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }
}

/// An entry read back from an existing outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Decoded title.
    pub title: String,

    /// Target page, when the entry has an explicit page destination.
    #[serde(skip)]
    pub page: Option<ObjectId>,
}

/// Builds and inspects document outlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineBuilder;

impl OutlineBuilder {
    /// Create a new outline builder.
    pub fn new() -> Self {
        Self
    }

    /// Create the outline nodes and root for `chapters`.
    ///
    /// Returns the root id, or `None` when there are no chapters; no
    /// objects are created in that case. The root is not attached to the
    /// catalog, see [`OutlineBuilder::attach`].
    pub fn build(&self, doc: &mut Document, chapters: &[Chapter]) -> Option<ObjectId> {
        if chapters.is_empty() {
            return None;
        }

        let root_id = doc.new_object_id();
        let node_ids: Vec<ObjectId> = chapters.iter().map(|_| doc.new_object_id()).collect();

        for (i, chapter) in chapters.iter().enumerate() {
            let mut node = dictionary! {
                "Title" => encode_text_string(&chapter.title),
                "Parent" => root_id,
                "Dest" => vec![
                    Object::Reference(chapter.page),
                    Object::Name(b"Fit".to_vec()),
                ],
            };

            if i > 0 {
                node.set("Prev", node_ids[i - 1]);
            }
            if let Some(&next) = node_ids.get(i + 1) {
                node.set("Next", next);
            }

            doc.objects.insert(node_ids[i], Object::Dictionary(node));
        }

        let root = dictionary! {
            "Type" => "Outlines",
            "First" => node_ids[0],
            "Last" => node_ids[node_ids.len() - 1],
            "Count" => node_ids.len() as i64,
        };
        doc.objects.insert(root_id, Object::Dictionary(root));

        Some(root_id)
    }

    /// Point the document catalog's `/Outlines` at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::OutlineFailed`] if the catalog cannot be
    /// reached.
    pub fn attach(&self, doc: &mut Document, root: ObjectId) -> Result<()> {
        let catalog = doc
            .catalog_mut()
            .map_err(|e| PdfBindError::outline_failed(format!("Failed to get catalog: {e}")))?;
        catalog.set("Outlines", root);
        Ok(())
    }

    /// Build the outline for `chapters` and attach it to the catalog.
    ///
    /// Returns the number of entries written. Nothing is touched when
    /// `chapters` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::OutlineFailed`] if the catalog cannot be
    /// reached.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfbind::merge::{Chapter, OutlineBuilder};
    /// # use lopdf::Document;
    /// # fn example(mut doc: Document) -> pdfbind::Result<()> {
    /// let first_page = *doc.get_pages().values().next().unwrap();
    /// let written = OutlineBuilder::new()
    ///     .add_chapters(&mut doc, &[Chapter::new("Introduction", first_page)])?;
    /// assert_eq!(written, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_chapters(&self, doc: &mut Document, chapters: &[Chapter]) -> Result<usize> {
        if chapters.is_empty() {
            return Ok(0);
        }

        // Fail before allocating nodes that would be left dangling.
        doc.catalog()
            .map_err(|e| PdfBindError::outline_failed(format!("Failed to get catalog: {e}")))?;

        if let Some(root) = self.build(doc, chapters) {
            self.attach(doc, root)?;
        }

        Ok(chapters.len())
    }

    /// Check if a document has an outline.
    pub fn has_outline(&self, doc: &Document) -> bool {
        doc.catalog()
            .map(|catalog| catalog.has(b"Outlines"))
            .unwrap_or(false)
    }

    /// Detach the outline from the catalog.
    ///
    /// The nodes stay in the object table until the document is pruned.
    pub fn remove(&self, doc: &mut Document) -> Result<()> {
        if let Ok(catalog) = doc.catalog_mut() {
            catalog.remove(b"Outlines");
        }
        Ok(())
    }

    /// Read the top-level outline entries in order.
    ///
    /// Follows the root's `First`/`Next` chain. Documents without an
    /// outline yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::OutlineFailed`] if a node in the chain is
    /// missing or not a dictionary.
    pub fn read(&self, doc: &Document) -> Result<Vec<OutlineEntry>> {
        let Some(root_id) = doc
            .catalog()
            .ok()
            .and_then(|catalog| catalog.get(b"Outlines").ok())
            .and_then(|outlines| outlines.as_reference().ok())
        else {
            return Ok(Vec::new());
        };

        let root = node(doc, root_id)?;
        let mut entries = Vec::new();
        let mut cursor = root.get(b"First").and_then(Object::as_reference).ok();

        while let Some(id) = cursor {
            // A malformed Next chain could loop forever.
            if entries.len() > doc.objects.len() {
                return Err(PdfBindError::outline_failed("Outline chain does not terminate"));
            }

            let item = node(doc, id)?;
            entries.push(OutlineEntry {
                title: item
                    .get(b"Title")
                    .and_then(Object::as_str)
                    .map(decode_text_string)
                    .unwrap_or_default(),
                page: destination_page(doc, item),
            });
            cursor = item.get(b"Next").and_then(Object::as_reference).ok();
        }

        Ok(entries)
    }
}

fn node(doc: &Document, id: ObjectId) -> Result<&Dictionary> {
    doc.get_dictionary(id).map_err(|e| {
        PdfBindError::outline_failed(format!("Bad outline node {} {}: {e}", id.0, id.1))
    })
}

/// Page targeted by `Dest` or by a `GoTo` action's `D`.
fn destination_page(doc: &Document, item: &Dictionary) -> Option<ObjectId> {
    let dest = match item.get(b"Dest") {
        Ok(dest) => dest,
        Err(_) => {
            let action = match item.get(b"A").ok()? {
                Object::Reference(id) => doc.get_dictionary(*id).ok()?,
                Object::Dictionary(dict) => dict,
                _ => return None,
            };
            action.get(b"D").ok()?
        }
    };

    let dest = match dest {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };

    dest.as_array().ok()?.first()?.as_reference().ok()
}
