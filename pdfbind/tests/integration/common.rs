//! Shared helpers: in-memory PDF generation and inspection.
//!
//! Each generated page gets a distinct media box width so page order can
//! be checked after a merge.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use pdfbind::files::SelectedFile;
use std::path::{Path, PathBuf};

/// Serialize a document with one page per entry of `widths`.
pub fn pdf_with_pages(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = widths
        .iter()
        .map(|&width| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => widths.len() as i64,
        }),
    );

    finish(doc, pages_id)
}

/// Serialize a document whose pages inherit their media box from the
/// page tree root.
pub fn pdf_with_inherited_media_box(page_count: usize, width: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        }),
    );

    finish(doc, pages_id)
}

fn finish(mut doc: Document, pages_id: ObjectId) -> Vec<u8> {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

/// A selected file named `name` holding a PDF with the given page widths.
pub fn selected(name: &str, widths: &[i64]) -> SelectedFile {
    SelectedFile::new(name, pdf_with_pages(widths))
}

/// Write a PDF with the given page widths into `dir`.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_pages(widths)).expect("Failed to write test PDF");
    path
}

/// Media box width of every page, in document order, following inheritance.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let mut current = Some(page_id);
            while let Some(id) = current {
                let dict = doc.get_dictionary(id).expect("page tree node");
                if let Ok(media_box) = dict.get(b"MediaBox") {
                    return media_box.as_array().expect("media box array")[2]
                        .as_i64()
                        .expect("integer width");
                }
                current = dict.get(b"Parent").and_then(Object::as_reference).ok();
            }
            panic!("page {page_id:?} has no media box");
        })
        .collect()
}

/// The outline root dictionary and its id.
pub fn outline_root(doc: &Document) -> (ObjectId, &Dictionary) {
    let root_id = doc
        .catalog()
        .expect("catalog")
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .expect("outline root reference");
    (root_id, doc.get_dictionary(root_id).expect("outline root"))
}

/// Outline node ids in First/Next order.
pub fn outline_nodes(doc: &Document) -> Vec<ObjectId> {
    let (_, root) = outline_root(doc);
    let mut nodes = Vec::new();
    let mut cursor = reference(root, b"First");

    while let Some(id) = cursor {
        nodes.push(id);
        cursor = reference(doc.get_dictionary(id).expect("outline node"), b"Next");
    }

    nodes
}

/// Reference stored under `key`, if any.
pub fn reference(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
    dict.get(key).and_then(Object::as_reference).ok()
}
