//! Integration tests for merge planning.

use pdfbind::config::MergeOptions;
use pdfbind::error::PdfBindError;
use pdfbind::files::{FileList, SelectedFile};
use pdfbind::merge::Merger;

use crate::common::selected;

#[test]
fn test_plan_matches_merge() -> anyhow::Result<()> {
    let mut list = FileList::new();
    list.add([
        selected("one.pdf", &[1, 2]),
        selected("empty.pdf", &[]),
        selected("two.pdf", &[3, 4, 5]),
    ]);
    let options = MergeOptions {
        output_name: Some("book".to_string()),
        ..MergeOptions::default()
    };

    let merger = Merger::new();
    let plan = merger.plan(list.entries(), &options)?;
    let output = merger.merge(list.entries(), &options)?;

    assert_eq!(plan.file_name, "book.pdf");
    assert_eq!(plan.file_name, output.file_name);
    assert_eq!(plan.total_pages, output.statistics.total_pages);
    assert_eq!(plan.chapters, output.statistics.chapters);

    let pages: Vec<usize> = plan.files.iter().map(|file| file.pages).collect();
    assert_eq!(pages, vec![2, 0, 3]);
    assert_eq!(plan.files[0].chapter.as_deref(), Some("one"));
    assert_eq!(plan.files[1].chapter, None);
    Ok(())
}

#[test]
fn test_plan_without_chapters() -> anyhow::Result<()> {
    let mut list = FileList::new();
    list.add([selected("a.pdf", &[1]), selected("b.pdf", &[2])]);

    let plan = Merger::new().plan(list.entries(), &MergeOptions::with_chapters(false))?;

    assert_eq!(plan.chapters, 0);
    assert!(plan.files.iter().all(|file| file.chapter.is_none()));
    assert_eq!(plan.file_name, "merged_document.pdf");
    Ok(())
}

#[test]
fn test_plan_rejects_undecodable_input() {
    let mut list = FileList::new();
    list.add([
        selected("good.pdf", &[1]),
        SelectedFile::new("bad.pdf", b"not a pdf".to_vec()),
    ]);

    let result = Merger::new().plan(list.entries(), &MergeOptions::default());

    assert!(matches!(
        result,
        Err(PdfBindError::FailedToLoadPdf { ref name, .. }) if name == "bad.pdf"
    ));
}

#[test]
fn test_plan_serializes_camel_case() -> anyhow::Result<()> {
    let mut list = FileList::new();
    list.add([selected("a.pdf", &[1])]);

    let plan = Merger::new().plan(list.entries(), &MergeOptions::default())?;
    let json = serde_json::to_value(&plan)?;

    assert_eq!(json["fileName"], "merged_document.pdf");
    assert_eq!(json["totalPages"], 1);
    Ok(())
}
