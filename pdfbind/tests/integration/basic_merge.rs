//! Integration tests for page copying.

use lopdf::Document;
use pdfbind::config::{CompressionLevel, MergeOptions, SortMode};
use pdfbind::files::{FileList, SelectedFile};
use pdfbind::io::{PdfReader, PdfWriter};
use pdfbind::merge::Merger;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{page_widths, pdf_with_inherited_media_box, selected, write_pdf};

#[rstest]
#[case(vec![vec![10]])]
#[case(vec![vec![10, 11], vec![20]])]
#[case(vec![vec![10, 11, 12], vec![20, 21], vec![30], vec![40, 41, 42, 43]])]
fn test_page_count_is_sum_of_inputs(#[case] inputs: Vec<Vec<i64>>) -> anyhow::Result<()> {
    let mut files = FileList::new();
    files.add(
        inputs
            .iter()
            .enumerate()
            .map(|(i, widths)| selected(&format!("part{i}.pdf"), widths)),
    );

    let output = Merger::new().merge(files.entries(), &MergeOptions::default())?;
    let merged = Document::load_mem(&output.bytes)?;

    let expected: Vec<i64> = inputs.concat();
    assert_eq!(output.statistics.total_pages, expected.len());
    assert_eq!(page_widths(&merged), expected);
    Ok(())
}

#[test]
fn test_list_order_is_page_order() -> anyhow::Result<()> {
    let mut files = FileList::new();
    files.add([
        selected("c.pdf", &[3]),
        selected("a.pdf", &[1]),
        selected("b.pdf", &[2]),
    ]);

    files.sort(SortMode::Alphabetical);
    let sorted = Merger::new().merge(files.entries(), &MergeOptions::default())?;
    assert_eq!(page_widths(&Document::load_mem(&sorted.bytes)?), vec![1, 2, 3]);

    files.move_item(0, 2);
    let moved = Merger::new().merge(files.entries(), &MergeOptions::default())?;
    assert_eq!(page_widths(&Document::load_mem(&moved.bytes)?), vec![3, 2, 1]);

    files.sort(SortMode::Upload);
    let upload = Merger::new().merge(files.entries(), &MergeOptions::default())?;
    assert_eq!(page_widths(&Document::load_mem(&upload.bytes)?), vec![3, 1, 2]);
    Ok(())
}

#[test]
fn test_inherited_attributes_survive() -> anyhow::Result<()> {
    let mut files = FileList::new();
    files.add([
        SelectedFile::new("inherited.pdf", pdf_with_inherited_media_box(2, 500)),
        selected("own.pdf", &[600]),
    ]);

    let output = Merger::new().merge(files.entries(), &MergeOptions::default())?;
    let merged = Document::load_mem(&output.bytes)?;

    assert_eq!(page_widths(&merged), vec![500, 500, 600]);
    Ok(())
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_same_input_twice(#[case] compression: CompressionLevel) -> anyhow::Result<()> {
    let bytes = selected("same.pdf", &[5, 6]);
    let mut files = FileList::new();
    files.add([bytes.clone(), bytes]);

    let options = MergeOptions {
        compression,
        ..MergeOptions::default()
    };
    let output = Merger::new().merge(files.entries(), &options)?;
    let merged = Document::load_mem(&output.bytes)?;

    assert_eq!(page_widths(&merged), vec![5, 6, 5, 6]);
    Ok(())
}

#[tokio::test]
async fn test_read_merge_write() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let paths = vec![
        write_pdf(dir.path(), "first.pdf", &[1, 2]),
        write_pdf(dir.path(), "second.pdf", &[3]),
    ];

    let (selected, _) = PdfReader::new().read_all(&paths).await?;
    let mut files = FileList::new();
    files.add(selected);

    let options = MergeOptions {
        output_name: Some("joined".to_string()),
        ..MergeOptions::default()
    };
    let output = Merger::new().merge(files.entries(), &options)?;
    assert_eq!(output.file_name, "joined.pdf");

    let target = dir.path().join(&output.file_name);
    let stats = PdfWriter::new().write(&output.bytes, &target).await?;
    assert_eq!(stats.file_size, output.bytes.len() as u64);

    let written = Document::load(&target)?;
    assert_eq!(page_widths(&written), vec![1, 2, 3]);
    Ok(())
}
