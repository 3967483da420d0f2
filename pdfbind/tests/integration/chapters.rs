//! Integration tests for the chapter outline.

use lopdf::{Document, Object};
use pdfbind::config::{CompressionLevel, MergeOptions};
use pdfbind::files::FileList;
use pdfbind::merge::{Merger, OutlineBuilder};
use pdfbind::utils::text::decode_text_string;
use rstest::rstest;

use crate::common::{outline_nodes, outline_root, reference, selected};

fn merged(files: &[(&str, &[i64])], options: &MergeOptions) -> anyhow::Result<Document> {
    let mut list = FileList::new();
    list.add(files.iter().map(|(name, widths)| selected(name, widths)));
    let output = Merger::new().merge(list.entries(), options)?;
    Ok(Document::load_mem(&output.bytes)?)
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_one_chapter_per_file(#[case] compression: CompressionLevel) -> anyhow::Result<()> {
    let options = MergeOptions {
        compression,
        ..MergeOptions::default()
    };
    let doc = merged(
        &[("intro.pdf", &[1, 2]), ("body.PDF", &[3]), ("appendix", &[4, 5, 6])],
        &options,
    )?;

    let (root_id, root) = outline_root(&doc);
    assert_eq!(root.get(b"Type")?.as_name()?, b"Outlines");
    assert_eq!(root.get(b"Count")?.as_i64()?, 3);

    let nodes = outline_nodes(&doc);
    assert_eq!(nodes.len(), 3);
    assert_eq!(reference(root, b"First"), Some(nodes[0]));
    assert_eq!(reference(root, b"Last"), Some(nodes[2]));

    for (i, &id) in nodes.iter().enumerate() {
        let node = doc.get_dictionary(id)?;
        assert_eq!(reference(node, b"Parent"), Some(root_id));
        assert_eq!(reference(node, b"Prev"), i.checked_sub(1).map(|p| nodes[p]));
        assert_eq!(reference(node, b"Next"), nodes.get(i + 1).copied());
    }

    let titles: Vec<String> = OutlineBuilder::new()
        .read(&doc)?
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["intro", "body", "appendix"]);
    Ok(())
}

#[test]
fn test_chapters_point_at_first_page_of_each_file() -> anyhow::Result<()> {
    let doc = merged(
        &[("a.pdf", &[1, 2]), ("b.pdf", &[3, 4, 5]), ("c.pdf", &[6])],
        &MergeOptions::default(),
    )?;

    let pages = doc.get_pages();
    let expected: Vec<_> = [1, 3, 6].iter().map(|n| pages[n]).collect();

    let targets: Vec<_> = OutlineBuilder::new()
        .read(&doc)?
        .into_iter()
        .map(|entry| entry.page)
        .collect();
    assert_eq!(targets, expected.into_iter().map(Some).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_non_ascii_titles_are_utf16() -> anyhow::Result<()> {
    let doc = merged(
        &[("Résumé.pdf", &[1]), ("日本語の資料.pdf", &[2])],
        &MergeOptions::default(),
    )?;

    let nodes = outline_nodes(&doc);
    let raw = match doc.get_dictionary(nodes[1])?.get(b"Title")? {
        Object::String(bytes, _) => bytes.clone(),
        other => panic!("unexpected title object: {other:?}"),
    };
    assert_eq!(&raw[..2], &[0xFE, 0xFF]);
    assert_eq!(decode_text_string(&raw), "日本語の資料");

    let entries = OutlineBuilder::new().read(&doc)?;
    assert_eq!(entries[0].title, "Résumé");
    Ok(())
}

#[test]
fn test_single_file_gets_single_chapter() -> anyhow::Result<()> {
    let doc = merged(&[("only.pdf", &[1, 2, 3])], &MergeOptions::default())?;

    let (_, root) = outline_root(&doc);
    let nodes = outline_nodes(&doc);
    assert_eq!(nodes.len(), 1);
    assert_eq!(reference(root, b"First"), reference(root, b"Last"));

    let node = doc.get_dictionary(nodes[0])?;
    assert!(!node.has(b"Prev"));
    assert!(!node.has(b"Next"));
    Ok(())
}

#[test]
fn test_empty_file_gets_no_chapter() -> anyhow::Result<()> {
    let mut list = FileList::new();
    list.add([
        selected("first.pdf", &[1]),
        selected("blank.pdf", &[]),
        selected("last.pdf", &[2]),
    ]);
    let output = Merger::new().merge(list.entries(), &MergeOptions::default())?;
    assert_eq!(output.statistics.files_empty, 1);
    assert_eq!(output.statistics.chapters, 2);

    let doc = Document::load_mem(&output.bytes)?;
    let titles: Vec<String> = OutlineBuilder::new()
        .read(&doc)?
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["first", "last"]);
    Ok(())
}

#[test]
fn test_chapters_disabled() -> anyhow::Result<()> {
    let doc = merged(
        &[("a.pdf", &[1]), ("b.pdf", &[2])],
        &MergeOptions::with_chapters(false),
    )?;

    assert!(!OutlineBuilder::new().has_outline(&doc));
    assert!(OutlineBuilder::new().read(&doc)?.is_empty());
    Ok(())
}
