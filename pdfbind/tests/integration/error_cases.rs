//! Integration tests for error handling.

use pdfbind::config::MergeOptions;
use pdfbind::error::PdfBindError;
use pdfbind::files::{FileList, SelectedFile};
use pdfbind::io::{PdfReader, check_path_exists};
use pdfbind::merge::Merger;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::selected;

#[test]
fn test_empty_list() {
    let result = Merger::new().merge(&[], &MergeOptions::default());
    assert!(matches!(result, Err(PdfBindError::NoFilesToMerge)));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn test_bad_input_aborts_merge(#[case] position: usize) {
    let mut inputs = vec![selected("a.pdf", &[1]), selected("b.pdf", &[2])];
    inputs.insert(position, SelectedFile::new("bad.pdf", Vec::<u8>::new()));

    let mut list = FileList::new();
    list.add(inputs);

    let err = Merger::new().merge(list.entries(), &MergeOptions::default()).unwrap_err();

    assert!(matches!(err, PdfBindError::FailedToLoadPdf { ref name, .. } if name == "bad.pdf"));
    assert!(err.is_merge_failure());
    assert!(err.to_string().contains("bad.pdf"));
}

#[tokio::test]
async fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");

    let result = check_path_exists(&missing).await;
    assert!(matches!(result, Err(PdfBindError::FileNotFound { .. })));

    let result = PdfReader::new().read_all(&[missing]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();

    let result = check_path_exists(dir.path()).await;
    assert!(matches!(result, Err(PdfBindError::NotAFile { .. })));
}
