//! Integration tests for the interactive session flow.

use lopdf::Document;
use pdfbind::config::SortMode;
use pdfbind::error::PdfBindError;
use pdfbind::files::SelectedFile;
use pdfbind::merge::OutlineBuilder;
use pdfbind::session::{Session, Status};

use crate::common::{page_widths, selected};

#[test]
fn test_full_session() -> anyhow::Result<()> {
    let mut session = Session::new();
    assert!(!session.controls().visible);

    session.add_files([
        selected("zeta.pdf", &[3]),
        selected("alpha.pdf", &[1]),
        selected("mid.pdf", &[2]),
    ]);
    let controls = session.controls();
    assert!(controls.visible && controls.merge_enabled && controls.sort_enabled);

    session.sort(SortMode::Alphabetical);
    session.move_file(2, -1);
    session.set_output_name("bundle");

    let output = session.merge()?;
    assert_eq!(output.file_name, "bundle.pdf");
    assert_eq!(
        session.status(),
        &Status::Done {
            file_name: "bundle.pdf".to_string()
        }
    );
    assert_eq!(session.status().message(), "Done! Saved as bundle.pdf");

    let doc = Document::load_mem(&output.bytes)?;
    assert_eq!(page_widths(&doc), vec![1, 3, 2]);

    let titles: Vec<String> = OutlineBuilder::new()
        .read(&doc)?
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["alpha", "zeta", "mid"]);
    Ok(())
}

#[test]
fn test_busy_session_rejects_second_merge() -> anyhow::Result<()> {
    let mut session = Session::new();
    session.add_files([selected("a.pdf", &[1])]);

    let job = session.begin_merge()?;
    assert!(session.is_busy());
    assert_eq!(session.status(), &Status::Working);
    assert!(!session.controls().merge_enabled);
    assert!(!session.controls().reset_enabled);

    assert!(matches!(
        session.begin_merge(),
        Err(PdfBindError::MergeInProgress)
    ));
    assert!(matches!(session.reset(), Err(PdfBindError::MergeInProgress)));

    let result = job.run();
    session.finish_merge(&result);
    assert!(result.is_ok());
    assert!(!session.is_busy());
    assert!(session.controls().merge_enabled);
    Ok(())
}

#[test]
fn test_failed_merge_can_be_retried() -> anyhow::Result<()> {
    let mut session = Session::new();
    session.add_files([
        selected("good.pdf", &[1]),
        SelectedFile::new("broken.pdf", b"%PDF-1.4 truncated".to_vec()),
    ]);

    let result = session.merge();
    assert!(matches!(result, Err(PdfBindError::FailedToLoadPdf { .. })));
    assert!(matches!(session.status(), Status::Failed { .. }));
    assert!(session.status().message().starts_with("Merge failed:"));
    assert!(session.controls().merge_enabled);

    session.remove_file(1);
    let output = session.merge()?;
    assert_eq!(output.statistics.files_merged, 1);
    Ok(())
}

#[test]
fn test_removing_last_file_resets() {
    let mut session = Session::with_default_chapters(false);
    session.add_files([selected("a.pdf", &[1])]);
    session.set_chapters(true);
    session.set_output_name("custom");

    assert!(session.remove_file(0).is_some());

    assert!(session.files().is_empty());
    assert!(!session.options().chapters);
    assert_eq!(session.options().output_name, None);
    assert_eq!(session.status(), &Status::Idle);
    assert!(!session.controls().visible);
}

#[test]
fn test_merge_empty_session() {
    let mut session = Session::new();
    assert!(matches!(session.merge(), Err(PdfBindError::NoFilesToMerge)));
    assert_eq!(session.status(), &Status::Idle);
}
