//! Integration tests for error handling and edge cases.

use pdfjoin::config::{Config, MoveRequest};
use pdfjoin::error::PdfJoinError;
use pdfjoin::io::{FileSelection, FileSink, OutputSink, SelectionSource};
use pdfjoin::merge::Merger;
use pdfjoin::session::{MergeState, SessionController};
use std::path::PathBuf;

use crate::common::{temp_dir, write_garbage, write_pdf};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let result = FileSelection::new(vec![PathBuf::from("/nonexistent/file.pdf")])
        .select()
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfJoinError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_directory_as_input() {
    let dir = temp_dir();
    let err = FileSelection::new(vec![dir.path().to_path_buf()])
        .select()
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::NotAFile { .. }));
}

#[tokio::test]
async fn test_failed_read_leaves_selection_untouched() {
    let dir = temp_dir();
    let good = write_pdf(dir.path(), "good.pdf", &[1]);

    let session = SessionController::new();
    session
        .select_from(&FileSelection::new(vec![good.clone()]))
        .await
        .unwrap();

    let missing = dir.path().join("missing.pdf");
    let result = session
        .select_from(&FileSelection::new(vec![good, missing]))
        .await;

    assert!(result.is_err());
    assert_eq!(session.names(), ["good.pdf"]);
    assert_eq!(session.state(), MergeState::Ready);
}

#[test]
fn test_error_empty_input_list() {
    let config = Config::default();
    assert!(config.validate().is_err(), "Should fail with empty input list");
}

#[test]
fn test_error_empty_merge() {
    let err = Merger::new().merge(&[]).unwrap_err();
    assert!(matches!(err, PdfJoinError::NoFilesToMerge));
}

#[tokio::test]
async fn test_error_unparsable_document_names_its_position() {
    let dir = temp_dir();
    let paths = vec![
        write_garbage(dir.path(), "first.pdf"),
        write_garbage(dir.path(), "second.pdf"),
    ];

    let documents = FileSelection::new(paths).select().await.unwrap();
    let err = Merger::new().merge(&documents).unwrap_err();

    // Fails fast on the first unparsable document
    assert_eq!(err.document_index(), Some(0));
    assert!(err.to_string().contains("first.pdf"));
    assert!(err.is_merge_failure());
}

#[tokio::test]
async fn test_error_output_exists_without_overwrite() {
    let dir = temp_dir();
    let target = dir.path().join("taken.pdf");
    std::fs::write(&target, b"keep me").unwrap();
    let input = write_pdf(dir.path(), "in.pdf", &[1]);

    let documents = FileSelection::new(vec![input]).select().await.unwrap();
    let output = Merger::new().merge(&documents).unwrap();

    let err = FileSink::new(Some(target.clone()))
        .deliver(output)
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::OutputExists { .. }));
    assert_eq!(std::fs::read(&target).unwrap(), b"keep me");
}

#[test]
fn test_error_move_out_of_range() {
    let config = Config {
        inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
        moves: vec![MoveRequest { from: 0, to: 5 }],
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let session = SessionController::new();
    let err = session.move_document(0, 1).unwrap_err();
    assert!(matches!(err, PdfJoinError::InvalidPermutation { .. }));
}

#[test]
fn test_error_invalid_reorder() {
    let session = SessionController::new();
    session
        .select(vec![
            pdfjoin::SourceDocument::new("a.pdf", Vec::new()),
            pdfjoin::SourceDocument::new("b.pdf", Vec::new()),
        ])
        .unwrap();

    assert!(session.reorder(&[0, 0]).is_err());
    assert!(session.reorder(&[0]).is_err());
    assert_eq!(session.names(), ["a.pdf", "b.pdf"]);
}
