//! Session lifecycle across select, merge and deliver.

use pdfjoin::io::{FileSelection, MemorySink, OutputSink};
use pdfjoin::session::{MergeOutcome, MergeState, SessionController};

use crate::common::{page_widths, temp_dir, write_garbage, write_pdf};

#[tokio::test]
async fn test_full_lifecycle() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", &[1]),
        write_pdf(dir.path(), "b.pdf", &[2]),
    ];

    let session = SessionController::new();
    assert_eq!(session.state(), MergeState::Empty);

    let mut states = session.subscribe();
    session.select_from(&FileSelection::new(paths)).await.unwrap();
    assert_eq!(session.state(), MergeState::Ready);
    assert_eq!(*states.borrow_and_update(), MergeState::Ready);

    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(session.state(), MergeState::Done);
    assert_eq!(*states.borrow_and_update(), MergeState::Done);

    let sink = MemorySink::new();
    sink.deliver(output).await.unwrap();
    let delivered = sink.take();
    assert_eq!(delivered.len(), 1);
    assert_eq!(page_widths(delivered[0].content()), [1, 2]);

    // A finished merge must be acknowledged before the next one
    let again = session.merge().await.unwrap();
    assert!(matches!(
        again,
        MergeOutcome::Rejected {
            state: MergeState::Done
        }
    ));

    session.reset();
    assert_eq!(session.state(), MergeState::Ready);
    assert!(session.merge().await.unwrap().into_output().is_some());
}

#[tokio::test]
async fn test_failed_merge_then_recover() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "good.pdf", &[1]),
        write_garbage(dir.path(), "broken.pdf"),
        write_pdf(dir.path(), "fine.pdf", &[3]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();

    let err = session.merge().await.unwrap_err();
    assert_eq!(err.document_index(), Some(1));
    assert!(err.to_string().contains("broken.pdf"));
    assert_eq!(session.state(), MergeState::Failed);

    // The selection survives a failure and can be edited
    assert_eq!(session.names(), ["good.pdf", "broken.pdf", "fine.pdf"]);
    session.remove(1).unwrap();
    assert_eq!(session.state(), MergeState::Ready);

    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(page_widths(output.content()), [1, 3]);
}

#[tokio::test]
async fn test_snapshot_is_unaffected_by_later_edits() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", &[1]),
        write_pdf(dir.path(), "b.pdf", &[2]),
        write_pdf(dir.path(), "c.pdf", &[3]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();

    let before = session.snapshot();
    session.move_document(2, 0).unwrap();
    session.remove(1).unwrap();

    let names: Vec<_> = before.iter().map(|d| d.name().to_string()).collect();
    assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
    assert_eq!(session.names(), ["c.pdf", "b.pdf"]);
}

#[tokio::test]
async fn test_removing_last_document_empties_session() {
    let dir = temp_dir();
    let path = write_pdf(dir.path(), "solo.pdf", &[1]);

    let session = SessionController::new();
    session.select_from(&FileSelection::new(vec![path])).await.unwrap();
    session.remove(0).unwrap();

    assert_eq!(session.state(), MergeState::Empty);
    assert!(matches!(
        session.merge().await.unwrap(),
        MergeOutcome::Rejected {
            state: MergeState::Empty
        }
    ));
}
