//! Reordering and sorting before a merge.

use pdfjoin::SourceDocument;
use pdfjoin::io::FileSelection;
use pdfjoin::session::SessionController;
use pdfjoin::sort::{SortDirection, SortPolicy};
use rstest::rstest;
use std::cmp::Ordering;

use crate::common::{page_widths, temp_dir, write_pdf};

#[rstest]
#[case(SortDirection::Ascending, &["page2.pdf", "page10.pdf", "page100.pdf"], vec![2, 10, 100])]
#[case(SortDirection::Descending, &["page100.pdf", "page10.pdf", "page2.pdf"], vec![100, 10, 2])]
#[tokio::test]
async fn test_sorted_merge_uses_numeric_order(
    #[case] direction: SortDirection,
    #[case] expected_names: &[&str],
    #[case] expected_pages: Vec<i64>,
) {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "page10.pdf", &[10]),
        write_pdf(dir.path(), "page2.pdf", &[2]),
        write_pdf(dir.path(), "page100.pdf", &[100]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();
    session.sort(direction).unwrap();
    assert_eq!(session.names(), expected_names);

    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(page_widths(output.content()), expected_pages);
}

#[tokio::test]
async fn test_moves_after_sort() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "ch3.pdf", &[3]),
        write_pdf(dir.path(), "ch1.pdf", &[1]),
        write_pdf(dir.path(), "ch2.pdf", &[2]),
        write_pdf(dir.path(), "appendix.pdf", &[99]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();
    session.sort(SortDirection::Ascending).unwrap();
    // appendix.pdf has no digits and ranks ahead of every chapter
    assert_eq!(session.names(), ["appendix.pdf", "ch1.pdf", "ch2.pdf", "ch3.pdf"]);

    session.move_document(0, 3).unwrap();

    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(page_widths(output.content()), [1, 2, 3, 99]);
}

#[tokio::test]
async fn test_explicit_reorder() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", &[1, 2]),
        write_pdf(dir.path(), "b.pdf", &[3]),
        write_pdf(dir.path(), "c.pdf", &[4, 5]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();
    session.reorder(&[2, 0, 1]).unwrap();
    assert_eq!(session.names(), ["c.pdf", "a.pdf", "b.pdf"]);

    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(page_widths(output.content()), [4, 5, 1, 2, 3]);
}

#[tokio::test]
async fn test_sort_keeps_equal_names_in_place() {
    let dir = temp_dir();
    let first = dir.path().join("one");
    let second = dir.path().join("two");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();
    let paths = vec![
        write_pdf(&first, "scan7.pdf", &[71]),
        write_pdf(&second, "scan7.pdf", &[72]),
        write_pdf(dir.path(), "scan1.pdf", &[1]),
    ];

    let session = SessionController::new();
    session.select_from(&FileSelection::new(paths)).await.unwrap();

    session.sort(SortDirection::Descending).unwrap();
    let output = session.merge().await.unwrap().into_output().unwrap();
    assert_eq!(page_widths(output.content()), [71, 72, 1]);
}

#[rstest]
#[case(SortDirection::Ascending)]
#[case(SortDirection::Descending)]
#[tokio::test]
async fn test_sort_large_mixed_selection(#[case] direction: SortDirection) {
    let documents: Vec<SourceDocument> = (0..120)
        .map(|n| {
            let name = match n % 3 {
                0 => format!("x{}.pdf", (n * 7) % 13),
                1 => "x.pdf".to_string(),
                _ => format!("{}.pdf", ["bz", "Cover", "appendix"][n % 3]),
            };
            SourceDocument::new(name, Vec::new())
        })
        .collect();

    let session = SessionController::new();
    session.select(documents).unwrap();
    session.sort(direction).unwrap();
    let once = session.names();

    session.sort(direction).unwrap();
    assert_eq!(session.names(), once);

    let policy = SortPolicy::new(direction);
    for pair in once.windows(2) {
        assert_ne!(policy.compare(&pair[0], &pair[1]), Ordering::Greater);
    }
}
