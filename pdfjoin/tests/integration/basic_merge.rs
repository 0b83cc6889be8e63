//! End-to-end merges from files on disk to files on disk.

use pdfjoin::config::CompressionLevel;
use pdfjoin::io::{FileSelection, FileSink, OutputSink, SelectionSource, WriteOptions};
use pdfjoin::merge::Merger;

use crate::common::{page_widths, temp_dir, write_pdf};

#[tokio::test]
async fn test_merge_three_files_in_selection_order() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", &[101, 102]),
        write_pdf(dir.path(), "b.pdf", &[201]),
        write_pdf(dir.path(), "c.pdf", &[301, 302, 303]),
    ];

    let documents = FileSelection::new(paths).select().await.unwrap();
    let output = Merger::new().merge(&documents).unwrap();

    let stats = output.statistics();
    assert_eq!(stats.documents_merged, 3);
    assert_eq!(stats.total_pages, 6);

    let target = dir.path().join("merged.pdf");
    let written = FileSink::new(Some(target.clone()))
        .deliver(output)
        .await
        .unwrap();

    assert_eq!(written.output_path, target);
    let bytes = std::fs::read(&target).unwrap();
    assert_eq!(written.file_size, bytes.len() as u64);
    assert_eq!(page_widths(&bytes), [101, 102, 201, 301, 302, 303]);
}

#[tokio::test]
async fn test_merge_single_file() {
    let dir = temp_dir();
    let path = write_pdf(dir.path(), "only.pdf", &[400, 401]);

    let documents = FileSelection::new(vec![path]).select().await.unwrap();
    let output = Merger::new().merge(&documents).unwrap();

    assert_eq!(output.statistics().total_pages, 2);
    assert_eq!(page_widths(output.content()), [400, 401]);
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let dir = temp_dir();
    let path = write_pdf(dir.path(), "twice.pdf", &[10, 11]);

    let documents = FileSelection::new(vec![path.clone(), path])
        .with_jobs(1)
        .select()
        .await
        .unwrap();
    let output = Merger::new().merge(&documents).unwrap();

    assert_eq!(page_widths(output.content()), [10, 11, 10, 11]);
}

#[tokio::test]
async fn test_uncompressed_output_is_readable() {
    let dir = temp_dir();
    let paths = vec![
        write_pdf(dir.path(), "x.pdf", &[1]),
        write_pdf(dir.path(), "y.pdf", &[2]),
    ];

    let documents = FileSelection::new(paths).select().await.unwrap();
    let output = Merger::with_compression(CompressionLevel::None)
        .merge(&documents)
        .unwrap();

    assert!(!output.statistics().compressed);
    assert_eq!(page_widths(output.content()), [1, 2]);
}

#[tokio::test]
async fn test_output_directory_gets_generated_name() {
    let dir = temp_dir();
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();
    let path = write_pdf(dir.path(), "in.pdf", &[5]);

    let documents = FileSelection::new(vec![path]).select().await.unwrap();
    let output = Merger::new().merge(&documents).unwrap();
    let filename = output.filename().to_string();

    let written = FileSink::new(Some(out_dir.clone()))
        .deliver(output)
        .await
        .unwrap();

    assert_eq!(written.output_path, out_dir.join(&filename));
    assert!(filename.ends_with(".pdf"));
    assert!(
        filename
            .trim_end_matches(".pdf")
            .chars()
            .all(|c| c.is_ascii_digit())
    );
}

#[tokio::test]
async fn test_overwrite_replaces_existing_output() {
    let dir = temp_dir();
    let target = dir.path().join("merged.pdf");
    std::fs::write(&target, b"old").unwrap();
    let path = write_pdf(dir.path(), "in.pdf", &[7, 8]);

    let documents = FileSelection::new(vec![path]).select().await.unwrap();
    let output = Merger::new().merge(&documents).unwrap();

    let sink = FileSink::with_options(
        Some(target.clone()),
        WriteOptions {
            overwrite: true,
            ..Default::default()
        },
    );
    sink.deliver(output).await.unwrap();

    assert_eq!(page_widths(&std::fs::read(&target).unwrap()), [7, 8]);
}
