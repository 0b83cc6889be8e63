#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfjoin::{Merger, PdfJoinError, SourceDocument};

fuzz_target!(|data: &[u8]| {
    // The first byte picks where the input splits into two documents
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let at = usize::from(split).min(rest.len());
    let (first, second) = rest.split_at(at);

    let documents = [
        SourceDocument::new("first.pdf", first.to_vec()),
        SourceDocument::new("second.pdf", second.to_vec()),
    ];

    match Merger::new().merge(&documents) {
        Ok(output) => assert_eq!(output.statistics().documents_merged, 2),
        Err(PdfJoinError::ParseError { index, .. }) => assert!(index < 2),
        Err(err) => assert!(err.is_merge_failure(), "unexpected error: {err}"),
    }
});
