//! Core merge implementation.
//!
//! Inputs are parsed one at a time, in order. Each parsed source is moved
//! into the output and dropped before the next one is parsed, so peak memory
//! is the output plus a single parsed input.

use lopdf::Document;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::CompressionLevel;
use crate::document::{MergedOutput, SourceDocument};
use crate::error::{PdfJoinError, Result};
use crate::merge::MergeStatistics;
use crate::merge::pages::PageTreeAssembler;

/// Progress notification, sent after each input has been merged.
#[derive(Debug, Clone, Copy)]
pub struct DocumentProgress<'a> {
    /// Zero-based position of the document in the merge order.
    pub index: usize,

    /// Total number of documents being merged.
    pub total: usize,

    /// Name of the document.
    pub name: &'a str,

    /// Pages contributed by the document.
    pub pages: usize,
}

/// PDF merger that concatenates documents page by page.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    compression: CompressionLevel,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger using the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self { compression }
    }

    /// Configured compression level.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Merge `documents` into one PDF.
    ///
    /// The output contains every page of `documents[0]`, then every page of
    /// `documents[1]`, and so on, each in its original order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `documents` is empty
    /// - An input cannot be parsed (the error names the first such input)
    /// - The merged document cannot be serialized
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::document::SourceDocument;
    /// # use pdfjoin::merge::Merger;
    /// # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfjoin::Result<()> {
    /// let documents = vec![
    ///     SourceDocument::new("a.pdf", a),
    ///     SourceDocument::new("b.pdf", b),
    /// ];
    /// let output = Merger::new().merge(&documents)?;
    /// println!("{} pages in {}", output.statistics().total_pages, output.filename());
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, documents: &[SourceDocument]) -> Result<MergedOutput> {
        self.merge_with_progress(documents, |_| {})
    }

    /// Merge `documents`, calling `on_document` after each input.
    pub fn merge_with_progress<F>(
        &self,
        documents: &[SourceDocument],
        mut on_document: F,
    ) -> Result<MergedOutput>
    where
        F: FnMut(&DocumentProgress<'_>),
    {
        if documents.is_empty() {
            return Err(PdfJoinError::NoFilesToMerge);
        }

        let merge_start = Instant::now();
        let total = documents.len();
        let mut assembler = PageTreeAssembler::new();

        for (index, document) in documents.iter().enumerate() {
            let source = parse(index, document)?;
            let pages = assembler
                .append(source)
                .map_err(|e| PdfJoinError::parse_error(index, document.name(), e.to_string()))?;

            debug!(index, name = document.name(), pages, "merged document");
            on_document(&DocumentProgress {
                index,
                total,
                name: document.name(),
                pages,
            });
        }

        let total_pages = assembler.page_count();
        let mut merged = assembler.finish();

        let compressed = match self.compression {
            CompressionLevel::None => false,
            CompressionLevel::Standard => {
                merged.compress();
                true
            }
        };

        let content = serialize(&mut merged)?;

        let statistics = MergeStatistics {
            documents_merged: total,
            total_pages,
            input_size: documents.iter().map(SourceDocument::size).sum(),
            output_size: content.len() as u64,
            merge_time: merge_start.elapsed(),
            compressed,
        };

        info!(
            documents = statistics.documents_merged,
            pages = statistics.total_pages,
            output_bytes = statistics.output_size,
            elapsed_ms = statistics.merge_time.as_millis() as u64,
            "merge complete"
        );

        Ok(MergedOutput::new(content, statistics))
    }
}

fn parse(index: usize, document: &SourceDocument) -> Result<Document> {
    Document::load_mem(document.content()).map_err(|e| {
        debug!(index, name = document.name(), error = %e, "failed to parse document");
        PdfJoinError::parse_error(index, document.name(), e.to_string())
    })
}

fn serialize(document: &mut Document) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    document
        .save_to(&mut content)
        .map_err(|e| PdfJoinError::serialization(e.to_string()))?;
    Ok(content)
}
