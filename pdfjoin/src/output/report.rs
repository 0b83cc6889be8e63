//! Machine-readable run report.

use serde::Serialize;
use std::path::PathBuf;

use crate::collection::OrderedCollection;
use crate::document::SourceDocument;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;
use crate::session::MergeState;

/// One document of the final order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    /// One-based position in the merge order.
    pub position: usize,
    /// Document name.
    pub name: String,
    /// Payload size in bytes.
    pub size: u64,
}

/// Summary of a run, serialized with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Session state at the end of the run.
    pub state: MergeState,
    /// Whether the run stopped after resolving the order.
    pub dry_run: bool,
    /// Documents in merge order.
    pub documents: Vec<DocumentEntry>,
    /// Where the output was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Pages in the merged document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    /// Bytes written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
    /// Merge wall time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_time_ms: Option<u64>,
}

impl MergeReport {
    /// A report listing `documents` with no merge results yet.
    pub fn new(state: MergeState, documents: &OrderedCollection<SourceDocument>) -> Self {
        let documents = documents
            .iter()
            .enumerate()
            .map(|(index, document)| DocumentEntry {
                position: index + 1,
                name: document.name().to_string(),
                size: document.size(),
            })
            .collect();

        Self {
            state,
            dry_run: false,
            documents,
            output: None,
            total_pages: None,
            output_size: None,
            merge_time_ms: None,
        }
    }

    /// Mark the report as a dry run.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Attach the results of a completed merge.
    pub fn with_results(mut self, merge: &MergeStatistics, write: &WriteStatistics) -> Self {
        self.state = MergeState::Done;
        self.output = Some(write.output_path.clone());
        self.total_pages = Some(merge.total_pages);
        self.output_size = Some(write.file_size);
        self.merge_time_ms = Some(merge.merge_time.as_millis() as u64);
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
