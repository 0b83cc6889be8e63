//! Source documents and merged output.
//!
//! A [`SourceDocument`] is an opaque, immutable PDF byte payload together with
//! the file name it was selected under. Names are not unique; each document
//! also carries a process-unique [`DocumentId`] so two selections of the same
//! file remain distinguishable.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::merge::MergeStatistics;

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a selected document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// A selected input document.
///
/// Cloning is cheap: the payload is reference counted and never mutated.
#[derive(Clone)]
pub struct SourceDocument {
    id: DocumentId,
    name: String,
    content: Arc<[u8]>,
}

impl SourceDocument {
    /// Create a document from its file name and raw bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: DocumentId::next(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Identity assigned at selection time.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Original file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw document bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

impl fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDocument")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.content.len())
            .finish()
    }
}

/// The single product of a successful merge.
#[derive(Debug, Clone)]
pub struct MergedOutput {
    content: Vec<u8>,
    filename: String,
    statistics: MergeStatistics,
}

impl MergedOutput {
    pub(crate) fn new(content: Vec<u8>, statistics: MergeStatistics) -> Self {
        Self {
            content,
            filename: generate_filename(SystemTime::now()),
            statistics,
        }
    }

    /// Serialized PDF bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Generated file name, `<unix-millis>.pdf`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Statistics gathered while merging.
    pub fn statistics(&self) -> &MergeStatistics {
        &self.statistics
    }

    /// Consume the output, handing over the bytes and file name.
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.content, self.filename)
    }
}

/// Build the timestamp-based output file name.
pub fn generate_filename(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{millis}.pdf")
}
