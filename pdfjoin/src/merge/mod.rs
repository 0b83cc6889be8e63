//! Merge engine: concatenates the pages of an ordered document list.
//!
//! The engine is synchronous and CPU bound. It reads nothing but the byte
//! payloads it is handed, so the same call works for files, uploads or
//! in-memory fixtures. Callers on an async runtime should run it through
//! `spawn_blocking`, as [`SessionController`](crate::session::SessionController)
//! does.

pub mod merger;
pub(crate) mod pages;

use std::time::Duration;

use crate::document::{MergedOutput, SourceDocument};
use crate::error::Result;
use crate::utils::format_file_size;

pub use merger::{DocumentProgress, Merger};

/// Anything that can turn an ordered document list into one output.
///
/// [`Merger`] is the production implementation. The trait exists so the
/// session can be driven by a different engine.
pub trait MergeEngine: Send + Sync + 'static {
    /// Merge `documents` in order.
    ///
    /// # Errors
    ///
    /// `NoFilesToMerge` for an empty list, `ParseError` naming the first
    /// input that fails to parse, `SerializationError` if the result cannot
    /// be written out.
    fn merge(&self, documents: &[SourceDocument]) -> Result<MergedOutput>;
}

impl MergeEngine for Merger {
    fn merge(&self, documents: &[SourceDocument]) -> Result<MergedOutput> {
        Merger::merge(self, documents)
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStatistics {
    /// Number of input documents merged.
    pub documents_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Combined size of the inputs.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Wall time spent merging.
    pub merge_time: Duration,

    /// Whether streams were compressed before serializing.
    pub compressed: bool,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}
