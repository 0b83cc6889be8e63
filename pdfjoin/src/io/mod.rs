//! Input selection and output delivery.
//!
//! The session never touches the filesystem itself. It receives documents
//! from a [`SelectionSource`] and hands the merged result to an
//! [`OutputSink`]; the file-backed implementations live in [`reader`] and
//! [`writer`].

pub mod reader;
pub mod writer;

use std::future::Future;

use crate::document::{MergedOutput, SourceDocument};
use crate::error::Result;

pub use reader::FileSelection;
pub use writer::{FileSink, MemorySink, WriteOptions, WriteStatistics};

/// Produces the documents of a new selection, in selection order.
pub trait SelectionSource {
    /// Read every selected document.
    ///
    /// # Errors
    ///
    /// Fails if any document cannot be read; no partial selection is
    /// returned.
    fn select(&self) -> impl Future<Output = Result<Vec<SourceDocument>>> + Send;
}

/// Receives the product of a successful merge.
pub trait OutputSink {
    /// Deliver `output`, returning where and how it was stored.
    fn deliver(&self, output: MergedOutput) -> impl Future<Output = Result<WriteStatistics>> + Send;
}
