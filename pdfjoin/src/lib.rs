//! pdfjoin - Arrange PDF documents and merge them into one.
//!
//! This library keeps an ordered selection of PDF documents, lets the order
//! be changed by moves, explicit permutations or name sorting, and
//! concatenates the pages of every document, in order, into a single PDF.
//!
//! - [`collection`]: the ordered, snapshot-friendly document list
//! - [`sort`]: the name ordering used by the sort actions
//! - [`merge`]: the page-concatenating merge engine
//! - [`session`]: the state machine tying selection, ordering and merging together
//! - [`io`]: reading selections from disk and delivering outputs
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use pdfjoin::io::{FileSelection, FileSink, OutputSink};
//! use pdfjoin::session::SessionController;
//! use pdfjoin::sort::SortDirection;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionController::new();
//! let selection = FileSelection::new(vec![
//!     PathBuf::from("scan-10.pdf"),
//!     PathBuf::from("scan-2.pdf"),
//!     PathBuf::from("cover.pdf"),
//! ]);
//! session.select_from(&selection).await?;
//! session.sort(SortDirection::Ascending)?;
//! session.move_document(2, 0)?;
//!
//! if let Some(output) = session.merge().await?.into_output() {
//!     let stats = FileSink::new(None).deliver(output).await?;
//!     println!("Wrote {}", stats.output_path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the Engine Directly
//!
//! ```no_run
//! use pdfjoin::document::SourceDocument;
//! use pdfjoin::merge::Merger;
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfjoin::Result<()> {
//! let output = Merger::new().merge(&[
//!     SourceDocument::new("a.pdf", a),
//!     SourceDocument::new("b.pdf", b),
//! ])?;
//! println!("Created {} page document", output.statistics().total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod session;
pub mod sort;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use collection::{OrderedCollection, Permutation};
pub use config::Config;
pub use document::{MergedOutput, SourceDocument};
pub use error::{PdfJoinError, Result};
pub use merge::{MergeEngine, Merger};
pub use session::{MergeOutcome, MergeState, SessionController};
pub use sort::{SortDirection, SortPolicy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
