//! Reading selected files from disk.
//!
//! Files are read concurrently with a bounded number of reads in flight,
//! but results always come back in the order the paths were given.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::io::{FileSelection, SelectionSource};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let selection = FileSelection::new(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .with_jobs(4);
//! let documents = selection.select().await?;
//! assert_eq!(documents[0].name(), "a.pdf");
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::document::SourceDocument;
use crate::error::{PdfJoinError, Result};
use crate::io::SelectionSource;

/// A selection backed by files on disk.
#[derive(Debug, Clone)]
pub struct FileSelection {
    paths: Vec<PathBuf>,
    jobs: usize,
}

impl FileSelection {
    /// Select `paths`, in order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, jobs: 1 }
    }

    /// Allow up to `jobs` files to be read at once.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Selected paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read a single file into a [`SourceDocument`].
    ///
    /// The document is named after the file name component of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` does not exist
    /// - `path` is not a regular file
    /// - The file cannot be read
    pub async fn read(path: &Path) -> Result<SourceDocument> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfJoinError::file_not_found(path.to_path_buf())
            } else {
                PdfJoinError::FailedToReadInput {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfJoinError::not_a_file(path.to_path_buf()));
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| PdfJoinError::FailedToReadInput {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!(path = %path.display(), bytes = content.len(), "read input");
        Ok(SourceDocument::new(display_name(path), content))
    }
}

impl SelectionSource for FileSelection {
    async fn select(&self) -> Result<Vec<SourceDocument>> {
        let reads: Vec<_> = self.paths.iter().map(|path| Self::read(path)).collect();
        stream::iter(reads)
            .buffered(self.jobs)
            .try_collect()
            .await
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
