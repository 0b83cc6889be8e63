//! Delivering merged output.
//!
//! [`FileSink`] writes the merged bytes to disk with:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite protection
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::document::MergedOutput;
//! use pdfjoin::io::{FileSink, OutputSink};
//! use std::path::PathBuf;
//!
//! # async fn example(output: MergedOutput) -> Result<(), Box<dyn std::error::Error>> {
//! let sink = FileSink::new(Some(PathBuf::from("out/")));
//! let stats = sink.deliver(output).await?;
//! println!("Wrote {}", stats.output_path.display());
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::document::MergedOutput;
use crate::error::{PdfJoinError, Result};
use crate::io::OutputSink;
use crate::utils::format_file_size;

/// Options for writing output files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Replace an existing file at the destination.
    pub overwrite: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            overwrite: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Where the output was stored.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes merged output into a file or directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    target: Option<PathBuf>,
    options: WriteOptions,
}

impl FileSink {
    /// Write to `target`.
    ///
    /// A target that is an existing directory, or ends with a path
    /// separator, receives the generated file name. `None` means the current
    /// directory. Anything else is used as the file path.
    pub fn new(target: Option<PathBuf>) -> Self {
        Self::with_options(target, WriteOptions::default())
    }

    /// Create a sink with custom options.
    pub fn with_options(target: Option<PathBuf>, options: WriteOptions) -> Self {
        Self { target, options }
    }

    /// Write options in effect.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// The file path an output named `filename` would be written to.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        match &self.target {
            None => PathBuf::from(filename),
            Some(target) if is_directory_target(target) => target.join(filename),
            Some(target) => target.clone(),
        }
    }

    /// The fixed file path this sink writes to, if the target names a file.
    pub fn fixed_path(&self) -> Option<&Path> {
        self.target
            .as_deref()
            .filter(|target| !is_directory_target(target))
    }

    /// Write `output` and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination exists and overwriting is disabled
    /// - The destination directory doesn't exist or isn't writable
    /// - The write or the final rename fails
    pub async fn write(&self, output: MergedOutput) -> Result<WriteStatistics> {
        let path = self.resolve_path(output.filename());
        let options = self.options.clone();
        let (content, _) = output.into_parts();

        let stats = task::spawn_blocking(move || write_file(&path, &content, &options))
            .await
            .map_err(|e| PdfJoinError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            bytes = stats.file_size,
            "wrote output"
        );
        Ok(stats)
    }
}

impl OutputSink for FileSink {
    async fn deliver(&self, output: MergedOutput) -> Result<WriteStatistics> {
        self.write(output).await
    }
}

fn is_directory_target(target: &Path) -> bool {
    target.is_dir()
        || target
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::MAIN_SEPARATOR)
}

fn write_file(path: &Path, content: &[u8], options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    if !options.overwrite && path.exists() {
        return Err(PdfJoinError::output_exists(path.to_path_buf()));
    }

    let write_path = if options.atomic {
        path.with_extension("pdf.tmp")
    } else {
        path.to_path_buf()
    };

    write_staged(&write_path, options.buffer_size, |writer| writer.write_all(content))?;

    if options.atomic
        && let Err(e) = std::fs::rename(&write_path, path)
    {
        let _ = std::fs::remove_file(&write_path);
        return Err(write_error(path, e));
    }

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size: content.len() as u64,
        output_path: path.to_path_buf(),
    })
}

/// Create `write_path` and fill it through `fill`.
///
/// A failed write removes the partial file.
fn write_staged<F>(write_path: &Path, buffer_size: usize, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(write_path).map_err(|e| write_error(write_path, e))?;
    let mut writer = BufWriter::with_capacity(buffer_size, file);
    let written = fill(&mut writer).and_then(|()| writer.flush());
    drop(writer);

    if let Err(e) = written {
        let _ = std::fs::remove_file(write_path);
        return Err(write_error(write_path, e));
    }
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> PdfJoinError {
    PdfJoinError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Keeps delivered outputs in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    outputs: Mutex<Vec<MergedOutput>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outputs delivered so far.
    pub fn len(&self) -> usize {
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every delivered output, oldest first.
    pub fn take(&self) -> Vec<MergedOutput> {
        std::mem::take(&mut *self.outputs.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl OutputSink for MemorySink {
    async fn deliver(&self, output: MergedOutput) -> Result<WriteStatistics> {
        let stats = WriteStatistics {
            write_time: Duration::ZERO,
            file_size: output.content().len() as u64,
            output_path: PathBuf::from(output.filename()),
        };
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(output);
        Ok(stats)
    }
}
